use std::{convert::TryFrom, fmt};

use crate::almanac_errors::AlmanacError;

/// SPK segment data types, as numbered by the NAIF SPK required reading.
///
/// Only [`SpkDataType::ChebyshevPositionOnly`] (type 2) can be evaluated by this
/// crate; JPL planetary kernels (DE4xx) are written exclusively with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SpkDataType {
    ModifiedDifferenceArray = 1,
    ChebyshevPositionOnly = 2,
    ChebyshevPositionVelocity = 3,
    TwoBodyDiscreteStates = 5,
    EquallySpacedLagrange = 8,
    UnequallySpacedLagrange = 9,
    TwoLineElements = 10,
    HermiteUniform = 12,
    HermiteNonUniform = 13,
    ChebyshevNonUniform = 14,
    PrecessingConic = 15,
    EquinoctialElements = 17,
    ESAHermiteLagrange = 18,
    ESAPiecewiseInterpolation = 19,
    ChebyshevVelocityOnly = 20,
    ExtendedModifiedDifferenceArray = 21,
}

const ALL_TYPES: [SpkDataType; 16] = [
    SpkDataType::ModifiedDifferenceArray,
    SpkDataType::ChebyshevPositionOnly,
    SpkDataType::ChebyshevPositionVelocity,
    SpkDataType::TwoBodyDiscreteStates,
    SpkDataType::EquallySpacedLagrange,
    SpkDataType::UnequallySpacedLagrange,
    SpkDataType::TwoLineElements,
    SpkDataType::HermiteUniform,
    SpkDataType::HermiteNonUniform,
    SpkDataType::ChebyshevNonUniform,
    SpkDataType::PrecessingConic,
    SpkDataType::EquinoctialElements,
    SpkDataType::ESAHermiteLagrange,
    SpkDataType::ESAPiecewiseInterpolation,
    SpkDataType::ChebyshevVelocityOnly,
    SpkDataType::ExtendedModifiedDifferenceArray,
];

impl SpkDataType {
    pub fn from_i32(value: i32) -> Result<Self, AlmanacError> {
        SpkDataType::try_from(value)
    }

    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

impl From<SpkDataType> for i32 {
    fn from(data_type: SpkDataType) -> Self {
        data_type as i32
    }
}

impl TryFrom<i32> for SpkDataType {
    type Error = AlmanacError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ALL_TYPES
            .iter()
            .copied()
            .find(|t| t.to_i32() == value)
            .ok_or(AlmanacError::InvalidSpkDataType(value))
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpkDataType::ModifiedDifferenceArray => "Modified Difference Array",
            SpkDataType::ChebyshevPositionOnly => "Chebyshev Position Only",
            SpkDataType::ChebyshevPositionVelocity => "Chebyshev Position Velocity",
            SpkDataType::TwoBodyDiscreteStates => "Two-Body Discrete States",
            SpkDataType::EquallySpacedLagrange => "Equally Spaced Lagrange",
            SpkDataType::UnequallySpacedLagrange => "Unequally Spaced Lagrange",
            SpkDataType::TwoLineElements => "Two-Line Elements",
            SpkDataType::HermiteUniform => "Hermite Uniform",
            SpkDataType::HermiteNonUniform => "Hermite Non-Uniform",
            SpkDataType::ChebyshevNonUniform => "Chebyshev Non-Uniform",
            SpkDataType::PrecessingConic => "Precessing Conic",
            SpkDataType::EquinoctialElements => "Equinoctial Elements",
            SpkDataType::ESAHermiteLagrange => "ESA Hermite/Lagrange",
            SpkDataType::ESAPiecewiseInterpolation => "ESA Piecewise Interpolation",
            SpkDataType::ChebyshevVelocityOnly => "Chebyshev Velocity Only",
            SpkDataType::ExtendedModifiedDifferenceArray => "Extended Modified Difference Array",
        };
        write!(f, "{name}")
    }
}
