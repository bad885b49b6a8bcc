use thiserror::Error;

use crate::jpl_ephem::naif::naif_ids::ErrorId;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Invalid JPL string format: {0}")]
    InvalidJPLStringFormat(String),

    #[error("Invalid JPL ephemeris file version: {0}")]
    InvalidJPLEphemFileVersion(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Base dir creation error for JPL ephemeris file: {0}")]
    UnableToCreateBaseDir(String),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("JPL File not found at: {0}")]
    JPLFileNotFound(String),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("Invalid NAIF identifier: {0}")]
    InvalidNaifId(#[from] ErrorId),

    #[error("No ephemeris segment for target {0}")]
    SegmentNotFound(i32),

    #[error("Epoch {et_seconds} ET s is outside the ephemeris coverage for target {target}")]
    EpochOutOfRange { target: i32, et_seconds: f64 },

    #[error("Invalid geographic coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid NaN value in site geometry")]
    NanSiteGeometry(#[from] ordered_float::FloatIsNan),

    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Date conversion error: {0}")]
    DateConversion(String),

    #[error("Altitude/azimuth requires a topocentric frame")]
    AltAzRequiresSite,

    #[error("Degenerate observation geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid Moon quarter code: {0}, expected 0 to 3")]
    InvalidPhaseCode(u8),

    #[error("Invalid search configuration: {0}")]
    InvalidSearchConfig(String),

    #[error("Extremum refinement did not converge after {iterations} iterations (bracket width {width_days} days)")]
    SearchNonConvergence { iterations: usize, width_days: f64 },

    #[error("Objective returned a non-finite value at {0}")]
    NonFiniteObjective(hifitime::Epoch),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PartialEq for AlmanacError {
    fn eq(&self, other: &Self) -> bool {
        use AlmanacError::*;
        match (self, other) {
            (InvalidJPLStringFormat(a), InvalidJPLStringFormat(b)) => a == b,
            (InvalidJPLEphemFileVersion(a), InvalidJPLEphemFileVersion(b)) => a == b,

            // Wrapped errors are only compared by variant
            (IoError(_), IoError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,
            (SerializationError(_), SerializationError(_)) => true,
            (NanSiteGeometry(_), NanSiteGeometry(_)) => true,

            (UnableToCreateBaseDir(a), UnableToCreateBaseDir(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (JPLFileNotFound(a), JPLFileNotFound(b)) => a == b,
            (NomParsingError(a), NomParsingError(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (InvalidNaifId(a), InvalidNaifId(b)) => a.to_string() == b.to_string(),
            (SegmentNotFound(a), SegmentNotFound(b)) => a == b,
            (
                EpochOutOfRange {
                    target: t1,
                    et_seconds: e1,
                },
                EpochOutOfRange {
                    target: t2,
                    et_seconds: e2,
                },
            ) => t1 == t2 && e1 == e2,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidTimeZone(a), InvalidTimeZone(b)) => a == b,
            (DateConversion(a), DateConversion(b)) => a == b,
            (InvalidPhaseCode(a), InvalidPhaseCode(b)) => a == b,
            (InvalidSearchConfig(a), InvalidSearchConfig(b)) => a == b,
            (
                SearchNonConvergence {
                    iterations: i1,
                    width_days: w1,
                },
                SearchNonConvergence {
                    iterations: i2,
                    width_days: w2,
                },
            ) => i1 == i2 && w1 == w2,
            (NonFiniteObjective(a), NonFiniteObjective(b)) => a == b,

            (DegenerateGeometry(a), DegenerateGeometry(b)) => a == b,
            (AltAzRequiresSite, AltAzRequiresSite) => true,

            _ => false,
        }
    }
}
