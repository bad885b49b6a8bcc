//! Planetary kernel versions distributed by NAIF under `generic_kernels/spk/planets`.
use std::{fmt, str::FromStr};

use crate::almanac_errors::AlmanacError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaifVersion {
    DE421,
    DE430,
    DE432,
    DE435,
    DE438,
    DE440,
    DE440s,
    DE442,
}

impl NaifVersion {
    const ALL: [NaifVersion; 8] = [
        NaifVersion::DE421,
        NaifVersion::DE430,
        NaifVersion::DE432,
        NaifVersion::DE435,
        NaifVersion::DE438,
        NaifVersion::DE440,
        NaifVersion::DE440s,
        NaifVersion::DE442,
    ];

    /// Canonical BSP file name, e.g. `"de421.bsp"`.
    pub fn get_filename(&self) -> &'static str {
        match self {
            NaifVersion::DE421 => "de421.bsp",
            NaifVersion::DE430 => "de430.bsp",
            NaifVersion::DE432 => "de432.bsp",
            NaifVersion::DE435 => "de435.bsp",
            NaifVersion::DE438 => "de438.bsp",
            NaifVersion::DE440 => "de440.bsp",
            NaifVersion::DE440s => "de440s.bsp",
            NaifVersion::DE442 => "de442.bsp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NaifVersion::DE421 => "DE421",
            NaifVersion::DE430 => "DE430",
            NaifVersion::DE432 => "DE432",
            NaifVersion::DE435 => "DE435",
            NaifVersion::DE438 => "DE438",
            NaifVersion::DE440 => "DE440",
            NaifVersion::DE440s => "DE440s",
            NaifVersion::DE442 => "DE442",
        }
    }
}

impl FromStr for NaifVersion {
    type Err = AlmanacError;

    /// Parse labels such as `"DE421"` or `"DE440s"`. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaifVersion::ALL
            .iter()
            .copied()
            .find(|v| v.label() == s)
            .ok_or_else(|| AlmanacError::InvalidJPLEphemFileVersion(format!("Invalid NAIF version: {s}")))
    }
}

impl fmt::Display for NaifVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod test_naif_version {
    use super::*;

    #[test]
    fn test_parse_version() {
        let v: NaifVersion = "DE421".parse().unwrap();
        assert_eq!(v, NaifVersion::DE421);
        assert_eq!(v.get_filename(), "de421.bsp");
        assert_eq!("DE440s".parse::<NaifVersion>().unwrap().get_filename(), "de440s.bsp");

        for v in NaifVersion::ALL {
            assert_eq!(v.to_string().parse::<NaifVersion>().unwrap(), v);
        }
    }

    #[test]
    fn test_invalid_version() {
        assert_eq!(
            "de421".parse::<NaifVersion>(),
            Err(AlmanacError::InvalidJPLEphemFileVersion(
                "Invalid NAIF version: de421".to_string()
            ))
        );
        assert!("DE999".parse::<NaifVersion>().is_err());
    }
}
