//! Directory footer of a type 2 SPK segment.
//!
//! The last four double-precision words of every Chebyshev segment are:
//!
//! * `init`: start epoch of the first record (ET seconds past J2000),
//! * `intlen`: time span covered by each record (seconds),
//! * `rsize`: record size in double-precision words,
//! * `n`: number of records in the segment.
use std::fmt;

use hifitime::{Duration, Epoch};
use nom::{number::complete::le_f64, IResult};

/// Number of words in the directory footer.
pub const DIRECTORY_WORDS: usize = 4;

#[derive(Debug, PartialEq, Clone)]
pub struct DirectoryData {
    pub init: f64,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

impl DirectoryData {
    /// Parse the footer from the last 32 bytes of a segment.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, init) = le_f64(input)?;
        let (input, intlen) = le_f64(input)?;
        let (input, rsize) = le_f64(input)?;
        let (input, n_records) = le_f64(input)?;

        Ok((
            input,
            DirectoryData {
                init,
                intlen,
                rsize: rsize as usize,
                n_records: n_records as usize,
            },
        ))
    }

    /// Number of Chebyshev coefficients per axis in each record.
    pub fn n_coefficients(&self) -> usize {
        self.rsize.saturating_sub(2) / 3
    }

    /// 0-based index of the record covering `et_seconds`, clamped to the last record
    /// so that the final segment bound is served by the last record.
    pub fn record_index(&self, et_seconds: f64) -> usize {
        let raw = ((et_seconds - self.init) / self.intlen).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.n_records.saturating_sub(1))
        }
    }
}

impl fmt::Display for DirectoryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("init (epoch)", Epoch::from_et_seconds(self.init).to_string()),
            ("intlen", Duration::from_seconds(self.intlen).to_string()),
            ("rsize", self.rsize.to_string()),
            ("n_records", self.n_records.to_string()),
        ];

        writeln!(f, "+----------------+----------------------------+")?;
        writeln!(f, "| {:<14} | {:<26} |", "Field", "Value")?;
        writeln!(f, "+----------------+----------------------------+")?;
        for (label, value) in rows {
            writeln!(f, "| {label:<14} | {value:<26} |")?;
        }
        writeln!(f, "+----------------+----------------------------+")
    }
}
