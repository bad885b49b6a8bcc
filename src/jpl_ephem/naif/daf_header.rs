//! DAF (Double Precision Array File) header parsing.
//!
//! The first 1024-byte record of a DAF container (SPK kernels are DAF files) carries
//! the structural metadata needed to walk the file:
//!
//! * **`idword`**: Format identifier, `"DAF/SPK"` for planetary ephemerides.
//! * **`nd`** / **`ni`**: Number of double / integer components of each array summary
//!   (`nd = 2`, `ni = 6` for SPK).
//! * **`fward`** / **`bward`**: 1-based record numbers of the first and last summary
//!   records of the doubly linked summary list.
//! * **`free`**: First free address, in double-precision words.
//! * **`locfmt`**: Binary format tag, `"LTL-IEEE"` or `"BIG-IEEE"`.
//!
//! Only little-endian (`"LTL-IEEE"`) kernels are read by this crate; the generic NAIF
//! planetary kernels are distributed in that format.

use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

/// Size in bytes of one DAF record.
pub const DAF_RECORD_LEN: usize = 1024;

/// In-memory representation of the DAF/SPK header (first 1024-byte record).
#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    /// 8-byte identifier, typically `"DAF/SPK"`.
    pub idword: String,
    /// 60-byte, padded internal kernel name.
    pub internal_filename: String,
    /// Number of double-precision components in each summary (ND).
    pub nd: i32,
    /// Number of integer components in each summary (NI).
    pub ni: i32,
    /// Record index of the first summary record (forward pointer).
    pub fward: i32,
    /// Record index of the last summary record (backward pointer).
    pub bward: i32,
    /// First free address (in double-precision words, 1-based).
    pub free: i32,
    /// Platform tag describing numeric representation (e.g. `"LTL-IEEE"`).
    pub locfmt: String,
}

impl DAFHeader {
    /// Parse the first DAF record into a [`DAFHeader`].
    ///
    /// Textual fields are returned with their trailing padding removed.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, id_word) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        Ok((
            input,
            DAFHeader {
                idword: String::from_utf8_lossy(id_word).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }

    /// Size of one array summary, in double-precision words: `ND + ceil(NI / 2)`.
    pub fn summary_size(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 18;
        const VALUE_WIDTH: usize = 50;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("ID Word", format!("{} (Format ID)", self.idword)),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} doubles, {} integers per summary", self.nd, self.ni)),
            ("Summary Records", format!("first #{}, last #{}", self.fward, self.bward)),
            ("Free Addr", format!("Next free address: {}", self.free)),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "DAF File Header",
            "",
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                label,
                value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
pub(crate) mod test_daf_header {
    use super::*;

    /// Build a minimal little-endian DAF/SPK file record.
    pub(crate) fn daf_record(fward: i32, free: i32) -> Vec<u8> {
        let mut record = Vec::with_capacity(DAF_RECORD_LEN);
        record.extend_from_slice(b"DAF/SPK ");
        record.extend_from_slice(&2i32.to_le_bytes());
        record.extend_from_slice(&6i32.to_le_bytes());
        record.extend_from_slice(format!("{:<60}", "SYNTHETIC TEST KERNEL").as_bytes());
        record.extend_from_slice(&fward.to_le_bytes());
        record.extend_from_slice(&fward.to_le_bytes());
        record.extend_from_slice(&free.to_le_bytes());
        record.extend_from_slice(b"LTL-IEEE");
        record.resize(DAF_RECORD_LEN, 0);
        record
    }

    #[test]
    fn test_parse_daf_header() {
        let record = daf_record(3, 1025);
        let (_, header) = DAFHeader::parse(&record).unwrap();
        assert_eq!(
            header,
            DAFHeader {
                idword: "DAF/SPK".to_string(),
                internal_filename: "SYNTHETIC TEST KERNEL".to_string(),
                nd: 2,
                ni: 6,
                fward: 3,
                bward: 3,
                free: 1025,
                locfmt: "LTL-IEEE".to_string(),
            }
        );
        assert_eq!(header.summary_size(), 5);
    }

    #[test]
    fn test_parse_truncated_header() {
        assert!(DAFHeader::parse(&[0u8; 40]).is_err());
    }

    #[test]
    fn test_display_daf_header() {
        let (_, header) = DAFHeader::parse(&daf_record(4, 2_098_005)).unwrap();

        let expected = r#"+-------------------+---------------------------------------------------+
| DAF File Header   |                                                   |
+-------------------+---------------------------------------------------+
| ID Word           | DAF/SPK (Format ID)                               |
| Internal Name     | SYNTHETIC TEST KERNEL                             |
| ND / NI           | 2 doubles, 6 integers per summary                 |
| Summary Records   | first #4, last #4                                 |
| Free Addr         | Next free address: 2098005                        |
| Binary Format     | LTL-IEEE                                          |
+-------------------+---------------------------------------------------+
"#;
        assert_eq!(format!("{header}"), expected);
    }
}
