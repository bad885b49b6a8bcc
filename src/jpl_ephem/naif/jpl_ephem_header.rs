//! Lenient reader for the text comment area of JPL planetary kernels.
//!
//! The comment area of a `.bsp` file is free text written by whoever produced the
//! kernel. Newer kernels (DE430 and later) start with
//! `JPL planetary and lunar ephemeris DE440` followed by the coverage block
//! `JD   2287184.5   to   JD   2688976.5`; older ones such as DE421 only mention the
//! version in passing. Only the version is required; the creation date and Julian
//! date coverage are extracted when present.
use std::fmt;

use nom::{
    bytes::complete::{tag, tag_no_case, take_until},
    character::complete::{digit1, not_line_ending, space0, space1},
    number::complete::double,
    IResult, Parser,
};

#[derive(Debug, PartialEq, Clone)]
pub struct JPLEphemHeader {
    pub version: String,
    pub creation_date: Option<String>,
    pub start_jd: Option<f64>,
    pub end_jd: Option<f64>,
}

/// `DE` followed by digits, case-insensitive. Suffixes such as `s` or `_part-1` are dropped.
fn version_token(input: &str) -> IResult<&str, String> {
    let (input, (_, digits)) = (tag_no_case("de"), digit1).parse(input)?;
    Ok((input, format!("DE{digits}")))
}

fn find_version(input: &str) -> Option<String> {
    if let Ok((_, line)) = versioned_title(input) {
        if let Ok((_, version)) = version_token(line.trim()) {
            return Some(version);
        }
    }

    // Fall back to the first standalone DExxx token of the text.
    input.char_indices().find_map(|(i, _)| {
        let preceded_by_word = input[..i]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        if preceded_by_word {
            return None;
        }
        version_token(&input[i..]).ok().map(|(_, v)| v)
    })
}

fn versioned_title(input: &str) -> IResult<&str, &str> {
    let (input, _) = take_until("JPL planetary and lunar ephemeris")(input)?;
    let (input, _) = tag("JPL planetary and lunar ephemeris")(input)?;
    let (input, _) = space0(input)?;
    not_line_ending(input)
}

fn creation_date(input: &str) -> IResult<&str, &str> {
    let (input, _) = take_until("Integrated ")(input)?;
    let (input, _) = tag("Integrated ")(input)?;
    let (input, date) = not_line_ending(input)?;
    Ok((input, date.trim()))
}

fn jd_range(input: &str) -> IResult<&str, (f64, f64)> {
    let (input, _) = take_until("JD ")(input)?;
    let (input, (_, _, start, _, _, _, _, _, end)) = (
        tag("JD"),
        space1,
        double,
        space1,
        tag("to"),
        space1,
        tag("JD"),
        space1,
        double,
    )
        .parse(input)?;
    Ok((input, (start, end)))
}

impl JPLEphemHeader {
    /// Extract the header fields from the comment area.
    ///
    /// Return
    /// ----------
    /// * `None` if no ephemeris version can be found in the text.
    pub fn parse(comment: &str) -> Option<Self> {
        let version = find_version(comment)?;
        let creation_date = creation_date(comment).ok().map(|(_, d)| d.to_string());
        let (start_jd, end_jd) = match jd_range(comment) {
            Ok((_, (start, end))) => (Some(start), Some(end)),
            Err(_) => (None, None),
        };

        Some(JPLEphemHeader {
            version,
            creation_date,
            start_jd,
            end_jd,
        })
    }
}

impl fmt::Display for JPLEphemHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 20;
        const VALUE_WIDTH: usize = 30;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 2,
            value = VALUE_WIDTH + 2
        );
        let unknown = || "unknown".to_string();
        let rows = [
            ("Version", self.version.clone()),
            ("Creation Date", self.creation_date.clone().unwrap_or_else(unknown)),
            ("Start JD", self.start_jd.map(|jd| format!("{jd:.6}")).unwrap_or_else(unknown)),
            ("End JD", self.end_jd.map(|jd| format!("{jd:.6}")).unwrap_or_else(unknown)),
        ];

        writeln!(
            f,
            "+{:^label$}+{:^value$}+",
            "JPL Ephemeris Header",
            "",
            label = LABEL_WIDTH + 2,
            value = VALUE_WIDTH + 2
        )?;
        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(f, "| {label:<LABEL_WIDTH$} | {value:<VALUE_WIDTH$} |")?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_jpl_header {
    use super::*;

    #[test]
    fn test_parse_modern_header() {
        let text = "JPL planetary and lunar ephemeris DE440\n\
                    Integrated 25 June 2020\n\
                    \n\
                    Time span covered by ephemeris:\n\
                    \n\
                    31-DEC-1549 00:00 to   25-JAN-2650 00:00\n\
                    JD   2287184.5   to   JD   2688976.5\n";

        let header = JPLEphemHeader::parse(text).unwrap();
        assert_eq!(
            header,
            JPLEphemHeader {
                version: "DE440".to_string(),
                creation_date: Some("25 June 2020".to_string()),
                start_jd: Some(2287184.5),
                end_jd: Some(2688976.5),
            }
        );
    }

    #[test]
    fn test_parse_sparse_header() {
        let text = "; de421.bsp LOG FILE\n;\n; Created 2008-02-12/11:33:34.00.\n";
        let header = JPLEphemHeader::parse(text).unwrap();
        assert_eq!(header.version, "DE421");
        assert_eq!(header.creation_date, None);
        assert_eq!(header.start_jd, None);
    }

    #[test]
    fn test_no_version() {
        assert!(JPLEphemHeader::parse("nothing useful here, index 42").is_none());
        assert!(JPLEphemHeader::parse("CODE421 is not a version").is_none());
    }

    #[test]
    fn test_jpl_header_display() {
        let header = JPLEphemHeader {
            version: "DE421".to_string(),
            creation_date: None,
            start_jd: Some(2414864.5),
            end_jd: Some(2471184.5),
        };

        let expected = r#"+ JPL Ephemeris Header +                                +
+----------------------+--------------------------------+
| Version              | DE421                          |
| Creation Date        | unknown                        |
| Start JD             | 2414864.500000                 |
| End JD               | 2471184.500000                 |
+----------------------+--------------------------------+
"#;
        assert_eq!(format!("{header}"), expected);
    }
}
