use std::fmt;

use hifitime::Epoch;
use nom::{
    number::complete::{le_f64, le_i32},
    IResult,
};

use crate::jpl_ephem::naif::naif_ids::{naif_type::SpkDataType, NaifIds};

/// Array summary of one SPK segment.
///
/// Epochs are ET seconds past J2000; addresses are 1-based double-precision word
/// indices delimiting the segment data.
#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    pub start_epoch: f64,
    pub end_epoch: f64,
    pub target: i32,
    pub center: i32,
    pub frame_id: i32,
    pub data_type: i32,
    pub initial_addr: i32,
    pub final_addr: i32,
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, start_epoch) = le_f64(input)?;
        let (input, end_epoch) = le_f64(input)?;

        let (input, target) = le_i32(input)?;
        let (input, center) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, initial_addr) = le_i32(input)?;
        let (input, final_addr) = le_i32(input)?;
        Ok((
            input,
            Summary {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    /// Whether `et_seconds` lies inside the segment coverage (bounds included).
    pub fn covers(&self, et_seconds: f64) -> bool {
        (self.start_epoch..=self.end_epoch).contains(&et_seconds)
    }
}

fn naif_name(id: i32) -> String {
    NaifIds::from_id(id)
        .map(|naif| naif.to_string())
        .unwrap_or_else(|_| format!("NAIF {id}"))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data_type = SpkDataType::from_i32(self.data_type)
            .map(|t| t.to_string())
            .unwrap_or_else(|_| format!("Unknown ({})", self.data_type));

        let fields = [
            ("start_epoch", Epoch::from_et_seconds(self.start_epoch).to_string()),
            ("end_epoch", Epoch::from_et_seconds(self.end_epoch).to_string()),
            ("target", naif_name(self.target)),
            ("center", naif_name(self.center)),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", data_type),
            ("initial_addr", self.initial_addr.to_string()),
            ("final_addr", self.final_addr.to_string()),
        ];

        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        let value_width = fields.iter().map(|(_, v)| v.len()).max().unwrap_or(10);

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = label_width + 2,
            value = value_width + 2
        );

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label_width$} | {:<value_width$} |",
            "Field", "Value",
        )?;
        writeln!(f, "{border}")?;

        for (label, value) in fields {
            writeln!(f, "| {label:<label_width$} | {value:<value_width$} |")?;
        }

        writeln!(f, "{border}")
    }
}

#[cfg(test)]
pub(crate) mod test_summary {
    use super::*;

    pub(crate) fn summary_bytes(summary: &Summary) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(40);
        bytes.extend_from_slice(&summary.start_epoch.to_le_bytes());
        bytes.extend_from_slice(&summary.end_epoch.to_le_bytes());
        for value in [
            summary.target,
            summary.center,
            summary.frame_id,
            summary.data_type,
            summary.initial_addr,
            summary.final_addr,
        ] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    fn moon_summary() -> Summary {
        Summary {
            start_epoch: -3169195200.0,
            end_epoch: 1696852800.0,
            target: 301,
            center: 3,
            frame_id: 1,
            data_type: 2,
            initial_addr: 944041,
            final_addr: 2098004,
        }
    }

    #[test]
    fn test_summary_parse() {
        let expected = moon_summary();
        let bytes = summary_bytes(&expected);
        let (rest, summary) = Summary::parse(&bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(summary, expected);
        assert!(summary.covers(0.0));
        assert!(summary.covers(summary.end_epoch));
        assert!(!summary.covers(summary.end_epoch + 1.0));
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            start_epoch: -14200747200.0,
            end_epoch: 20514081600.0,
            target: 3,
            center: 0,
            frame_id: 1,
            data_type: 2,
            initial_addr: 3021513,
            final_addr: 4051108,
        };

        let expected = r#"+--------------+-------------------------+
| Field        | Value                   |
+--------------+-------------------------+
| start_epoch  | 1549-12-31T00:00:00 ET  |
| end_epoch    | 2650-01-25T00:00:00 ET  |
| target       | Earth-Moon Barycenter   |
| center       | Solar System Barycenter |
| frame_id     | 1                       |
| data_type    | Chebyshev Position Only |
| initial_addr | 3021513                 |
| final_addr   | 4051108                 |
+--------------+-------------------------+
"#;

        assert_eq!(format!("{summary}"), expected);
    }
}
