//! Yearly calendar records and their JSON file.
//!
//! One [`YearlyDataset`] is produced per calendar year and written to
//! `{output_dir}/data_{year}.json`:
//!
//! ```json
//! {
//!   "moon_phases": [{ "date": "2026-01-03", "time": "07:02", "phase": "Full Moon" }],
//!   "alignments": {
//!     "geocentric": [{ "date": "...", "time": "...", "planet": "Jupiter",
//!                      "degrees": 0.71, "longitude_diff": 0.0002,
//!                      "description": "Moon and Jupiter aligned (sep: 0.7°)" }],
//!     "topocentric": []
//!   }
//! }
//! ```
use std::{fs, io::Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::almanac_errors::AlmanacError;

/// Events are ordered by the concatenation of their zero-padded local date and time.
pub trait ChronologicalKey {
    fn date(&self) -> &str;
    fn time(&self) -> &str;

    fn sort_key(&self) -> String {
        format!("{}{}", self.date(), self.time())
    }
}

/// Stable sort of events by local date and time.
pub fn sort_chronologically<E: ChronologicalKey>(events: &mut [E]) {
    events.sort_by_cached_key(|e| e.sort_key());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEvent {
    pub date: String,
    pub time: String,
    pub planet: String,
    /// Moon-planet separation, rounded to 2 decimals.
    pub degrees: f64,
    /// Absolute ecliptic longitude difference, rounded to 4 decimals.
    pub longitude_diff: f64,
    pub description: String,
}

impl ChronologicalKey for AlignmentEvent {
    fn date(&self) -> &str {
        &self.date
    }

    fn time(&self) -> &str {
        &self.time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseEvent {
    pub date: String,
    pub time: String,
    pub phase: String,
}

impl ChronologicalKey for MoonPhaseEvent {
    fn date(&self) -> &str {
        &self.date
    }

    fn time(&self) -> &str {
        &self.time
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignments {
    pub geocentric: Vec<AlignmentEvent>,
    pub topocentric: Vec<AlignmentEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyDataset {
    pub moon_phases: Vec<MoonPhaseEvent>,
    pub alignments: Alignments,
}

/// Path of the file holding `year`.
pub fn dataset_path(output_dir: &Utf8Path, year: i32) -> Utf8PathBuf {
    output_dir.join(format!("data_{year}.json"))
}

impl YearlyDataset {
    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, AlmanacError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the dataset of `year` under `output_dir`, creating the directory if needed.
    ///
    /// The document is written to a temporary file in the same directory, then renamed
    /// over the final path, so readers never see a partially written file.
    pub fn write(&self, output_dir: &Utf8Path, year: i32) -> Result<Utf8PathBuf, AlmanacError> {
        let json = self.to_json()?;
        fs::create_dir_all(output_dir)?;

        let path = dataset_path(output_dir, year);
        let partial = output_dir.join(format!(".data_{year}.json.tmp"));
        {
            let mut file = fs::File::create(&partial)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&partial, &path)?;

        info!(
            %path,
            moon_phases = self.moon_phases.len(),
            geocentric = self.alignments.geocentric.len(),
            topocentric = self.alignments.topocentric.len(),
            "dataset saved"
        );
        Ok(path)
    }

    pub fn read(path: &Utf8Path) -> Result<Self, AlmanacError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
