use camino::Utf8PathBuf;
use download_jpl_file::EphemFileSource;
use hifitime::Epoch;
use naif::{
    naif_data::NaifData,
    naif_ids::{NaifIds, Planet},
};
use state_vector::StateVector;
use tracing::info;

use crate::almanac_errors::AlmanacError;

pub mod download_jpl_file;
pub mod naif;
pub mod state_vector;

/// A loaded planetary ephemeris, queried with [`Epoch`]s.
#[derive(Debug, Clone)]
pub struct JPLEphem {
    path: Utf8PathBuf,
    data: NaifData,
}

impl JPLEphem {
    pub fn new(file_source: &EphemFileSource) -> Result<Self, AlmanacError> {
        let path = file_source.get_ephemeris_file()?;
        let data = NaifData::read_naif_file(&path)?;
        info!(%path, version = data.version().unwrap_or("unknown"), "ephemeris loaded");
        Ok(JPLEphem { path, data })
    }

    pub fn from_naif_data(path: Utf8PathBuf, data: NaifData) -> Self {
        JPLEphem { path, data }
    }

    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    pub fn naif_data(&self) -> &NaifData {
        &self.data
    }

    /// Barycentric state of `body`.
    pub fn ssb_state(&self, body: NaifIds, epoch: &Epoch) -> Result<StateVector, AlmanacError> {
        self.data.ssb_state(body, epoch.to_et_seconds())
    }

    /// Barycentric state of the Earth mass center (399).
    pub fn earth_ssb_state(&self, epoch: &Epoch) -> Result<StateVector, AlmanacError> {
        self.ssb_state(NaifIds::PlanetMassCenter(Planet::Earth), epoch)
    }

    /// Barycentric state of `body`, falling back to its system barycenter when the
    /// kernel has no mass center segment for it.
    pub fn ssb_state_or_barycenter(
        &self,
        body: NaifIds,
        epoch: &Epoch,
    ) -> Result<StateVector, AlmanacError> {
        match body {
            NaifIds::PlanetMassCenter(planet) if !self.data.has_target(body) => {
                self.ssb_state(NaifIds::PlanetaryBary(planet), epoch)
            }
            _ => self.ssb_state(body, epoch),
        }
    }
}
