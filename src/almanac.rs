//! # Almanac: configuration, ephemeris and yearly runs
//!
//! [`Almanac`] is the façade used by the `generate_data` binary. It wires together:
//!
//! 1. **Configuration** ([`AlmanacConfig`]): ephemeris source, observing site, civil time
//!    zone, year range, output directory and search parameters.
//! 2. **Ephemeris access**: the kernel named by the configuration is opened on first use
//!    through a [`OnceCell`] and reused for every year.
//! 3. **Yearly computation**: the Moon phases and both alignment lists of a year,
//!    gathered in a [`YearlyDataset`].
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use moon_almanac::almanac::{Almanac, AlmanacConfig};
//!
//! let almanac = Almanac::new(AlmanacConfig::default()).unwrap();
//! let failed = almanac.run().unwrap();
//! assert!(failed.is_empty());
//! ```
//!
//! ## Errors
//!
//! A year whose computation fails is logged and skipped by [`Almanac::run`]; no file
//! is written for it. A kernel that cannot be opened fails the whole run before any
//! year is computed.
use std::ops::RangeInclusive;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Datelike, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::{
    alignments::{
        collector::AlignmentCollector,
        inspect::{inspect_alignment, InspectionSample},
    },
    almanac_errors::AlmanacError,
    constants::Meter,
    dataset::YearlyDataset,
    jpl_ephem::{download_jpl_file::EphemFileSource, JPLEphem},
    moon_phases::collect_moon_phases,
    observers::Observer,
    positions::{apparent::EphemerisPositions, CelestialBody, PositionProvider},
    search::SearchConfig,
    time::{local_to_epoch, parse_timezone},
};

/// Observing site, as written by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Signed-hemisphere latitude, e.g. `"34.9011 S"`.
    pub latitude: String,
    /// Signed-hemisphere longitude, e.g. `"56.1645 W"`.
    pub longitude: String,
    pub elevation: Meter,
    pub name: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            latitude: "34.9011 S".to_string(),
            longitude: "56.1645 W".to_string(),
            elevation: 43.0,
            name: Some("Montevideo".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlmanacConfig {
    /// Kernel source, `"naif:<VERSION>"` or `"file:<PATH>"`.
    pub ephemeris: String,
    pub site: SiteConfig,
    /// IANA name of the civil time zone used for dates and times.
    pub timezone: String,
    pub years: RangeInclusive<i32>,
    /// Directory receiving the `data_{year}.json` files.
    pub output_dir: Utf8PathBuf,
    pub alignment_search: SearchConfig,
    pub phase_search: SearchConfig,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        AlmanacConfig {
            ephemeris: "naif:DE421".to_string(),
            site: SiteConfig::default(),
            timezone: "America/Montevideo".to_string(),
            years: 2025..=2030,
            output_dir: Utf8PathBuf::from("src"),
            alignment_search: SearchConfig::alignment(),
            phase_search: SearchConfig::moon_phase(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Almanac {
    config: AlmanacConfig,
    jpl_source: EphemFileSource,
    jpl_ephem: OnceCell<JPLEphem>,
    site: Observer,
    tz: Tz,
}

impl Almanac {
    /// Build the almanac from its configuration.
    ///
    /// Coordinates, time zone, kernel source and search parameters are all checked
    /// here. The kernel itself is **not** opened yet; see [`Almanac::get_jpl_ephem`].
    pub fn new(config: AlmanacConfig) -> Result<Self, AlmanacError> {
        let site = Observer::from_hemisphere_strings(
            &config.site.latitude,
            &config.site.longitude,
            config.site.elevation,
            config.site.name.clone(),
        )?;
        let tz = parse_timezone(&config.timezone)?;
        let jpl_source: EphemFileSource = config.ephemeris.as_str().try_into()?;
        config.alignment_search.validate()?;
        config.phase_search.validate()?;

        Ok(Almanac {
            config,
            jpl_source,
            jpl_ephem: OnceCell::new(),
            site,
            tz,
        })
    }

    pub fn config(&self) -> &AlmanacConfig {
        &self.config
    }

    pub fn site(&self) -> &Observer {
        &self.site
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Get the lazily opened ephemeris.
    ///
    /// The first call resolves the [`EphemFileSource`] and reads the kernel; later calls
    /// return the cached handle.
    pub fn get_jpl_ephem(&self) -> Result<&JPLEphem, AlmanacError> {
        self.jpl_ephem
            .get_or_try_init(|| JPLEphem::new(&self.jpl_source))
    }

    /// Compute `year` with any position provider.
    pub fn compute_year_with<P>(
        &self,
        provider: &P,
        year: i32,
    ) -> Result<YearlyDataset, AlmanacError>
    where
        P: PositionProvider + ?Sized,
    {
        info!(year, "computing year");
        let moon_phases =
            collect_moon_phases(provider, year, &self.tz, &self.config.phase_search)?;
        let alignments = AlignmentCollector::new(
            provider,
            &self.site,
            self.tz,
            self.config.alignment_search,
        )
        .collect_year(year)?;

        Ok(YearlyDataset {
            moon_phases,
            alignments,
        })
    }

    /// Compute `year` from the configured ephemeris.
    pub fn compute_year(&self, year: i32) -> Result<YearlyDataset, AlmanacError> {
        let positions = EphemerisPositions::new(self.get_jpl_ephem()?);
        self.compute_year_with(&positions, year)
    }

    /// Compute `year` with `provider` and write its file under `output_dir`.
    pub fn write_year_with<P>(
        &self,
        provider: &P,
        year: i32,
        output_dir: &Utf8Path,
    ) -> Result<Utf8PathBuf, AlmanacError>
    where
        P: PositionProvider + ?Sized,
    {
        self.compute_year_with(provider, year)?.write(output_dir, year)
    }

    /// Compute `year` from the configured ephemeris and write its file.
    pub fn write_year(&self, year: i32) -> Result<Utf8PathBuf, AlmanacError> {
        let positions = EphemerisPositions::new(self.get_jpl_ephem()?);
        self.write_year_with(&positions, year, &self.config.output_dir)
    }

    /// Hourly Moon-`planet` samples around a local civil time, with `provider`.
    pub fn inspect_with<P>(
        &self,
        provider: &P,
        planet: CelestialBody,
        local: &NaiveDateTime,
        half_width_hours: i64,
    ) -> Result<Vec<InspectionSample>, AlmanacError>
    where
        P: PositionProvider + ?Sized,
    {
        let center = local_to_epoch(
            &self.tz,
            local.year(),
            local.month(),
            local.day(),
            local.hour(),
            local.minute(),
        )?;
        info!(%planet, %local, %center, half_width_hours, "inspecting alignment");
        inspect_alignment(provider, &self.site, &center, planet, half_width_hours)
    }

    /// Hourly Moon-`planet` samples around a local civil time, from the configured
    /// ephemeris.
    pub fn inspect(
        &self,
        planet: CelestialBody,
        local: &NaiveDateTime,
        half_width_hours: i64,
    ) -> Result<Vec<InspectionSample>, AlmanacError> {
        let positions = EphemerisPositions::new(self.get_jpl_ephem()?);
        self.inspect_with(&positions, planet, local, half_width_hours)
    }

    /// Write every configured year with `provider`.
    ///
    /// Return
    /// ----------
    /// * The years that failed, in ascending order. Each failure has been logged.
    pub fn run_with<P>(&self, provider: &P) -> Vec<i32>
    where
        P: PositionProvider + ?Sized,
    {
        let mut failed = Vec::new();
        for year in self.config.years.clone() {
            match self.write_year_with(provider, year, &self.config.output_dir) {
                Ok(path) => info!(year, %path, "year done"),
                Err(err) => {
                    error!(year, error = %err, "year failed, no file written");
                    failed.push(year);
                }
            }
        }
        failed
    }

    /// Write every configured year from the configured ephemeris.
    ///
    /// Fails only when the ephemeris cannot be opened; per-year failures are returned.
    pub fn run(&self) -> Result<Vec<i32>, AlmanacError> {
        let positions = EphemerisPositions::new(self.get_jpl_ephem()?);
        Ok(self.run_with(&positions))
    }
}

#[cfg(test)]
mod test_almanac {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlmanacConfig::default();
        assert_eq!(config.years, 2025..=2030);
        assert_eq!(config.output_dir, "src");
        assert_eq!(config.timezone, "America/Montevideo");

        let almanac = Almanac::new(config).unwrap();
        assert_eq!(almanac.site().to_string(), "Montevideo (34.9011 S, 56.1645 W, 43 m)");
        assert_eq!(almanac.timezone().name(), "America/Montevideo");
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad_tz = AlmanacConfig {
            timezone: "Mars/Olympus_Mons".into(),
            ..AlmanacConfig::default()
        };
        assert!(matches!(Almanac::new(bad_tz), Err(AlmanacError::InvalidTimeZone(_))));

        let bad_site = AlmanacConfig {
            site: SiteConfig {
                latitude: "134.9 S".into(),
                ..SiteConfig::default()
            },
            ..AlmanacConfig::default()
        };
        assert!(matches!(Almanac::new(bad_site), Err(AlmanacError::InvalidCoordinate(_))));

        let bad_source = AlmanacConfig {
            ephemeris: "horizons:DE440".into(),
            ..AlmanacConfig::default()
        };
        assert!(matches!(
            Almanac::new(bad_source),
            Err(AlmanacError::InvalidJPLStringFormat(_))
        ));
    }

    #[test]
    fn test_missing_kernel_fails_the_run() {
        let config = AlmanacConfig {
            ephemeris: "file:/nonexistent/moon_almanac/de421.bsp".into(),
            ..AlmanacConfig::default()
        };
        let almanac = Almanac::new(config).unwrap();
        assert!(almanac.run().is_err());
    }
}
