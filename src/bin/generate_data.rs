//! Write `src/data_{year}.json` for the years 2025 to 2030.
//!
//! The log level follows `RUST_LOG` and defaults to `info`.
use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use moon_almanac::almanac::{Almanac, AlmanacConfig};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")?;

    let config = AlmanacConfig::default();
    info!(
        ephemeris = %config.ephemeris,
        years = ?config.years,
        output_dir = %config.output_dir,
        "generating almanac data"
    );

    let almanac = Almanac::new(config).context("invalid almanac configuration")?;
    info!(site = %almanac.site(), timezone = %almanac.timezone(), "observing site");

    let failed = almanac.run().context("unable to open the ephemeris")?;
    if !failed.is_empty() {
        bail!("data generation failed for years {failed:?}");
    }

    info!("all years written");
    Ok(())
}
