//! Hour-by-hour Moon-planet longitudes and separations around a local time, seen from
//! the Earth's centre and from the site, with the Sun altitude at the site.
//!
//! ```text
//! inspect_alignment --planet jupiter --local "2026-01-31 00:18" --hours 5
//! ```
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use moon_almanac::{
    alignments::inspect::INSPECTION_HALF_WIDTH_HOURS,
    almanac::{Almanac, AlmanacConfig},
    positions::CelestialBody,
    time::format_local,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl From<Planet> for CelestialBody {
    fn from(planet: Planet) -> Self {
        match planet {
            Planet::Mercury => CelestialBody::Mercury,
            Planet::Venus => CelestialBody::Venus,
            Planet::Mars => CelestialBody::Mars,
            Planet::Jupiter => CelestialBody::Jupiter,
            Planet::Saturn => CelestialBody::Saturn,
        }
    }
}

#[derive(Parser)]
#[command(name = "inspect_alignment", about = "Hourly Moon-planet geometry around a local time")]
struct Cli {
    /// Planet paired with the Moon
    #[arg(long, value_enum, default_value = "jupiter")]
    planet: Planet,
    /// Local civil time at the site (YYYY-MM-DD HH:MM)
    #[arg(long, default_value = "2026-01-31 00:18")]
    local: String,
    /// Hours scanned on each side of the local time
    #[arg(long, default_value_t = INSPECTION_HALF_WIDTH_HOURS)]
    hours: i64,
    /// Kernel source, "naif:<VERSION>" or "file:<PATH>"
    #[arg(long, default_value = "naif:DE421")]
    ephemeris: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")?;

    let cli = Cli::parse();
    let local = NaiveDateTime::parse_from_str(&cli.local, "%Y-%m-%d %H:%M")
        .with_context(|| format!("invalid local time {:?}, expected YYYY-MM-DD HH:MM", cli.local))?;

    let config = AlmanacConfig {
        ephemeris: cli.ephemeris,
        ..AlmanacConfig::default()
    };
    let almanac = Almanac::new(config).context("invalid almanac configuration")?;
    info!(site = %almanac.site(), timezone = %almanac.timezone(), "observing site");

    let samples = almanac
        .inspect(cli.planet.into(), &local, cli.hours)
        .context("inspection failed")?;

    for sample in &samples {
        let (date, time) = format_local(&sample.epoch, almanac.timezone())?;
        info!(
            local = %format!("{date} {time}"),
            offset_h = sample.offset_hours,
            frame = sample.frame,
            moon_lon = %format!("{:.4}", sample.moon_longitude),
            planet_lon = %format!("{:.4}", sample.planet_longitude),
            diff = %format!("{:.4}", sample.longitude_diff),
            sep = %format!("{:.4}", sample.separation),
            sun_alt = %format!("{:.4}", sample.sun_altitude),
            night = sample.night,
            "sample"
        );
    }
    Ok(())
}
