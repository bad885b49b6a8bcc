//! Resolution of the planetary kernel used by the almanac.
//!
//! A source is described by a short string:
//!
//! * `"naif:DE421"`: a NAIF distributed kernel, looked up in the user cache directory
//!   (`<cache>/moon_almanac_cache/jpl_ephem/de421.bsp`) and downloaded there when the
//!   `jpl-download` feature is enabled;
//! * `"file:/path/to/de421.bsp"`: an explicit kernel on disk.
use std::{fmt, fs, str::FromStr};

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use tracing::debug;

use crate::almanac_errors::AlmanacError;

use super::naif::naif_version::NaifVersion;

const NAIF_KERNEL_URL: &str = "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets";

#[derive(Debug, Clone, PartialEq)]
pub enum EphemFileSource {
    Naif(NaifVersion),
    File(Utf8PathBuf),
}

impl FromStr for EphemFileSource {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AlmanacError::InvalidJPLStringFormat(format!(
                "{s} (expected \"naif:<VERSION>\" or \"file:<PATH>\")"
            ))
        };

        let (kind, value) = s.split_once(':').ok_or_else(invalid)?;
        match kind {
            "naif" => Ok(EphemFileSource::Naif(value.parse()?)),
            "file" if !value.is_empty() => Ok(EphemFileSource::File(Utf8PathBuf::from(value))),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<&str> for EphemFileSource {
    type Error = AlmanacError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for EphemFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemFileSource::Naif(version) => write!(f, "naif:{version}"),
            EphemFileSource::File(path) => write!(f, "file:{path}"),
        }
    }
}

/// Directory holding the cached NAIF kernels.
fn cache_dir() -> Result<Utf8PathBuf, AlmanacError> {
    let base_dir = BaseDirs::new().ok_or_else(|| {
        AlmanacError::UnableToCreateBaseDir("no home directory for this user".to_string())
    })?;
    let cache = Utf8Path::from_path(base_dir.cache_dir()).ok_or_else(|| {
        AlmanacError::Utf8PathError(format!("{}", base_dir.cache_dir().display()))
    })?;
    Ok(cache.join("moon_almanac_cache").join("jpl_ephem"))
}

impl EphemFileSource {
    /// Location the kernel is expected at, without touching the filesystem.
    pub fn local_path(&self) -> Result<Utf8PathBuf, AlmanacError> {
        match self {
            EphemFileSource::File(path) => Ok(path.clone()),
            EphemFileSource::Naif(version) => Ok(cache_dir()?.join(version.get_filename())),
        }
    }

    /// Return the path of an existing kernel, downloading it first if needed and allowed.
    pub fn get_ephemeris_file(&self) -> Result<Utf8PathBuf, AlmanacError> {
        let path = self.local_path()?;
        if path.exists() {
            debug!(%path, "using ephemeris file");
            return Ok(path);
        }

        match self {
            EphemFileSource::File(_) => Err(AlmanacError::JPLFileNotFound(path.to_string())),
            EphemFileSource::Naif(version) => fetch_naif_kernel(*version, &path),
        }
    }
}

#[cfg(feature = "jpl-download")]
fn fetch_naif_kernel(version: NaifVersion, path: &Utf8Path) -> Result<Utf8PathBuf, AlmanacError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AlmanacError::UnableToCreateBaseDir(format!("{parent}: {e}")))?;
    }

    let url = format!("{NAIF_KERNEL_URL}/{}", version.get_filename());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(download::download_big_file(&url, path))?;
    Ok(path.to_path_buf())
}

#[cfg(not(feature = "jpl-download"))]
fn fetch_naif_kernel(version: NaifVersion, path: &Utf8Path) -> Result<Utf8PathBuf, AlmanacError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AlmanacError::UnableToCreateBaseDir(format!("{parent}: {e}")))?;
    }
    Err(AlmanacError::JPLFileNotFound(format!(
        "{path} (download it from {NAIF_KERNEL_URL}/{} or enable the jpl-download feature)",
        version.get_filename()
    )))
}

#[cfg(feature = "jpl-download")]
mod download {
    use camino::Utf8Path;
    use tokio::{fs::File, io::AsyncWriteExt};
    use tokio_stream::StreamExt;
    use tracing::info;

    use crate::almanac_errors::AlmanacError;

    /// Stream `url` into `path`. The body goes to a `.part` file renamed once complete.
    pub(super) async fn download_big_file(url: &str, path: &Utf8Path) -> Result<(), AlmanacError> {
        let partial = path.with_extension("part");
        info!(%url, "downloading ephemeris file");

        let mut file = File::create(&partial).await?;
        let mut stream = reqwest::get(url).await?.error_for_status()?.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&partial, path).await?;
        info!(%path, "ephemeris file downloaded");
        Ok(())
    }
}
