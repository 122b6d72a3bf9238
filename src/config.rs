use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

pub const API_BASE_URL: &str = "https://haveibeenpwned.com";

pub const API_KEY_HEADER: &str = "hibp-api-key";

pub const USER_AGENT: &str = concat!("breach-finder/", env!("CARGO_PKG_VERSION"));

/// Folder created under the working directory when `--outfolder` is omitted.
pub const DEFAULT_OUTFOLDER: &str = "hipd";

/// Pause before each subject, keeps a batch under the upstream request rate.
pub const SUBJECT_DELAY: Duration = Duration::from_millis(1600);

/// Unit of the fallback wait used when a 429 carries no usable hint.
pub const FALLBACK_STEP: Duration = Duration::from_secs(5);

/// Attempt number at which the fallback wait stops growing.
pub const FALLBACK_PLATEAU: u32 = 7;

/// Pick the output folder, defaulting to `<cwd>/hipd`.
///
/// Returns the folder and whether the default was used.
pub fn resolve_outfolder(requested: Option<&Path>) -> anyhow::Result<(PathBuf, bool)> {
    match requested {
        Some(path) => Ok((path.to_path_buf(), false)),
        None => Ok((std::env::current_dir()?.join(DEFAULT_OUTFOLDER), true)),
    }
}

pub fn ensure_outfolder(path: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(path).map_err(|source| AppError::OutputFolder {
        path: path.to_path_buf(),
        source,
    })
}
