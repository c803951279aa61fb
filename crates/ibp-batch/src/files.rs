//! Discovery of sample images and configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use ibp_legacy::CONFIG_EXTENSION;

use crate::error::BatchError;

/// Image extensions the executable reads, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Lists the sample images directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`BatchError::List`] if `dir` cannot be read.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    list_files(dir, |ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Lists the legacy configurations directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`BatchError::List`] if `dir` cannot be read.
pub fn discover_configs(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    list_files(dir, |ext| ext == CONFIG_EXTENSION)
}

fn list_files(dir: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, BatchError> {
    let entries = fs::read_dir(dir).map_err(|err| BatchError::list(dir, err))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(&accept)
        })
        .collect();
    files.sort();
    Ok(files)
}
