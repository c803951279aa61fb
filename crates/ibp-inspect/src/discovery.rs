//! Plugin directory discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InspectError;

/// Directory name prefix shared by every filter plugin.
pub const PLUGIN_DIR_PREFIX: &str = "imagefilter_";
/// Filter implementation holding the mutators.
pub const FILTER_SOURCE: &str = "filter.cpp";
/// Plugin entry point holding the metadata map.
pub const METADATA_SOURCE: &str = "main.cpp";
/// Optional companion header.
pub const FILTER_HEADER: &str = "filter.h";
/// Optional Qt Designer layout.
pub const UI_LAYOUT: &str = "filterwidget.ui";

/// The files that make up one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSources {
    dir: PathBuf,
    short_id: String,
}

impl PluginSources {
    /// Recognizes `dir` as a plugin directory.
    ///
    /// Returns `None` unless the directory name starts with `imagefilter_`
    /// and both `filter.cpp` and `main.cpp` are regular files.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let name = dir.file_name()?.to_str()?;
        let short_id = name.strip_prefix(PLUGIN_DIR_PREFIX)?;
        if short_id.is_empty() {
            return None;
        }
        let complete = dir.join(FILTER_SOURCE).is_file() && dir.join(METADATA_SOURCE).is_file();
        complete.then(|| Self {
            dir: dir.to_path_buf(),
            short_id: short_id.to_owned(),
        })
    }

    /// Returns the plugin directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the directory name without the `imagefilter_` prefix.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    /// Returns the directory name, prefix included.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{PLUGIN_DIR_PREFIX}{}", self.short_id)
    }

    /// Path of `filter.cpp`.
    #[must_use]
    pub fn filter_source(&self) -> PathBuf {
        self.dir.join(FILTER_SOURCE)
    }

    /// Path of `main.cpp`.
    #[must_use]
    pub fn metadata_source(&self) -> PathBuf {
        self.dir.join(METADATA_SOURCE)
    }

    /// Path of `filter.h`, when present.
    #[must_use]
    pub fn header(&self) -> Option<PathBuf> {
        Some(self.dir.join(FILTER_HEADER)).filter(|path| path.is_file())
    }

    /// Path of `filterwidget.ui`, when present.
    #[must_use]
    pub fn ui_layout(&self) -> Option<PathBuf> {
        Some(self.dir.join(UI_LAYOUT)).filter(|path| path.is_file())
    }
}

/// Lists the plugin directories directly under `root`, sorted by name.
///
/// # Errors
///
/// Returns [`InspectError::Read`] if `root` cannot be listed.
pub fn discover_plugins(root: &Path) -> Result<Vec<PluginSources>, InspectError> {
    let entries = fs::read_dir(root).map_err(|e| InspectError::read(root, e))?;
    let mut plugins: Vec<PluginSources> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| PluginSources::from_dir(&path))
        .collect();
    plugins.sort_by(|a, b| a.short_id.cmp(&b.short_id));
    Ok(plugins)
}
