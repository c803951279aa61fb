//! Per-plugin aggregation of every source file.
//!
//! Each file contributes independently. A file that cannot be read or
//! understood is logged and contributes nothing; the scan itself never fails.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::constructor::constructor_defaults;
use crate::discovery::PluginSources;
use crate::error::InspectError;
use crate::header::{augment_with_members, header_members};
use crate::inspector::Inspector;
use crate::model::PluginScan;
use crate::ui::layout_hints;

/// Tracing target for plugin scanning.
const SCAN_TARGET: &str = "ibp_inspect::scan";

/// Scans plugin directories with a chosen [`Inspector`].
#[derive(Debug, Clone)]
pub struct PluginScanner<I> {
    inspector: I,
}

impl<I: Inspector> PluginScanner<I> {
    /// Creates a scanner backed by `inspector`.
    pub const fn new(inspector: I) -> Self {
        Self { inspector }
    }

    /// Scans every file of one plugin.
    #[must_use]
    pub fn scan(&self, sources: &PluginSources) -> PluginScan {
        let plugin = sources.short_id();
        let mut scan = PluginScan::default();

        if let Some(text) = read_logged(plugin, &sources.metadata_source()) {
            scan.metadata = degrade(plugin, "metadata", self.inspector.metadata(&text));
        }

        if let Some(text) = read_logged(plugin, &sources.filter_source()) {
            scan.properties = degrade(plugin, "mutators", self.inspector.mutators(&text));
            scan.constructor_defaults =
                degrade(plugin, "constructor", constructor_defaults(&text));
        }

        if let Some(text) = sources.header().and_then(|path| read_logged(plugin, &path)) {
            let members = degrade(plugin, "header", header_members(&text));
            augment_with_members(&mut scan.properties, members);
        }

        if let Some(text) = sources.ui_layout().and_then(|path| read_logged(plugin, &path)) {
            scan.ui_hints = degrade(plugin, "layout", layout_hints(&text));
        }

        debug!(
            target: SCAN_TARGET,
            plugin,
            properties = scan.properties.len(),
            hinted = scan.ui_hints.len(),
            initialised = scan.constructor_defaults.len(),
            "scanned plugin"
        );
        scan
    }
}

fn read_logged(plugin: &str, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(
                target: SCAN_TARGET,
                plugin,
                error = %InspectError::read(path, e),
                "plugin file unavailable"
            );
            None
        }
    }
}

fn degrade<T: Default>(plugin: &str, part: &str, result: Result<T, InspectError>) -> T {
    result.unwrap_or_else(|error| {
        warn!(
            target: SCAN_TARGET,
            plugin,
            part,
            error = %error,
            "inspection failed, continuing without it"
        );
        T::default()
    })
}
