//! Default paths and logging settings.
//!
//! Paths are relative to the working directory, which is expected to be the
//! root of the image batch processor checkout.

use camino::Utf8PathBuf;

use crate::settings::LogFormat;

/// Settings file read when no other is named and it exists.
pub const DEFAULT_CONFIG_FILE: &str = "ibp-plugins.yaml";

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "IBP_CONFIG_PATH";

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Directory holding the `imagefilter_*` plugin sources.
pub const DEFAULT_PLUGINS_DIR: &str = "src/plugins";
/// Documentation root.
pub const DEFAULT_DOCS_DIR: &str = "docs";
/// Sample images fed to every plugin.
pub const DEFAULT_INPUT_IMAGES_DIR: &str = "docs/assets/img_in";
/// Processed images referenced by the documentation.
pub const DEFAULT_OUTPUT_IMAGES_DIR: &str = "docs/assets/img_out";
/// The batch executable.
pub const DEFAULT_EXECUTABLE: &str = "build/build/ibp";
/// Live settings the executable saves on exit.
pub const DEFAULT_SETTINGS_FILE: &str = "build/build/settings/imagebatchprocessor.ifl";
/// Image opened while tuning.
pub const DEFAULT_TUNING_IMAGE: &str = "docs/assets/img_in/female.jpg";

pub(crate) fn path(value: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(value)
}

pub(crate) fn log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

pub(crate) const fn log_format() -> LogFormat {
    LogFormat::Json
}
