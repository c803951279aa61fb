//! Work items pairing one image with one configuration.

use std::path::{Path, PathBuf};

/// Directory prefix identifying plugin source directories.
const PLUGIN_DIR_PREFIX: &str = "imagefilter_";

/// One invocation of the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingTask {
    /// Image read by the executable.
    pub input: PathBuf,
    /// Image written by the executable.
    pub output: PathBuf,
    /// Legacy configuration applied.
    pub config: PathBuf,
    /// Short id of the plugin the configuration drives.
    pub plugin: String,
}

impl ProcessingTask {
    /// Creates the task applying `config` for `plugin` to `input`.
    #[must_use]
    pub fn new(input: &Path, output_dir: &Path, config: &Path, plugin: &str) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output_dir.join(output_file_name(input, plugin)),
            config: config.to_path_buf(),
            plugin: plugin.to_owned(),
        }
    }
}

/// Names the output of applying `plugin` to `image`.
///
/// The result is `<stem>_<plugin><extension>` with the extension lower-cased,
/// so `Female.JPG` with `blur` becomes `Female_blur.jpg`.
#[must_use]
pub fn output_file_name(image: &Path, plugin: &str) -> String {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let extension = image
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    format!("{stem}_{plugin}{extension}")
}

/// Derives the plugin short id a configuration belongs to.
///
/// `imagefilter_blur/example.ifl` belongs to `blur`; any other file is named
/// after its stem, so `docs/plugins/blur.ifl` also belongs to `blur`.
#[must_use]
pub fn plugin_name(config: &Path) -> String {
    let parent = config
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy());
    match parent
        .as_deref()
        .and_then(|name| name.strip_prefix(PLUGIN_DIR_PREFIX))
    {
        Some(short) => short.to_owned(),
        None => config
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Plans one task per configuration and image.
///
/// Configurations form the outer loop and images the inner one, which is
/// the order sequential runs submit tasks in.
#[must_use]
pub fn plan_tasks(
    configs: &[PathBuf],
    images: &[PathBuf],
    output_dir: &Path,
) -> Vec<ProcessingTask> {
    configs
        .iter()
        .flat_map(|config| {
            let plugin = plugin_name(config);
            images
                .iter()
                .map(move |image| ProcessingTask::new(image, output_dir, config, &plugin))
        })
        .collect()
}
