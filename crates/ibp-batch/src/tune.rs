//! Interactive tuning of generated configurations.
//!
//! Each configuration is opened in the executable. When the user closes it,
//! the executable has saved its live settings to a well-known file; the
//! filter settings found there are merged back into the configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use ibp_legacy::LegacyConfig;
use tracing::{info, warn};

use crate::error::BatchError;
use crate::files::discover_configs;
use crate::process::InteractiveRunner;

/// Configurations modified more recently than this count as already tuned.
pub const RECENT_WINDOW: Duration = Duration::from_secs(3 * 60 * 60);

/// Pause after the executable exits so its settings file is complete.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

const TUNE_TARGET: &str = "ibp_batch::tune";

/// Parameters of a tuning session.
#[derive(Debug, Clone)]
pub struct TuneOptions {
    /// Image opened alongside every configuration.
    pub image: PathBuf,
    /// File the executable saves its live settings to.
    pub settings_file: PathBuf,
    /// Skip configurations modified within [`RECENT_WINDOW`].
    pub skip_recent: bool,
    /// Pause between the executable exiting and reading its settings.
    pub settle: Duration,
}

impl TuneOptions {
    /// Creates options with the default settle delay that tune every file.
    #[must_use]
    pub fn new(image: impl Into<PathBuf>, settings_file: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            settings_file: settings_file.into(),
            skip_recent: false,
            settle: SETTLE_DELAY,
        }
    }
}

/// Result of tuning one configuration.
#[derive(Debug, Clone)]
pub enum TuneOutcome {
    /// Live settings were merged; carries the number of keys copied.
    Updated(usize),
    /// The executable left no settings file.
    Unchanged,
    /// The configuration was modified recently and left alone.
    Skipped,
    /// The executable or the merge failed.
    Failed(BatchError),
}

/// Counts of tuning outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TuneSummary {
    /// Configurations updated from live settings.
    pub updated: usize,
    /// Configurations with no settings to merge.
    pub unchanged: usize,
    /// Recently modified configurations left alone.
    pub skipped: usize,
    /// Configurations that failed.
    pub failed: usize,
}

impl fmt::Display for TuneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged, {} skipped, {} failed",
            self.updated, self.unchanged, self.skipped, self.failed
        )
    }
}

/// Replays configurations through an [`InteractiveRunner`].
#[derive(Debug)]
pub struct Tuner<R> {
    runner: R,
    options: TuneOptions,
}

impl<R: InteractiveRunner> Tuner<R> {
    /// Creates a tuner.
    #[must_use]
    pub const fn new(runner: R, options: TuneOptions) -> Self {
        Self { runner, options }
    }

    /// Tunes every `*.ifl` file in `dir`, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::List`] if `dir` cannot be listed. Failures of
    /// individual files are logged and counted.
    pub fn tune_dir(&self, dir: &Path) -> Result<TuneSummary, BatchError> {
        let mut summary = TuneSummary::default();
        for config in discover_configs(dir)? {
            match self.tune_file(&config) {
                TuneOutcome::Updated(_) => summary.updated += 1,
                TuneOutcome::Unchanged => summary.unchanged += 1,
                TuneOutcome::Skipped => summary.skipped += 1,
                TuneOutcome::Failed(error) => {
                    warn!(
                        target: TUNE_TARGET,
                        config = %config.display(),
                        %error,
                        "tuning failed"
                    );
                    summary.failed += 1;
                }
            }
        }
        info!(target: TUNE_TARGET, %summary, "tuning finished");
        Ok(summary)
    }

    /// Tunes one configuration.
    #[must_use]
    pub fn tune_file(&self, config: &Path) -> TuneOutcome {
        if self.options.skip_recent && modified_within(config, RECENT_WINDOW, SystemTime::now()) {
            info!(
                target: TUNE_TARGET,
                config = %config.display(),
                "skipping recently modified configuration"
            );
            return TuneOutcome::Skipped;
        }

        if let Err(error) = self.runner.run_interactive(&self.options.image, config) {
            return TuneOutcome::Failed(error);
        }
        thread::sleep(self.options.settle);

        if !self.options.settings_file.exists() {
            return TuneOutcome::Unchanged;
        }
        match merge_live_settings(config, &self.options.settings_file) {
            Ok(copied) => {
                info!(
                    target: TUNE_TARGET,
                    config = %config.display(),
                    copied,
                    "merged live settings"
                );
                TuneOutcome::Updated(copied)
            }
            Err(error) => TuneOutcome::Failed(error),
        }
    }
}

fn merge_live_settings(config: &Path, settings_file: &Path) -> Result<usize, BatchError> {
    let mut original = LegacyConfig::read(config)?;
    let live = LegacyConfig::read(settings_file)?;
    let copied = original.merge_filter_settings(&live);
    original.write(config)?;
    Ok(copied)
}

/// Returns `true` when `path` was modified less than `window` before `now`.
///
/// Unreadable timestamps count as old; timestamps in the future count as
/// recent.
fn modified_within(path: &Path, window: Duration, now: SystemTime) -> bool {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .is_ok_and(|modified| {
            now.duration_since(modified)
                .ok()
                .is_none_or(|age| age < window)
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use tempfile::TempDir;

    const GENERATED: &str = "[imageFilter1]\nid=ibp.imagefilter.blur\nbypass=false\nradius=3\n\n";
    const LIVE: &str = "[imageFilter1]\nid=ibp.imagefilter.other\nbypass=false\nradius=11\n\n";

    /// Runner double that records invocations and optionally writes settings.
    struct FakeRunner {
        settings: Option<PathBuf>,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeRunner {
        fn new(settings: Option<PathBuf>) -> Self {
            Self {
                settings,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl InteractiveRunner for FakeRunner {
        fn run_interactive(&self, _image: &Path, config: &Path) -> Result<(), BatchError> {
            self.calls.lock().expect("lock").push(config.to_path_buf());
            if let Some(path) = &self.settings {
                fs::write(path, LIVE).map_err(|err| BatchError::write(path, err))?;
            }
            Ok(())
        }
    }

    fn options(dir: &Path) -> TuneOptions {
        TuneOptions {
            settle: Duration::ZERO,
            ..TuneOptions::new(dir.join("female.jpg"), dir.join("settings.ifl"))
        }
    }

    fn write_config(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, GENERATED).expect("write config");
        path
    }

    #[test]
    fn live_settings_are_merged_except_the_id() {
        let dir = TempDir::new().expect("temp dir");
        let config = write_config(dir.path(), "blur.ifl");
        let runner = FakeRunner::new(Some(dir.path().join("settings.ifl")));

        let outcome = Tuner::new(runner, options(dir.path())).tune_file(&config);

        assert!(matches!(outcome, TuneOutcome::Updated(2)), "{outcome:?}");
        let merged = LegacyConfig::read(&config).expect("read");
        assert_eq!(merged.get("imageFilter1", "radius"), Some("11"));
        assert_eq!(merged.get("imageFilter1", "id"), Some("ibp.imagefilter.blur"));
    }

    #[test]
    fn missing_settings_leave_the_config_alone() {
        let dir = TempDir::new().expect("temp dir");
        let config = write_config(dir.path(), "blur.ifl");

        let outcome = Tuner::new(FakeRunner::new(None), options(dir.path())).tune_file(&config);

        assert!(matches!(outcome, TuneOutcome::Unchanged), "{outcome:?}");
        assert_eq!(fs::read_to_string(&config).expect("read"), GENERATED);
    }

    #[test]
    fn recent_configs_are_skipped_when_asked() {
        let dir = TempDir::new().expect("temp dir");
        let config = write_config(dir.path(), "blur.ifl");
        let tuner = Tuner::new(
            FakeRunner::new(None),
            TuneOptions {
                skip_recent: true,
                ..options(dir.path())
            },
        );

        assert!(matches!(tuner.tune_file(&config), TuneOutcome::Skipped));
        assert!(tuner.runner.calls.lock().expect("lock").is_empty());
    }

    #[test]
    fn directories_are_tuned_in_sorted_order() {
        let dir = TempDir::new().expect("temp dir");
        let configs = dir.path().join("plugins");
        fs::create_dir(&configs).expect("dir");
        write_config(&configs, "sharpen.ifl");
        write_config(&configs, "blur.ifl");
        let tuner = Tuner::new(FakeRunner::new(None), options(dir.path()));

        let summary = tuner.tune_dir(&configs).expect("tune");

        assert_eq!(summary.unchanged, 2);
        let calls = tuner.runner.calls.lock().expect("lock").clone();
        assert_eq!(calls, vec![configs.join("blur.ifl"), configs.join("sharpen.ifl")]);
    }

    #[test]
    fn age_is_measured_against_the_window() {
        let dir = TempDir::new().expect("temp dir");
        let config = write_config(dir.path(), "blur.ifl");
        let now = SystemTime::now();

        assert!(modified_within(&config, RECENT_WINDOW, now));
        assert!(!modified_within(&config, RECENT_WINDOW, now + RECENT_WINDOW * 2));
        assert!(!modified_within(&dir.path().join("missing.ifl"), RECENT_WINDOW, now));
    }
}
