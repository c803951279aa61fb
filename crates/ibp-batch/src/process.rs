//! Invocation of the external batch executable.
//!
//! [`ExternalProcessor`] implements both execution seams by spawning the
//! executable. Batch runs capture its output and turn a non-zero exit into a
//! [`BatchError::NonZeroExit`] carrying standard error. Tuning runs leave the
//! executable attached to the terminal so the user can interact with it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::BatchError;
use crate::task::ProcessingTask;

/// Tracing target for executable invocations.
const PROCESS_TARGET: &str = "ibp_batch::process";

/// Applies one configuration to one image.
///
/// Test code implements this trait to count or fail invocations without
/// spawning processes.
pub trait ImageProcessor {
    /// Processes `task`, writing its output image.
    ///
    /// # Errors
    ///
    /// Returns a [`BatchError`] if the executable cannot be started or
    /// reports failure.
    fn process(&self, task: &ProcessingTask) -> Result<(), BatchError>;
}

/// Opens a configuration interactively so its settings can be tuned.
pub trait InteractiveRunner {
    /// Runs the executable on `image` with `config` until the user closes it.
    ///
    /// # Errors
    ///
    /// Returns a [`BatchError`] if the executable cannot be started or
    /// reports failure.
    fn run_interactive(&self, image: &Path, config: &Path) -> Result<(), BatchError>;
}

/// Runs the batch executable as a child process.
#[derive(Debug, Clone)]
pub struct ExternalProcessor {
    executable: PathBuf,
}

impl ExternalProcessor {
    /// Creates a processor launching `executable`.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Returns the executable path.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, args: &[&OsStr]) -> Command {
        debug!(
            target: PROCESS_TARGET,
            executable = %self.executable.display(),
            args = ?args,
            "spawning executable"
        );
        let mut command = Command::new(&self.executable);
        command.args(args);
        command
    }

    fn check(&self, status: ExitStatus, stderr: &[u8]) -> Result<(), BatchError> {
        if status.success() {
            return Ok(());
        }
        Err(BatchError::NonZeroExit {
            executable: self.executable.clone(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_owned(),
        })
    }
}

impl ImageProcessor for ExternalProcessor {
    fn process(&self, task: &ProcessingTask) -> Result<(), BatchError> {
        let output = self
            .command(&[
                OsStr::new("-i"),
                task.input.as_os_str(),
                OsStr::new("-o"),
                task.output.as_os_str(),
                OsStr::new("-l"),
                task.config.as_os_str(),
            ])
            .stdin(Stdio::null())
            .output()
            .map_err(|err| BatchError::spawn(&self.executable, err))?;
        self.check(output.status, &output.stderr)
    }
}

impl InteractiveRunner for ExternalProcessor {
    fn run_interactive(&self, image: &Path, config: &Path) -> Result<(), BatchError> {
        let status = self
            .command(&[
                OsStr::new("-i"),
                image.as_os_str(),
                OsStr::new("-l"),
                config.as_os_str(),
            ])
            .status()
            .map_err(|err| BatchError::spawn(&self.executable, err))?;
        self.check(status, &[])
    }
}
