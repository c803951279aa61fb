//! Command line front end for the image filter plugin toolchain.
//!
//! [`run`] parses arguments, loads [`ibp_config::Settings`], installs
//! telemetry and dispatches to one command. Commands report per-plugin and
//! per-task failures through logs and their summaries; the exit status is
//! only non-zero when the command line is invalid, configuration cannot be
//! loaded, or a command has nothing to work on.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use clap::Parser;
use ibp_config::Settings;

mod cli;
mod commands;
mod errors;
mod telemetry;

use cli::Cli;
use errors::AppError;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            return match write!(stdout, "{error}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            };
        }
        Err(error) => return report(&AppError::CliUsage(error), stderr),
    };

    match dispatch(cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&error, stderr),
    }
}

fn dispatch<W: Write>(cli: Cli, stdout: &mut W) -> Result<(), AppError> {
    let settings = Settings::discover(&cli.settings_layer(), Utf8Path::new("."))?;
    telemetry::initialise(&settings)?;
    commands::execute(cli.command, &settings, stdout)
}

fn report<E: Write>(error: &AppError, stderr: &mut E) -> ExitCode {
    if let Err(write_error) = writeln!(stderr, "{error}") {
        tracing::error!(%error, %write_error, "failed to report error");
    }
    ExitCode::FAILURE
}
