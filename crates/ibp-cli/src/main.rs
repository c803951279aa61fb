//! Entry point for the `ibp-plugins` binary.
//!
//! All work happens in [`ibp_cli::run`]. Standard error is passed unlocked
//! because batch workers log to it while the command runs.

use std::io::{self, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr = io::stderr();
    ibp_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
