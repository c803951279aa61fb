//! Errors that end a command.

use std::io;

use ibp_batch::BatchError;
use ibp_config::ConfigError;
use ibp_descriptor::DescriptorError;
use ibp_inspect::InspectError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("failed to write command output: {0}")]
    Output(#[from] io::Error),
}
