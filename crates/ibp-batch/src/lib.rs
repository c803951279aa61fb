//! Batch application of legacy configurations to sample images.
//!
//! A batch is the cartesian product of configurations and sample images.
//! [`BatchOrchestrator`] runs each [`ProcessingTask`] through an
//! [`ImageProcessor`], either in submission order or on a fixed-size
//! `rayon` pool, and always returns a [`BatchSummary`]. The production
//! processor, [`ExternalProcessor`], spawns the batch executable.
//!
//! The crate also renders the Markdown pages that pair inputs with outputs
//! and drives the [`Tuner`], which replays configurations interactively and
//! merges the executable's live settings back.

mod docs;
mod error;
mod files;
mod orchestrator;
mod process;
mod task;
mod tune;

#[cfg(test)]
mod tests;

pub use docs::{INDEX_TITLE, IndexEntry, PluginPage, index_page, write_page};
pub use error::BatchError;
pub use files::{IMAGE_EXTENSIONS, discover_configs, discover_images};
pub use orchestrator::{BatchOptions, BatchOrchestrator, BatchSummary, TaskFailure, TaskOutcome};
pub use process::{ExternalProcessor, ImageProcessor, InteractiveRunner};
pub use task::{ProcessingTask, output_file_name, plan_tasks, plugin_name};
pub use tune::{RECENT_WINDOW, SETTLE_DELAY, TuneOptions, TuneOutcome, TuneSummary, Tuner};
