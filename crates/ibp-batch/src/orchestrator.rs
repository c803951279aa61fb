//! Sequential and pooled execution of processing tasks.

use std::fmt;
use std::num::NonZeroUsize;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::BatchError;
use crate::process::ImageProcessor;
use crate::task::ProcessingTask;

/// Tracing target for batch orchestration.
const BATCH_TARGET: &str = "ibp_batch::orchestrator";

/// How a batch is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Reprocess tasks whose output already exists.
    pub force: bool,
    /// Run tasks on a worker pool instead of in submission order.
    pub parallel: bool,
    /// Pool size; `None` uses the available parallelism.
    pub workers: Option<NonZeroUsize>,
}

/// Result of one task.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// The executable produced the output.
    Processed,
    /// The output already existed and was kept.
    Skipped,
    /// The executable could not produce the output.
    Failed(BatchError),
}

/// A task that failed, with its error.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    /// The failed task.
    pub task: ProcessingTask,
    /// Why it failed.
    pub error: BatchError,
}

/// Counts of task outcomes for one batch.
///
/// Skipped tasks count as successes.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Tasks the executable ran for.
    pub processed: usize,
    /// Tasks whose output already existed.
    pub skipped: usize,
    /// Tasks that failed.
    pub failed: usize,
    /// Details of every failure, in task order.
    pub failures: Vec<TaskFailure>,
}

impl BatchSummary {
    /// Returns the number of tasks in the batch.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Returns the number of tasks that ended with an output image.
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.processed + self.skipped
    }

    /// Returns `true` when no task failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, task: &ProcessingTask, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Processed => self.processed += 1,
            TaskOutcome::Skipped => self.skipped += 1,
            TaskOutcome::Failed(error) => {
                self.failed += 1;
                self.failures.push(TaskFailure {
                    task: task.clone(),
                    error,
                });
            }
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} succeeded ({} processed, {} skipped, {} failed)",
            self.succeeded(),
            self.total(),
            self.processed,
            self.skipped,
            self.failed
        )
    }
}

/// Runs processing tasks through an [`ImageProcessor`].
///
/// Individual failures are recorded and never abort the batch.
#[derive(Debug)]
pub struct BatchOrchestrator<P> {
    processor: P,
    options: BatchOptions,
}

impl<P> BatchOrchestrator<P> {
    /// Creates an orchestrator.
    #[must_use]
    pub const fn new(processor: P, options: BatchOptions) -> Self {
        Self { processor, options }
    }

    /// Returns the processor.
    #[must_use]
    pub const fn processor(&self) -> &P {
        &self.processor
    }
}

impl<P: ImageProcessor + Sync> BatchOrchestrator<P> {
    /// Runs every task and summarises the outcomes.
    ///
    /// Sequential runs process tasks in the order given. Parallel runs use a
    /// pool of [`BatchOptions::workers`] threads; if the pool cannot be
    /// built the batch runs sequentially instead.
    #[must_use]
    pub fn run(&self, tasks: &[ProcessingTask]) -> BatchSummary {
        info!(
            target: BATCH_TARGET,
            tasks = tasks.len(),
            parallel = self.options.parallel,
            force = self.options.force,
            "starting batch"
        );

        let outcomes = if self.options.parallel {
            self.run_pooled(tasks)
        } else {
            self.run_sequential(tasks)
        };

        let mut summary = BatchSummary::default();
        for (task, outcome) in tasks.iter().zip(outcomes) {
            summary.record(task, outcome);
        }
        info!(target: BATCH_TARGET, %summary, "batch finished");
        summary
    }

    fn run_sequential(&self, tasks: &[ProcessingTask]) -> Vec<TaskOutcome> {
        tasks.iter().map(|task| self.execute(task)).collect()
    }

    fn run_pooled(&self, tasks: &[ProcessingTask]) -> Vec<TaskOutcome> {
        let threads = self.options.workers.map_or(0, NonZeroUsize::get);
        match ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| tasks.par_iter().map(|task| self.execute(task)).collect()),
            Err(error) => {
                warn!(
                    target: BATCH_TARGET,
                    %error,
                    "worker pool unavailable, running sequentially"
                );
                self.run_sequential(tasks)
            }
        }
    }

    fn execute(&self, task: &ProcessingTask) -> TaskOutcome {
        if !self.options.force && task.output.exists() {
            debug!(
                target: BATCH_TARGET,
                output = %task.output.display(),
                "skipping existing output"
            );
            return TaskOutcome::Skipped;
        }

        match self.processor.process(task) {
            Ok(()) => {
                debug!(
                    target: BATCH_TARGET,
                    plugin = %task.plugin,
                    input = %task.input.display(),
                    output = %task.output.display(),
                    "processed image"
                );
                TaskOutcome::Processed
            }
            Err(error) => {
                warn!(
                    target: BATCH_TARGET,
                    plugin = %task.plugin,
                    input = %task.input.display(),
                    %error,
                    "task failed"
                );
                TaskOutcome::Failed(error)
            }
        }
    }
}
