//! Command line argument definitions.

use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ibp_config::{CliLayer, LogFormat};

/// Metadata toolchain for image filter plugins.
#[derive(Parser, Debug)]
#[command(name = "ibp-plugins", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Settings file; defaults to `IBP_CONFIG_PATH`, then to
    /// `ibp-plugins.yaml` when present.
    #[arg(long, value_name = "PATH", global = true)]
    pub(crate) config_path: Option<Utf8PathBuf>,
    /// Tracing filter expression, for example `ibp_batch=debug`.
    #[arg(long, value_name = "FILTER", global = true)]
    pub(crate) log_filter: Option<String>,
    /// Log output format (`json` or `compact`).
    #[arg(long, value_name = "FORMAT", global = true)]
    pub(crate) log_format: Option<LogFormat>,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// The settings given as flags, which win over the file and environment.
    pub(crate) fn settings_layer(&self) -> CliLayer {
        let workers = if let Command::Apply { workers, .. } = &self.command {
            *workers
        } else {
            None
        };
        CliLayer {
            config_path: self.config_path.clone(),
            log_filter: self.log_filter.clone(),
            log_format: self.log_format,
            workers,
        }
    }
}

/// Toolchain commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Inspects every plugin and writes its `filter.yaml` descriptor.
    Scan,
    /// Renders configurations and documentation pages from descriptors.
    Docs {
        /// Regenerates configurations that already exist.
        #[arg(long)]
        write_configs: bool,
    },
    /// Applies every configuration to every sample image.
    Apply {
        /// Runs tasks on a worker pool.
        #[arg(long)]
        parallel: bool,
        /// Reprocesses images whose output already exists.
        #[arg(long)]
        force: bool,
        /// Worker pool size.
        #[arg(long, value_name = "N")]
        workers: Option<NonZeroUsize>,
    },
    /// Writes `example.ifl` into each plugin directory straight from sources.
    Simple,
    /// Opens each configuration interactively and keeps the saved settings.
    Tune {
        /// Image opened alongside each configuration.
        #[arg(long, value_name = "PATH")]
        image: Option<Utf8PathBuf>,
        /// Directory of configurations to tune.
        #[arg(long, value_name = "PATH")]
        dir: Option<Utf8PathBuf>,
        /// Skips configurations modified in the last few hours.
        #[arg(long)]
        skip_recent: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ibp-plugins").chain(args.iter().copied()))
    }

    #[rstest]
    #[case(&["scan"], Command::Scan)]
    #[case(&["simple"], Command::Simple)]
    #[case(&["docs", "--write-configs"], Command::Docs { write_configs: true })]
    #[case(
        &["apply", "--parallel", "--workers", "4"],
        Command::Apply { parallel: true, force: false, workers: NonZeroUsize::new(4) }
    )]
    #[case(
        &["tune", "--dir", "docs/plugins", "--skip-recent"],
        Command::Tune { image: None, dir: Some(Utf8PathBuf::from("docs/plugins")), skip_recent: true }
    )]
    fn subcommands_parse(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(parse(args).expect("parse").command, expected);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&["scan", "--log-format", "compact", "--config-path", "alt.yaml"])
            .expect("parse");
        assert_eq!(cli.log_format, Some(LogFormat::Compact));
        assert_eq!(cli.config_path, Some(Utf8PathBuf::from("alt.yaml")));
    }

    #[test]
    fn apply_workers_join_the_settings_layer() {
        let cli = parse(&["--log-filter", "debug", "apply", "--workers", "3"]).expect("parse");

        let layer = cli.settings_layer();

        assert_eq!(layer.workers, NonZeroUsize::new(3));
        assert_eq!(layer.log_filter.as_deref(), Some("debug"));
        assert_eq!(layer.config_path, None);
    }

    #[rstest]
    #[case(&[])]
    #[case(&["publish"])]
    #[case(&["apply", "--workers", "0"])]
    #[case(&["scan", "--log-format", "pretty"])]
    fn invalid_invocations_are_rejected(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
