//! Command implementations.
//!
//! Commands report failures of individual plugins, pages and tasks through
//! tracing and carry on. Only failures that leave nothing to work on, such as
//! an unreadable plugin root, end the command with an [`AppError`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ibp_batch::{
    BatchError, BatchOptions, BatchOrchestrator, ExternalProcessor, IndexEntry, PluginPage,
    TuneOptions, Tuner, discover_configs, discover_images, index_page, plan_tasks, write_page,
};
use ibp_config::Settings;
use ibp_descriptor::{
    DESCRIPTOR_FILE, DescriptorBuilder, PluginDescriptor, discover_descriptors, read_descriptor,
    write_descriptor,
};
use ibp_inspect::{PluginScanner, PluginSources, StandardInspector, discover_plugins};
use ibp_legacy::{DirectGenerator, SIMPLE_CONFIG_FILE, ValueSource, from_descriptor};
use tracing::{info, warn};

use crate::cli::Command;
use crate::errors::AppError;

const COMMAND_TARGET: &str = "ibp_cli::commands";

/// Runs `command` against `settings`, writing its report to `stdout`.
pub(crate) fn execute<W: Write>(
    command: Command,
    settings: &Settings,
    stdout: &mut W,
) -> Result<(), AppError> {
    match command {
        Command::Scan => scan(settings, stdout),
        Command::Docs { write_configs } => docs(settings, write_configs, stdout),
        Command::Apply { parallel, force, .. } => apply(
            settings,
            BatchOptions {
                force,
                parallel,
                workers: settings.workers,
            },
            stdout,
        ),
        Command::Simple => simple(settings, stdout),
        Command::Tune {
            image,
            dir,
            skip_recent,
        } => {
            let options = TuneOptions {
                skip_recent,
                ..TuneOptions::new(
                    image.unwrap_or_else(|| settings.tuning_image.clone()),
                    settings.settings_file.clone(),
                )
            };
            let configs = dir.unwrap_or_else(|| settings.docs_plugins_dir());
            tune(settings, options, configs.as_std_path(), stdout)
        }
    }
}

type ScannedPlugins = (PluginScanner<StandardInspector>, Vec<PluginSources>);

fn scanned_plugins(settings: &Settings) -> Result<ScannedPlugins, AppError> {
    let scanner = PluginScanner::new(StandardInspector::standard()?);
    let plugins = discover_plugins(settings.plugins_dir.as_std_path())?;
    info!(
        target: COMMAND_TARGET,
        root = %settings.plugins_dir,
        plugins = plugins.len(),
        "discovered plugins"
    );
    Ok((scanner, plugins))
}

fn scan<W: Write>(settings: &Settings, stdout: &mut W) -> Result<(), AppError> {
    let (scanner, plugins) = scanned_plugins(settings)?;
    let overrides = settings.override_table();
    let builder = DescriptorBuilder::new(&overrides, &settings.examples);

    for sources in &plugins {
        let descriptor = builder.build(sources.short_id(), &scanner.scan(sources));
        let path = sources.dir().join(DESCRIPTOR_FILE);
        match write_descriptor(&path, &descriptor) {
            Ok(()) => writeln!(stdout, "{}", path.display())?,
            Err(error) => warn!(
                target: COMMAND_TARGET,
                plugin = sources.short_id(),
                %error,
                "descriptor not written"
            ),
        }
    }
    Ok(())
}

fn simple<W: Write>(settings: &Settings, stdout: &mut W) -> Result<(), AppError> {
    let (scanner, plugins) = scanned_plugins(settings)?;
    let overrides = settings.override_table();
    let generator = DirectGenerator::new(&overrides);

    for sources in &plugins {
        let config =
            generator.generate(&sources.dir_name(), sources.short_id(), &scanner.scan(sources));
        let path = sources.dir().join(SIMPLE_CONFIG_FILE);
        match config.write(&path) {
            Ok(()) => writeln!(stdout, "{}", path.display())?,
            Err(error) => warn!(
                target: COMMAND_TARGET,
                plugin = sources.short_id(),
                %error,
                "configuration not written"
            ),
        }
    }
    Ok(())
}

fn load_descriptors(settings: &Settings) -> Result<Vec<PluginDescriptor>, AppError> {
    let paths = discover_descriptors(settings.plugins_dir.as_std_path())?;
    Ok(paths
        .iter()
        .filter_map(|path| {
            read_descriptor(path)
                .inspect_err(|error| {
                    warn!(target: COMMAND_TARGET, %error, "skipping invalid descriptor");
                })
                .ok()
        })
        .collect())
}

/// Sample images, or none when the directory cannot be listed.
fn sample_images(settings: &Settings) -> Vec<PathBuf> {
    discover_images(settings.input_images_dir.as_std_path()).unwrap_or_else(|error| {
        warn!(target: COMMAND_TARGET, %error, "no sample images available");
        Vec::new()
    })
}

fn docs<W: Write>(
    settings: &Settings,
    write_configs: bool,
    stdout: &mut W,
) -> Result<(), AppError> {
    let descriptors = load_descriptors(settings)?;
    let images = sample_images(settings);
    let plugins_dir = settings.docs_plugins_dir();
    fs::create_dir_all(&plugins_dir)
        .map_err(|e| BatchError::write(plugins_dir.as_std_path(), e))?;

    let mut entries = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let short_id = descriptor.short_id();
        let Some(config) = plugin_config(settings, descriptor, write_configs) else {
            continue;
        };
        let page = PluginPage {
            short_id,
            description: &descriptor.description,
            images: &images,
            config: config.trim_end(),
        };
        let page_path = settings.page_path(short_id);
        match write_page(page_path.as_std_path(), &page.render()) {
            Ok(()) => writeln!(stdout, "{page_path}")?,
            Err(error) => {
                warn!(target: COMMAND_TARGET, plugin = short_id, %error, "page not written");
                continue;
            }
        }
        entries.push(IndexEntry {
            short_id: short_id.to_owned(),
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
        });
    }

    let index_path = settings.index_path();
    match write_page(index_path.as_std_path(), &index_page(&entries)) {
        Ok(()) => writeln!(stdout, "{index_path}")?,
        Err(error) => warn!(target: COMMAND_TARGET, %error, "index not written"),
    }
    Ok(())
}

/// Returns the configuration text shown on a plugin page.
///
/// The configuration is regenerated when asked or when none exists yet;
/// otherwise the file on disk, possibly hand tuned, is shown verbatim.
fn plugin_config(
    settings: &Settings,
    descriptor: &PluginDescriptor,
    regenerate: bool,
) -> Option<String> {
    let short_id = descriptor.short_id();
    let path = settings.config_path(short_id);
    if !regenerate && path.is_file() {
        return fs::read_to_string(&path)
            .inspect_err(|error| {
                warn!(
                    target: COMMAND_TARGET,
                    plugin = short_id,
                    %error,
                    "configuration unreadable"
                );
            })
            .ok();
    }

    let config = from_descriptor(descriptor, ValueSource::Example);
    if let Err(error) = config.write(path.as_std_path()) {
        warn!(target: COMMAND_TARGET, plugin = short_id, %error, "configuration not written");
        return None;
    }
    Some(config.render())
}

fn apply<W: Write>(
    settings: &Settings,
    options: BatchOptions,
    stdout: &mut W,
) -> Result<(), AppError> {
    let configs = discover_configs(settings.docs_plugins_dir().as_std_path())?;
    let images = sample_images(settings);
    let output_dir = settings.output_images_dir.as_std_path();
    fs::create_dir_all(output_dir).map_err(|e| BatchError::write(output_dir, e))?;

    let tasks = plan_tasks(&configs, &images, output_dir);
    let orchestrator = BatchOrchestrator::new(
        ExternalProcessor::new(settings.executable.as_std_path()),
        options,
    );
    let summary = orchestrator.run(&tasks);

    writeln!(stdout, "{summary}")?;
    for failure in &summary.failures {
        writeln!(
            stdout,
            "failed: {} on {}: {}",
            failure.task.plugin,
            failure.task.input.display(),
            failure.error
        )?;
    }
    Ok(())
}

fn tune<W: Write>(
    settings: &Settings,
    options: TuneOptions,
    dir: &Path,
    stdout: &mut W,
) -> Result<(), AppError> {
    let tuner = Tuner::new(ExternalProcessor::new(settings.executable.as_std_path()), options);
    let summary = tuner.tune_dir(dir)?;
    writeln!(stdout, "{summary}")?;
    Ok(())
}
