//! Generate command implementation
//!
//! The generation process:
//! 1. Resolve configuration (command line over optional config file)
//! 2. Open a staging transaction (in the output directory, or a temporary one with `--check`)
//! 3. Walk the resource root in file-name order
//! 4. Per file: read, derive identifier, record it in the manifest, emit and stage its unit
//! 5. Emit and stage the `ResourcesDB` aggregator
//! 6. Commit the transaction, replacing the previous generated set (or, with
//!    `--check`, compare against the output directory)
//!
//! Any error aborts the run; staged files are discarded and the output directory
//! keeps its previous content.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::GeneratorConfig;
use crate::emitter::{emit_aggregator, emit_resource};
use crate::error::{self, ResembedError, Result};
use crate::identifier::{is_valid_cpp_identifier, sanitize_identifier};
use crate::manifest::Manifest;
use crate::path_utils;
use crate::transaction::OutputTransaction;
use crate::ui::{
    GenerationSummary, InteractiveProgressReporter, LineProgressReporter, ProgressReporter,
    SilentProgressReporter,
};
use crate::walker::{ExcludeFilter, ResourceWalker};

/// Run the generator with parsed command-line arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = GeneratorConfig::from_cli(&cli)?;

    let mut reporter: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(SilentProgressReporter)
    } else if cli.progress {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(LineProgressReporter::new(cli.verbose))
    };

    for token in cli.unknown_extra() {
        reporter.warn(&format!("Ignoring unknown argument '{}'", token));
    }

    match generate(&config, reporter.as_mut()) {
        Ok(summary) => {
            reporter.finish(&summary);
            Ok(())
        }
        Err(e) => {
            reporter.abandon();
            Err(e)
        }
    }
}

/// Embed every resource under `config.resource_root` into `config.output_dir`
pub fn generate(
    config: &GeneratorConfig,
    reporter: &mut dyn ProgressReporter,
) -> Result<GenerationSummary> {
    let root = dunce::canonicalize(&config.resource_root)
        .map_err(|_| error::fs::path_not_found(&config.resource_root))?;
    if !root.is_dir() {
        return Err(error::fs::path_not_found(&config.resource_root));
    }
    let exclude = ExcludeFilter::new(&config.exclude)?;
    let options = config.emit_options();

    let mut transaction = if config.check {
        OutputTransaction::begin_check(&config.output_dir)?
    } else {
        OutputTransaction::begin(&config.output_dir)?
    };
    let skip_dirs = generated_dirs_under_root(&root, &config.output_dir, transaction.staging_dir());
    let walker = ResourceWalker::new(&root, exclude, skip_dirs)?;

    let mut manifest = Manifest::new();
    let mut summary = GenerationSummary::default();

    for discovered in walker {
        let resource = discovered?.read()?;
        let origin = resource.relative_str();
        let identifier = sanitize_identifier(&origin);

        if !is_valid_cpp_identifier(&identifier) {
            reporter.warn(&format!(
                "'{}' yields '{}', which is not a valid C++ identifier",
                origin, identifier
            ));
        }

        manifest.push(&identifier, &resource.relative_path)?;
        let unit = emit_resource(&identifier, &origin, &resource.bytes, &options);
        transaction.stage(&unit)?;

        summary.total_bytes += resource.bytes.len() as u64;

        let display_path =
            path_utils::to_forward_slashes(&config.resource_root.join(&resource.relative_path));
        reporter.resource_processed(&display_path, &identifier, resource.bytes.len());
    }

    summary.resources = manifest.len();
    if manifest.is_empty() {
        reporter.warn(&format!(
            "No resources found under {}; {} will re-export nothing",
            config.resource_root.display(),
            crate::emitter::AGGREGATOR_NAME
        ));
    }

    let aggregator = emit_aggregator(manifest.identifiers(), &options);
    transaction.stage(&aggregator)?;

    if config.check {
        let outdated = transaction.outdated_files()?;
        if !outdated.is_empty() {
            return Err(ResembedError::OutputOutdated {
                files: outdated.join(", "),
            });
        }
    } else {
        summary.files_written = transaction.len();
        transaction.commit()?;
    }

    Ok(summary)
}

/// Directories the walker must not descend into: the staging directory, and the
/// output directory when it sits inside the resource root.
fn generated_dirs_under_root(root: &Path, output_dir: &Path, staging_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(output) = dunce::canonicalize(output_dir) {
        if output != root && output.starts_with(root) {
            dirs.push(output);
        }
    }
    if let Ok(staging) = dunce::canonicalize(staging_dir) {
        dirs.push(staging);
    }

    dirs
}
