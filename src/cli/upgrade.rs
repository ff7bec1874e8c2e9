//! Upgrade and check command implementations

use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::models::{Art, EmitterConfig, LegacyConfig};
use crate::output::{generate_output_path, save_json, to_json_string};
use crate::parser::load_document;
use crate::telemetry::{log_error, ErrorEntry};
use crate::upgrade::{is_current, upgrade_config, UpgradeError, Upgraded};

/// Settings for a conversion run, after config and CLI overrides are merged
#[derive(Debug, Clone)]
pub struct UpgradeOptions {
    pub art: Art,
    /// Force `textureOrdered` for texture lists
    pub ordered: bool,
    pub indent: usize,
    /// Single-input output file; stdout when absent
    pub output: Option<PathBuf>,
    /// Batch output directory
    pub out_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Where a converted document goes
enum Destination {
    Stdout,
    File(PathBuf),
}

/// Run the upgrade command over every input.
///
/// A single input goes to stdout (or `--output`) and its failure sets the
/// exit code directly. With several inputs each result is written to its own
/// file; a failure is reported and the run continues.
pub fn run_upgrade(files: &[PathBuf], options: &UpgradeOptions) -> ExitCode {
    if let [file] = files {
        if options.out_dir.is_none() {
            let dest = match options.output {
                Some(ref path) => Destination::File(path.clone()),
                None => Destination::Stdout,
            };
            return ExitCode::from(upgrade_file(file, dest, options));
        }
    }

    let mut written = HashSet::new();
    let mut failed = 0;

    for file in files {
        let out = generate_output_path(file, options.out_dir.as_deref());
        if !written.insert(out.clone()) {
            eprintln!(
                "Error: '{}' would overwrite '{}', already written in this run",
                file.display(),
                out.display()
            );
            failed += 1;
            continue;
        }
        if upgrade_file(file, Destination::File(out), options) != EXIT_SUCCESS {
            failed += 1;
        }
    }

    if options.verbose || failed > 0 {
        eprintln!("{} converted, {} failed", files.len() - failed, failed);
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Convert one file and write it out. Returns the exit code for that file.
fn upgrade_file(file: &Path, dest: Destination, options: &UpgradeOptions) -> u8 {
    let document = match load_document(file) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}: {}", file.display(), e);
            log_error(&ErrorEntry::load_failed("upgrade", &e).with_file(file));
            return EXIT_INVALID_ARGS;
        }
    };

    let upgraded = if is_current(&document) {
        if options.verbose {
            eprintln!("{}: already current, copied unchanged", file.display());
        }
        Upgraded::Unchanged(document)
    } else {
        match convert(document, options) {
            Ok(config) => {
                if options.verbose {
                    eprintln!("{}: {}", file.display(), config.tags().join(", "));
                }
                Upgraded::Converted(config)
            }
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                if let Some(hint) = e.suggestion() {
                    eprintln!("  hint: {}", hint);
                }
                log_error(&ErrorEntry::upgrade_failed("upgrade", &e).with_file(file));
                return EXIT_ERROR;
            }
        }
    };

    let text = match to_json_string(&upgraded, options.indent) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}: {}", file.display(), e);
            return EXIT_ERROR;
        }
    };

    match dest {
        Destination::Stdout => {
            println!("{}", text);
        }
        Destination::File(path) => {
            if let Err(e) = save_json(&text, &path) {
                eprintln!("Error: Cannot write '{}': {}", path.display(), e);
                return EXIT_ERROR;
            }
            if options.verbose {
                eprintln!("{} -> {}", file.display(), path.display());
            }
        }
    }

    EXIT_SUCCESS
}

/// Convert a legacy document, applying the run's art settings.
fn convert(document: Value, options: &UpgradeOptions) -> Result<EmitterConfig, UpgradeError> {
    let mut config: LegacyConfig = serde_json::from_value(document)?;
    if options.ordered {
        config.ordered_art = Some(true);
    }
    upgrade_config(&config, &options.art)
}

/// Run the check command: report which inputs still need upgrading.
///
/// Exits with an error if any input is legacy or unreadable.
pub fn run_check(files: &[PathBuf], verbose: bool) -> ExitCode {
    let mut needs_upgrade = false;
    let mut unreadable = false;

    for file in files {
        match load_document(file) {
            Ok(doc) if is_current(&doc) => {
                if verbose {
                    eprintln!("{}: current", file.display());
                }
            }
            Ok(_) => {
                eprintln!("{}: needs upgrade", file.display());
                needs_upgrade = true;
            }
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                log_error(&ErrorEntry::load_failed("check", &e).with_file(file));
                unreadable = true;
            }
        }
    }

    if unreadable && files.len() == 1 {
        ExitCode::from(EXIT_INVALID_ARGS)
    } else if unreadable || needs_upgrade {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
