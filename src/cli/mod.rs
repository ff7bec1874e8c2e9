//! Command-line interface implementation
//!
//! This module parses arguments, loads configuration and art, and hands the
//! resolved inputs to [`upgrade`] for conversion or checking.

mod upgrade;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::{glob_with, MatchOptions};

use crate::config::loader::{find_config, load_config, merge_cli_overrides, resolve_path, CliOverrides};
use crate::models::Art;
use crate::parser::{is_document_file, load_art, parse_art};
use crate::telemetry;

pub use upgrade::UpgradeOptions;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Find all emitter documents in a directory (recursively).
///
/// Searches for both `.json` and `.json5` files. Files produced by an
/// earlier run (`*.v3.json`) are skipped.
pub fn find_document_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };

    for pattern in ["json", "json5"] {
        if let Ok(paths) = glob_with(&format!("{}/**/*.{}", dir_str, pattern), options) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.retain(|p| is_document_file(p) && !is_previous_output(p));
    files.sort();
    files
}

fn is_previous_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_ascii_lowercase().ends_with(".v3.json"))
}

/// Expand directory arguments into the documents they contain.
fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_document_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// particle-upgrade - Convert legacy particle emitter configs to the behavior format
#[derive(Parser, Debug)]
#[command(name = "particle-upgrade")]
#[command(
    about = "Convert legacy (v2) particle emitter configs (.json, .json5) to the v3 behavior format"
)]
#[command(version)]
pub struct Cli {
    /// Input documents, or directories to scan for .json/.json5 files
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Art for the emitter: a texture name, or a JSON art descriptor
    /// (e.g. '["a.png","b.png"]' or '{"textures":["a.png"],"framerate":"matchLife"}')
    #[arg(long, value_name = "ART", conflicts_with = "art_file")]
    pub art: Option<String>,

    /// Read the art descriptor from a JSON file
    #[arg(long, value_name = "FILE")]
    pub art_file: Option<PathBuf>,

    /// Cycle through texture lists in order instead of picking randomly
    #[arg(long)]
    pub ordered: bool,

    /// Write the result to this file instead of stdout (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write one converted file per input into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Spaces per indent level in the output (0-8, 0 for compact)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=8))]
    pub indent: Option<u8>,

    /// Config file (default: nearest particle-upgrade.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append failed conversions to the error log
    #[arg(long)]
    pub collect_errors: bool,

    /// Only report whether each input is already in the v3 format
    #[arg(long, conflicts_with_all = ["output", "out_dir"])]
    pub check: bool,

    /// Show config, art and per-document details on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolve the art given on the command line, if any.
fn cli_art(cli: &Cli) -> Result<Option<Art>, crate::parser::LoadError> {
    if let Some(ref arg) = cli.art {
        return parse_art(arg).map(Some);
    }
    if let Some(ref path) = cli.art_file {
        return load_art(path).map(Some);
    }
    Ok(None)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_config);
    if cli.verbose {
        match config_path {
            Some(ref path) => eprintln!("Using config: {}", path.display()),
            None => eprintln!("No particle-upgrade.toml found, using defaults"),
        }
    }

    let mut config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let art = match cli_art(&cli) {
        Ok(art) => art,
        Err(e) => {
            match cli.art_file {
                Some(ref path) => eprintln!("Error: Invalid art in '{}': {}", path.display(), e),
                None => eprintln!("Error: Invalid art: {}", e),
            }
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = CliOverrides {
        art,
        ordered: cli.ordered.then_some(true),
        indent: cli.indent.map(usize::from),
        collect_errors: cli.collect_errors.then_some(true),
    };
    merge_cli_overrides(&mut config, &overrides);

    if config.art.ordered && !matches!(config.art.default, Art::Textures(_)) {
        eprintln!("Warning: ordered art only applies to texture lists; '{}' is used as is", config.art.default);
    }

    let files = collect_inputs(&cli.inputs);
    if files.is_empty() {
        eprintln!("Error: No .json or .json5 files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if cli.output.is_some() && files.len() > 1 {
        eprintln!("Error: --output takes a single input; use --out-dir for {} files", files.len());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let error_log = resolve_path(&base_dir, &config.telemetry.error_log);
    telemetry::init_collector(&error_log, config.telemetry.collect_errors);
    if cli.verbose && telemetry::is_collection_enabled() {
        eprintln!("Logging errors to: {}", error_log.display());
    }

    if cli.check {
        return upgrade::run_check(&files, cli.verbose);
    }

    let options = UpgradeOptions {
        art: config.art.default,
        ordered: config.art.ordered,
        indent: config.output.indent,
        output: cli.output,
        out_dir: cli.out_dir,
        verbose: cli.verbose,
    };
    upgrade::run_upgrade(&files, &options)
}
