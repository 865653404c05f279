//! # Build Command Implementation
//!
//! The `build` subcommand finds every seed under its inputs and combines each
//! one into its destination file.
//!
//! ## Functionality
//!
//! - **Discovery**: inputs may be seed files or directories; directories are
//!   searched recursively, skipping hidden folders. No input means the
//!   working directory.
//! - **Batch processing**: seeds are processed one after another with one
//!   shared source cache. A failing seed is reported and the batch goes on.
//! - **Minification**: combined output is piped through the configured
//!   minifier commands unless `--no-compress` is given.
//!
//! The command exits non-zero when any seed failed.

use anyhow::{bail, Result};
use clap::Args;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use ycombo::output::{failed_line, written_line, OutputConfig};
use ycombo::seed::SeedNaming;

use super::EngineArgs;

/// Combine seed files with their dependencies
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Seed files or folders to search for seeds (defaults to the working directory)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Combine only, do not run the configured minifiers
    #[arg(long)]
    pub no_compress: bool,

    /// Minifier command for script seeds, e.g. "uglifyjs --compress"
    #[arg(long, value_name = "COMMAND")]
    pub script_minifier: Option<String>,

    /// Minifier command for stylesheet seeds, e.g. "cleancss"
    #[arg(long, value_name = "COMMAND")]
    pub stylesheet_minifier: Option<String>,

    /// Suppress per-seed report lines
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs, color: &str) -> Result<()> {
    let output = OutputConfig::from_env_and_flag(color);
    let mut config = args.engine.load_config()?;

    if let Some(command) = &args.script_minifier {
        config.minifier.script = Some(split_command(command));
    }
    if let Some(command) = &args.stylesheet_minifier {
        config.minifier.stylesheet = Some(split_command(command));
    }
    if args.no_compress {
        config.minifier = Default::default();
    }

    let inputs = if args.inputs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.inputs
    };

    let naming = SeedNaming::new(config.extname());
    let seeds = collect_seeds(&naming, &inputs)?;

    if seeds.is_empty() {
        if !args.quiet {
            println!("No seed files found");
        }
        return Ok(());
    }

    let mut combiner = EngineArgs::combiner(&config)?;
    let report = combiner.process_all(&seeds)?;

    if !args.quiet {
        for written in &report.written {
            println!(
                "{}",
                written_line(&output, &written.destination.display().to_string(), written.units)
            );
        }
    }
    for (seed, _) in &report.failed {
        eprintln!("{}", failed_line(&output, &seed.display().to_string()));
    }

    if !report.is_success() {
        bail!(
            "{} of {} seed files failed",
            report.failed.len(),
            seeds.len()
        );
    }

    Ok(())
}

/// Seeds named by `inputs`, sorted, each file once however it was reached.
fn collect_seeds(naming: &SeedNaming, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seeds = Vec::new();
    for input in inputs {
        // An explicit file is processed even without a seed suffix so it is
        // reported instead of silently skipped
        if input.is_file() {
            seeds.push(input.clone());
        } else {
            seeds.extend(naming.find_seeds(&[input])?);
        }
    }

    seeds.sort();
    let mut seen = HashSet::new();
    seeds.retain(|seed| seen.insert(fs::canonicalize(seed).unwrap_or_else(|_| seed.clone())));
    Ok(seeds)
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
