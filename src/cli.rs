//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// YCombo - Combine scripts and stylesheets by their #require directives
#[derive(Parser, Debug)]
#[command(name = "ycombo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,

    /// Display informational messages (same as --log-level info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine every seed file found under the given inputs
    Build(commands::build::BuildArgs),

    /// Print the combination order of one seed
    Deps(commands::deps::DepsArgs),

    /// Print the #require tree of one seed
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &self.color),
            Commands::Deps(args) => commands::deps::execute(args),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }

    /// `RUST_LOG`, when set, takes precedence over the flags
    fn init_logging(&self) {
        let level = if self.verbose {
            self.log_level.max(LevelFilter::Info)
        } else {
            self.log_level
        };

        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp(None)
            .format_target(false)
            .init();
    }
}
