//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `ycombo`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `ycombo` library.
//!
//! Options that shape how sources are read (root, charset, seed tag, config
//! file) are shared through [`EngineArgs`].

pub mod build;
pub mod completions;
pub mod deps;
pub mod tree;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use ycombo::combiner::Combiner;
use ycombo::config::{self, Config};

/// Options shared by every command that reads sources
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Configuration file (defaults to .ycombo.yaml in the working directory, if present)
    #[arg(short, long, value_name = "FILE", env = "YCOMBO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder of <...> dependencies.
    ///
    /// Defaults to the nearest ancestor of the working directory containing
    /// both `js` and `css`, or the working directory itself.
    #[arg(long, value_name = "DIR", env = "YCOMBO_ROOT")]
    pub root: Option<PathBuf>,

    /// Read source files using CHARSET (default UTF-8)
    #[arg(long, value_name = "CHARSET")]
    pub charset: Option<String>,

    /// Seed file tag: seeds are named <name>.js.<EXTNAME> or <name>.css.<EXTNAME> (default seed)
    #[arg(long, value_name = "EXTNAME")]
    pub extname: Option<String>,
}

impl EngineArgs {
    /// Load the configuration file and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let mut config = config::load(self.config.as_deref(), &cwd)?;

        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }
        if let Some(charset) = &self.charset {
            config.charset = Some(charset.clone());
        }
        if let Some(extname) = &self.extname {
            config.extname = Some(extname.clone());
        }

        Ok(config)
    }

    /// Build the run's combiner from a loaded configuration
    pub fn combiner(config: &Config) -> Result<Combiner> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Combiner::from_config(config, &cwd)?)
    }
}
