//! # Deps Command Implementation
//!
//! Prints the files one seed combines, one per line, in combination order.
//! Nothing is written to disk.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use ycombo::resolver;

use super::EngineArgs;

/// Print the combination order of a seed
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Seed file to resolve
    #[arg(value_name = "SEED")]
    pub seed: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Print absolute paths instead of paths relative to the root
    #[arg(long)]
    pub absolute: bool,
}

/// Execute the `deps` command.
pub fn execute(args: DepsArgs) -> Result<()> {
    let config = args.engine.load_config()?;
    let mut combiner = EngineArgs::combiner(&config)?;
    let root = combiner.cache().root().to_path_buf();

    let order = resolver::combo(combiner.cache_mut(), &args.seed)?;
    for path in &order {
        println!("{}", display_path(path, &root, args.absolute));
    }

    Ok(())
}

/// Path as shown to the user: root-relative when it lives under the root
pub(crate) fn display_path(path: &Path, root: &Path, absolute: bool) -> String {
    if absolute {
        return path.display().to_string();
    }
    path.strip_prefix(root)
        .map(|relative| relative.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}
