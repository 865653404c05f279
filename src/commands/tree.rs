//! # Tree Command Implementation
//!
//! Displays the `#require` tree of one seed. Each file is expanded the first
//! time it appears; later appearances are printed with a `(*)` marker and no
//! children.
//!
//! This command is read-only.

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use ycombo::resolver::{self, DependencyNode};

use super::deps::display_path;
use super::EngineArgs;

/// Display the dependency tree of a seed
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Seed file to resolve
    #[arg(value_name = "SEED")]
    pub seed: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Maximum depth to display. 0 shows only the seed.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let config = args.engine.load_config()?;
    let mut combiner = EngineArgs::combiner(&config)?;
    let root = combiner.cache().root().to_path_buf();

    let tree = resolver::dependency_tree(combiner.cache_mut(), &args.seed)?;
    let node = build_tree_node(&tree, &root, args.depth.unwrap_or(usize::MAX), 0);
    print_tree(&node).context("Failed to display tree")?;

    Ok(())
}

fn build_tree_node(
    dependency: &DependencyNode,
    root: &Path,
    max_depth: usize,
    current_depth: usize,
) -> TreeNode {
    let mut label = display_path(&dependency.path, root, false);
    if dependency.repeated {
        label.push_str(" (*)");
    }

    let children = if current_depth >= max_depth {
        Vec::new()
    } else {
        dependency
            .children
            .iter()
            .map(|child| build_tree_node(child, root, max_depth, current_depth + 1))
            .collect()
    };

    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
