//! # Dependency Resolution
//!
//! `combo` turns one seed into the ordered list of files to combine: the seed
//! plus everything it transitively requires, each file exactly once, every
//! file after all of its dependencies, the seed last.
//!
//! ## Algorithm
//!
//! A depth-first, post-order traversal driven by two explicit stacks instead
//! of recursion, so arbitrarily deep chains cannot exhaust the call stack:
//!
//! 1.  **Frontier**: one cursor over a sibling list per depth. The bottom list
//!     holds only the seed.
//! 2.  **Footprint**: the paths on the branch from the seed to the current
//!     node. Meeting a footprint path again is a cycle, reported with the whole
//!     branch followed by the repeated path.
//! 3.  **Emission**: when a sibling list is exhausted, its owner is popped off
//!     the footprint and appended to the output.
//!
//! Children are visited in directive order. A file already emitted through an
//! earlier branch is skipped, so the first branch to fully resolve a file
//! decides its position.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::cache::SourceCache;
use crate::error::{Error, Result};

/// Sibling list being walked at one depth
struct Frontier {
    paths: Vec<PathBuf>,
    next: usize,
}

impl Frontier {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, next: 0 }
    }

    fn advance(&mut self) -> Option<PathBuf> {
        let path = self.paths.get(self.next).cloned();
        self.next += 1;
        path
    }
}

/// Ordered, duplicate-free output list
#[derive(Default)]
struct EmitOrder {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl EmitOrder {
    fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    fn push(&mut self, path: PathBuf) {
        self.seen.insert(path.clone());
        self.order.push(path);
    }
}

/// Resolve `seed` and its transitive dependencies into combination order.
///
/// The seed is canonicalized first; every returned path is canonical.
pub fn combo(cache: &mut SourceCache, seed: &Path) -> Result<Vec<PathBuf>> {
    let seed = canonical_seed(seed)?;

    let mut frontier = vec![Frontier::new(vec![seed])];
    let mut footprint: Vec<PathBuf> = Vec::new();
    let mut on_footprint: HashSet<PathBuf> = HashSet::new();
    let mut output = EmitOrder::default();

    while let Some(top) = frontier.last_mut() {
        match top.advance() {
            Some(path) => {
                if on_footprint.contains(&path) {
                    let mut cycle = footprint;
                    cycle.push(path);
                    return Err(Error::CircularDependency { cycle });
                }

                if output.contains(&path) {
                    continue;
                }

                let dependencies = cache.dependencies_of(&path)?.to_vec();
                on_footprint.insert(path.clone());
                footprint.push(path);
                frontier.push(Frontier::new(dependencies));
            }
            None => {
                frontier.pop();
                // The bottom frontier has no owner on the footprint
                if let Some(done) = footprint.pop() {
                    on_footprint.remove(&done);
                    debug!("Resolved {}", done.display());
                    output.push(done);
                }
            }
        }
    }

    Ok(output.order)
}

/// One file in a dependency tree view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub path: PathBuf,
    /// True when this file was already expanded earlier in the tree
    pub repeated: bool,
    pub children: Vec<DependencyNode>,
}

/// Tree node whose children are still being expanded
struct PartialNode {
    path: PathBuf,
    children: Vec<DependencyNode>,
    pending: Frontier,
}

impl PartialNode {
    fn new(cache: &mut SourceCache, path: PathBuf) -> Result<Self> {
        let dependencies = cache.dependencies_of(&path)?.to_vec();
        Ok(Self {
            path,
            children: Vec::new(),
            pending: Frontier::new(dependencies),
        })
    }

    fn finish(self) -> DependencyNode {
        DependencyNode {
            path: self.path,
            repeated: false,
            children: self.children,
        }
    }
}

/// Build the directive tree of `seed` for display.
///
/// Resolution runs first, so cycles and missing files fail exactly as they
/// do when combining. Each file is expanded the first time it appears; later
/// appearances are leaves marked `repeated`. Like `combo`, the walk keeps its
/// own stack of open nodes.
pub fn dependency_tree(cache: &mut SourceCache, seed: &Path) -> Result<DependencyNode> {
    combo(cache, seed)?;

    let seed = canonical_seed(seed)?;
    let mut expanded = HashSet::new();
    expanded.insert(seed.clone());
    let mut root = PartialNode::new(cache, seed)?;
    let mut open: Vec<PartialNode> = Vec::new();

    loop {
        let top = open.last_mut().unwrap_or(&mut root);
        match top.pending.advance() {
            Some(child) if !expanded.insert(child.clone()) => {
                top.children.push(DependencyNode {
                    path: child,
                    repeated: true,
                    children: Vec::new(),
                });
            }
            Some(child) => {
                let node = PartialNode::new(cache, child)?;
                open.push(node);
            }
            None => match open.pop() {
                Some(done) => open
                    .last_mut()
                    .unwrap_or(&mut root)
                    .children
                    .push(done.finish()),
                None => return Ok(root.finish()),
            },
        }
    }
}

fn canonical_seed(seed: &Path) -> Result<PathBuf> {
    fs::canonicalize(seed).map_err(|source| Error::Read {
        path: seed.to_path_buf(),
        source,
    })
}
