//! Locating the root directory for `<...>` directives
//!
//! The root is resolved once per run. An explicit root must be an existing
//! directory. Otherwise the ancestors of the working directory are searched
//! for a directory holding both a `js` and a `css` entry (the usual
//! `htdocs` layout); the nearest one wins, and the working directory itself is
//! the fallback.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Entry names that mark a directory as the root
const ROOT_MARKERS: [&str; 2] = ["js", "css"];

/// Resolve the canonical root directory.
///
/// `explicit` is the user-specified root, if any; `cwd` is the directory the
/// upward search starts from.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            cwd.join(root)
        };
        if !root.is_dir() {
            return Err(Error::Configuration {
                message: format!(
                    "The user-specified root folder {} does not exist",
                    root.display()
                ),
            });
        }
        return Ok(fs::canonicalize(&root)?);
    }

    let cwd = fs::canonicalize(cwd)?;
    // The working directory itself is only the fallback
    for dir in cwd.ancestors().skip(1) {
        if has_root_markers(dir) {
            debug!("Detected root folder {}", dir.display());
            return Ok(dir.to_path_buf());
        }
    }

    debug!(
        "No js/css root folder above {}, using working directory",
        cwd.display()
    );
    Ok(cwd)
}

/// True when exactly the two marker names occur among the direct children.
///
/// Other entries are not counted. Unreadable directories never match.
fn has_root_markers(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    let matches = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| ROOT_MARKERS.contains(&name))
        })
        .count();

    matches == ROOT_MARKERS.len()
}
