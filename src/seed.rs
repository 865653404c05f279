//! Seed files: classification, output naming and discovery
//!
//! A seed is named `<name>.js.<extname>` (script) or `<name>.css.<extname>`
//! (stylesheet). Its combined output lands next to it with the trailing
//! `.<extname>` removed, so `app.js.seed` produces `app.js`.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// The language family of a seed, decided from its file name only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedType {
    Script,
    Stylesheet,
}

impl SeedType {
    /// File extension that precedes the seed tag
    pub fn extension(&self) -> &'static str {
        match self {
            SeedType::Script => "js",
            SeedType::Stylesheet => "css",
        }
    }
}

impl fmt::Display for SeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Seed suffix convention for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedNaming {
    extname: String,
}

impl SeedNaming {
    /// `extname` is the tag after `.js`/`.css`, without a leading dot
    pub fn new(extname: &str) -> Self {
        Self {
            extname: extname.trim_start_matches('.').to_string(),
        }
    }

    pub fn extname(&self) -> &str {
        &self.extname
    }

    fn suffix(&self, kind: SeedType) -> String {
        format!(".{}.{}", kind.extension(), self.extname)
    }

    /// Classify a seed by its file name
    pub fn classify(&self, path: &Path) -> Result<SeedType> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        [SeedType::Script, SeedType::Stylesheet]
            .into_iter()
            .find(|kind| name.ends_with(&self.suffix(*kind)))
            .ok_or_else(|| Error::UnknownSeedType {
                path: path.to_path_buf(),
            })
    }

    /// Output path: the seed path with its trailing `.<extname>` removed
    pub fn destination(&self, seed: &Path) -> Result<PathBuf> {
        self.classify(seed)?;
        let tag = format!(".{}", self.extname);
        seed.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(&tag))
            .map(|stripped| seed.with_file_name(stripped))
            .ok_or_else(|| Error::UnknownSeedType {
                path: seed.to_path_buf(),
            })
    }

    /// Find seed files under the given inputs.
    ///
    /// Files are kept when they carry a seed suffix; directories are walked
    /// recursively, skipping hidden ones such as `.git` or `.svn`. The result
    /// is sorted and free of duplicates.
    pub fn find_seeds<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<PathBuf>> {
        let mut seeds = Vec::new();

        for input in inputs {
            let walker = WalkDir::new(input.as_ref())
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry));

            for entry in walker {
                let entry = entry.map_err(|e| Error::Read {
                    path: e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| input.as_ref().to_path_buf()),
                    source: e.into(),
                })?;
                if entry.file_type().is_file() && self.classify(entry.path()).is_ok() {
                    seeds.push(entry.into_path());
                }
            }
        }

        seeds.sort();
        seeds.dedup();
        Ok(seeds)
    }
}

impl Default for SeedNaming {
    fn default() -> Self {
        Self::new(crate::defaults::EXTNAME)
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
