//! In-process caching of source files
//!
//! A `SourceCache` lives for one run and is shared by every seed processed in
//! it, so a file required by several seeds is read and decoded once. Entries
//! are keyed by canonical path and are never invalidated or evicted.
//!
//! Loading a file is a single pass: read bytes, reject byte-order marks,
//! decode with the configured charset, strip `#require` directives and
//! resolve their targets. Only a fully successful load is cached, so a failure
//! leaves no partial entry behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::directive::DirectiveParser;
use crate::encoding::{reject_byte_order_mark, TextEncoding};
use crate::error::{Error, Result};

/// A loaded source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Directive-stripped content, encoded in the run's charset
    pub content: Vec<u8>,
    /// Directive-stripped content as text
    pub text: String,
    /// Canonical paths of required files, in directive order
    pub dependencies: Vec<PathBuf>,
}

/// Read counters, mostly useful for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached units
    pub units: usize,
    /// Number of files actually read from disk
    pub disk_reads: usize,
}

/// Memoizes source files by canonical path for the lifetime of one run
#[derive(Debug)]
pub struct SourceCache {
    root: PathBuf,
    encoding: TextEncoding,
    parser: DirectiveParser,
    units: HashMap<PathBuf, SourceUnit>,
    disk_reads: usize,
}

impl SourceCache {
    /// Create an empty cache.
    ///
    /// `root` must already be canonical; it is where `<...>` directives resolve.
    pub fn new(root: PathBuf, encoding: TextEncoding) -> Result<Self> {
        Ok(Self {
            root,
            encoding,
            parser: DirectiveParser::new()?,
            units: HashMap::new(),
            disk_reads: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Directive-stripped bytes of `path`, loading it on first use
    pub fn read_binary(&mut self, path: &Path) -> Result<&[u8]> {
        Ok(&self.get_or_load(path)?.content)
    }

    /// Directive-stripped text of `path`, loading it on first use
    pub fn read_string(&mut self, path: &Path) -> Result<&str> {
        Ok(&self.get_or_load(path)?.text)
    }

    /// Resolved dependencies of `path` in directive order.
    ///
    /// There is no dependency-only scan: this loads the whole file if needed.
    pub fn dependencies_of(&mut self, path: &Path) -> Result<&[PathBuf]> {
        Ok(&self.get_or_load(path)?.dependencies)
    }

    /// Check if a path has been loaded
    pub fn contains(&self, path: &Path) -> bool {
        self.units.contains_key(path)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            units: self.units.len(),
            disk_reads: self.disk_reads,
        }
    }

    fn get_or_load(&mut self, path: &Path) -> Result<&SourceUnit> {
        if !self.units.contains_key(path) {
            let unit = self.load(path)?;
            return Ok(self.units.entry(path.to_path_buf()).or_insert(unit));
        }

        Ok(&self.units[path])
    }

    fn load(&mut self, path: &Path) -> Result<SourceUnit> {
        debug!("Reading {}", path.display());

        let data = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.disk_reads += 1;

        reject_byte_order_mark(&data, path)?;
        let text = self.encoding.decode(&data, path)?;
        let extracted = self.parser.extract(&text);

        let dependencies = extracted
            .directives
            .iter()
            .map(|directive| directive.resolve(&self.root, path))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "{} requires {} file(s)",
            path.display(),
            dependencies.len()
        );

        Ok(SourceUnit {
            content: self.encoding.encode(&extracted.text, path)?,
            text: extracted.text,
            dependencies,
        })
    }
}
