//! # Combining Seeds
//!
//! The `Combiner` owns everything one run shares: the source cache, the seed
//! naming policy, the separators and the output transform. For each seed it
//!
//! 1.  classifies the seed as script or stylesheet from its name,
//! 2.  resolves the ordered unit list,
//! 3.  stitches the directive-stripped units into one buffer, appending the
//!     type's separator after every unit (the last one included),
//! 4.  passes the buffer through the transform and writes the destination.
//!
//! Everything is read into memory before the destination is opened, so a
//! destination that is also one of the sources is safe, and a seed that fails
//! at any step leaves no output behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::cache::SourceCache;
use crate::config::{Config, Separators};
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::resolver;
use crate::root;
use crate::seed::{SeedNaming, SeedType};
use crate::transform::{ExternalCommand, Passthrough, Transform};

/// The stitched, not yet transformed, content of one seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    pub kind: SeedType,
    /// Canonical paths in combination order, seed last
    pub units: Vec<PathBuf>,
    pub content: Vec<u8>,
}

/// One successfully written output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub seed: PathBuf,
    pub destination: PathBuf,
    pub units: usize,
    pub bytes: usize,
}

/// Outcome of processing a batch of seeds
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<Written>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Combines seeds with their dependencies and writes the results
pub struct Combiner {
    cache: SourceCache,
    naming: SeedNaming,
    separators: Separators,
    transform: Box<dyn Transform>,
}

impl Combiner {
    pub fn new(
        cache: SourceCache,
        naming: SeedNaming,
        separators: Separators,
        transform: Box<dyn Transform>,
    ) -> Self {
        Self {
            cache,
            naming,
            separators,
            transform,
        }
    }

    /// Build a combiner for one run.
    ///
    /// Resolves the root against `cwd`; an invalid explicit root or an
    /// unusable charset is a fatal `Configuration` error.
    pub fn from_config(config: &Config, cwd: &Path) -> Result<Self> {
        let root = root::resolve(config.root.as_deref(), cwd)?;
        info!("Using root folder {}", root.display());

        let encoding = TextEncoding::from_label(config.charset())?;
        let transform: Box<dyn Transform> = if config.minifier.is_empty() {
            Box::new(Passthrough)
        } else {
            Box::new(ExternalCommand::new(config.minifier.clone()))
        };

        Ok(Self::new(
            SourceCache::new(root, encoding)?,
            SeedNaming::new(config.extname()),
            config.separators.clone(),
            transform,
        ))
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SourceCache {
        &mut self.cache
    }

    pub fn naming(&self) -> &SeedNaming {
        &self.naming
    }

    /// Resolve and stitch one seed in memory
    pub fn combine(&mut self, seed: &Path) -> Result<Combined> {
        let kind = self.naming.classify(seed)?;
        let units = resolver::combo(&mut self.cache, seed)?;
        let separator = self
            .cache
            .encoding()
            .encode(self.separators.for_type(kind), seed)?;

        let mut content = Vec::new();
        for unit in &units {
            content.extend_from_slice(self.cache.read_binary(unit)?);
            content.extend_from_slice(&separator);
        }

        Ok(Combined {
            kind,
            units,
            content,
        })
    }

    /// Combine one seed, transform it and write its destination
    pub fn process(&mut self, seed: &Path) -> Result<Written> {
        info!("Begin processing {}", seed.display());

        let destination = self.naming.destination(seed)?;
        let combined = self.combine(seed)?;
        let units = combined.units.len();
        let output = self.transform.transform(combined.content, combined.kind)?;

        fs::write(&destination, &output).map_err(|source| Error::Write {
            path: destination.clone(),
            source,
        })?;
        info!(
            "Wrote {} ({} files, {} bytes)",
            destination.display(),
            units,
            output.len()
        );

        Ok(Written {
            seed: seed.to_path_buf(),
            destination,
            units,
            bytes: output.len(),
        })
    }

    /// Process seeds one after another.
    ///
    /// A failing seed is logged and recorded, and the batch moves on. Only a
    /// fatal error stops the batch and is returned.
    pub fn process_all<P: AsRef<Path>>(&mut self, seeds: &[P]) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for seed in seeds {
            let seed = seed.as_ref();
            match self.process(seed) {
                Ok(written) => report.written.push(written),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("{}", e);
                    error!("Failed to process {}", seed.display());
                    report.failed.push((seed.to_path_buf(), e));
                }
            }
        }

        Ok(report)
    }
}
