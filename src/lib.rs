//! # YCombo Library
//!
//! This library combines script and stylesheet sources into single bundles.
//! A *seed* file lists the files it needs with `#require` comment directives;
//! the library resolves the full transitive set, orders it so every file comes
//! after everything it requires, strips the directives and concatenates the
//! result next to the seed.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use ycombo::combiner::Combiner;
//! use ycombo::config::Config;
//!
//! let config = Config::default();
//! let mut combiner = Combiner::from_config(&config, Path::new(".")).unwrap();
//!
//! // js/app.js.seed -> js/app.js
//! let written = combiner.process(Path::new("js/app.js.seed")).unwrap();
//! println!("{} files combined", written.units);
//! ```
//!
//! ## Core Concepts
//!
//! - **Root (`root`)**: the directory `<...>` directives resolve against,
//!   either configured or detected from the working directory.
//! - **Directives (`directive`)**: `// #require <path>` and `/* #require "path" */`
//!   lines, extracted and stripped in one pass.
//! - **Source cache (`cache`)**: one read, decode and directive scan per file
//!   per run, shared by every seed.
//! - **Resolver (`resolver`)**: cycle-checked, dependency-first ordering.
//! - **Combiner (`combiner`)**: stitching, transformation and output.
//!
//! ## Execution Flow
//!
//! 1.  **Configure**: load `.ycombo.yaml`, resolve the root, pick the charset.
//! 2.  **Discover**: find seed files under the given inputs (`seed`).
//! 3.  **Resolve**: order each seed's dependency closure (`resolver`).
//! 4.  **Stitch**: concatenate stripped contents with type-specific separators.
//! 5.  **Write**: optionally pipe through a minifier, then write the output.

pub mod cache;
pub mod combiner;
pub mod config;
pub mod defaults;
pub mod directive;
pub mod encoding;
pub mod error;
pub mod output;
pub mod resolver;
pub mod root;
pub mod seed;
pub mod transform;

#[cfg(test)]
mod resolver_proptest;
