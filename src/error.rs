//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for `ycombo`.
//! It uses the `thiserror` library to create an `Error` enum that covers every
//! way combining a seed can fail, with enough path context in each message to
//! act on it.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Every variant except `Configuration` is scoped
//!   to a single seed: the batch loop reports it and moves on to the next seed.
//!   `Configuration` is fatal and aborts the whole run.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Circular dependencies carry the chain as structured data (`Vec<PathBuf>`)
//! so callers can format it however they like; the `Display` impl joins it
//! with `->`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::ByteOrderMark;

/// Main error type for ycombo operations
#[derive(Error, Debug)]
pub enum Error {
    /// A source file starts with a Unicode byte-order mark.
    #[error("{marker} BOM was found in {}", path.display())]
    EncodingMarkerDetected {
        marker: ByteOrderMark,
        path: PathBuf,
    },

    /// A source file contains bytes that are invalid for the configured charset.
    #[error("Cannot read {} as {encoding} encoded file", path.display())]
    DecodeFailure { path: PathBuf, encoding: String },

    /// A `#require` directive points at a file that does not exist.
    #[error(
        "Cannot find required file {required} in {} (line {line}, resolved to {})",
        referrer.display(),
        path.display()
    )]
    MissingDependency {
        /// The target as written in the directive
        required: String,
        /// The absolute path the target resolved to
        path: PathBuf,
        /// The file containing the directive
        referrer: PathBuf,
        /// 1-based line of the directive in the referrer
        line: usize,
    },

    /// A dependency chain loops back onto itself.
    #[error("Circular dependency was found: {}", CycleChain(cycle))]
    CircularDependency {
        /// Every path on the active branch, followed by the repeated path
        cycle: Vec<PathBuf>,
    },

    /// A seed file name carries neither the script nor the stylesheet suffix.
    #[error("Cannot detect seed file type of {}", path.display())]
    UnknownSeedType { path: PathBuf },

    /// Invalid run-wide configuration, such as a missing explicit root.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The external transformer failed for one seed.
    #[error("Transform command '{command}' failed: {message}")]
    Transform { command: String, message: String },

    /// A source file could not be read from disk.
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The combined output could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error aborts the whole run rather than a single seed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

struct CycleChain<'a>(&'a [PathBuf]);

impl fmt::Display for CycleChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_bom() {
        let error = Error::EncodingMarkerDetected {
            marker: ByteOrderMark::Utf8,
            path: PathBuf::from("/site/js/a.js"),
        };
        let display = format!("{}", error);
        assert_eq!(display, "UTF8 BOM was found in /site/js/a.js");
    }

    #[test]
    fn test_error_display_decode_failure() {
        let error = Error::DecodeFailure {
            path: PathBuf::from("/site/css/a.css"),
            encoding: "UTF-8".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/site/css/a.css"));
        assert!(display.contains("UTF-8"));
    }

    #[test]
    fn test_error_display_missing_dependency() {
        let error = Error::MissingDependency {
            required: "lib/missing.js".to_string(),
            path: PathBuf::from("/site/lib/missing.js"),
            referrer: PathBuf::from("/site/js/app.js.seed"),
            line: 3,
        };
        let display = format!("{}", error);
        assert!(display.contains("Cannot find required file lib/missing.js"));
        assert!(display.contains("/site/js/app.js.seed"));
        assert!(display.contains("line 3"));
    }

    #[test]
    fn test_error_display_cycle() {
        let error = Error::CircularDependency {
            cycle: vec![
                PathBuf::from("/a.js"),
                PathBuf::from("/b.js"),
                PathBuf::from("/a.js"),
            ],
        };
        let display = format!("{}", error);
        assert!(display.contains("Circular dependency"));
        assert!(display.contains("/a.js -> /b.js -> /a.js"));
    }

    #[test]
    fn test_error_unknown_seed_type() {
        let error = Error::UnknownSeedType {
            path: PathBuf::from("/site/readme.txt"),
        };
        assert!(format!("{}", error).contains("Cannot detect seed file type"));
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_configuration_is_fatal() {
        let error = Error::Configuration {
            message: "root missing".to_string(),
        };
        assert!(error.is_fatal());
        assert!(format!("{}", error).contains("root missing"));
    }

    #[test]
    fn test_error_read_names_path() {
        let error = Error::Read {
            path: PathBuf::from("/site/js/gone.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let display = format!("{}", error);
        assert!(display.contains("/site/js/gone.js"));
        assert!(display.contains("No such file"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }
}
