//! # `#require` Directives
//!
//! Sources declare their dependencies with whole-line comments:
//!
//! ```text
//! // #require <lib/base.js>
//! // #require "./widget.js"
//! /* #require <css/reset.css> */
//! /* #require "grid.css" */
//! ```
//!
//! A path in angle brackets resolves against the run's root directory; a path
//! in double quotes resolves against the directory of the file containing the
//! directive. Directive lines are removed from the text, line terminator
//! included, in the same pass that collects them.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Matches one directive line, including its line terminator if any.
const REQUIRE_PATTERN: &str = r#"(?m)^[ \t]*/[/*][ \t]#require[ \t](?:<([A-Za-z0-9_./-]+)>|"([A-Za-z0-9_./-]+)")(?:[ \t]\*/)?[ \t]*(?:\r?\n|\r?\z)"#;

/// How a directive's target path is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// `<path>`: relative to the root directory
    RootRelative,
    /// `"path"`: relative to the requiring file's directory
    FileRelative,
}

/// One parsed `#require` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireDirective {
    pub mode: ResolutionMode,
    /// Target path exactly as written
    pub target: String,
    /// 1-based line number in the requiring file
    pub line: usize,
}

impl RequireDirective {
    /// Resolve the target to a canonical path.
    ///
    /// `referrer` is the canonical path of the file containing the directive.
    /// A target that does not exist is a `MissingDependency` error.
    pub fn resolve(&self, root: &Path, referrer: &Path) -> Result<PathBuf> {
        let base = match self.mode {
            ResolutionMode::RootRelative => root,
            ResolutionMode::FileRelative => referrer.parent().unwrap_or(root),
        };
        // A leading slash stays relative to the base instead of escaping it
        let candidate = base.join(self.target.trim_start_matches('/'));

        if !candidate.exists() {
            return Err(Error::MissingDependency {
                required: self.target.clone(),
                path: candidate,
                referrer: referrer.to_path_buf(),
                line: self.line,
            });
        }

        Ok(fs::canonicalize(&candidate)?)
    }
}

/// Source text with its directives stripped, plus the directives in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub directives: Vec<RequireDirective>,
}

/// Extracts `#require` directives from decoded source text
#[derive(Debug, Clone)]
pub struct DirectiveParser {
    pattern: Regex,
}

impl DirectiveParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(REQUIRE_PATTERN)?,
        })
    }

    /// Strip every directive line from `text` and return the directives in
    /// textual order.
    pub fn extract(&self, text: &str) -> Extracted {
        let mut directives = Vec::new();
        let mut line = 1;
        let mut scanned = 0;

        let stripped = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(scanned, |m| m.start());
            line += text[scanned..start].matches('\n').count();
            scanned = start;

            let directive = match (caps.get(1), caps.get(2)) {
                (Some(path), _) => Some((ResolutionMode::RootRelative, path.as_str())),
                (None, Some(path)) => Some((ResolutionMode::FileRelative, path.as_str())),
                (None, None) => None,
            };
            if let Some((mode, target)) = directive {
                directives.push(RequireDirective {
                    mode,
                    target: target.to_string(),
                    line,
                });
            }
            String::new()
        });

        Extracted {
            text: stripped.into_owned(),
            directives,
        }
    }
}
