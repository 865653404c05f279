//! # Configuration File
//!
//! An optional `.ycombo.yaml` holds the run-wide settings that would
//! otherwise be repeated on every command line:
//!
//! ```yaml
//! root: htdocs
//! charset: gbk
//! extname: seed
//! separators:
//!   script: "\n;\n"
//!   stylesheet: "\n\n"
//! minifier:
//!   script: ["uglifyjs", "--compress"]
//!   stylesheet: ["cleancss"]
//! ```
//!
//! Every key is optional. Command-line flags override file values; that
//! merge happens in the CLI layer.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::seed::SeedType;

/// Run-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root for `<...>` directives; detected from the working directory if unset
    pub root: Option<PathBuf>,
    /// Charset of every source file
    pub charset: Option<String>,
    /// Seed tag after `.js`/`.css`
    pub extname: Option<String>,
    pub separators: Separators,
    pub minifier: MinifierConfig,
}

impl Config {
    pub fn charset(&self) -> &str {
        self.charset.as_deref().unwrap_or(defaults::CHARSET)
    }

    pub fn extname(&self) -> &str {
        self.extname.as_deref().unwrap_or(defaults::EXTNAME)
    }
}

/// Text appended after each unit when stitching, per seed type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Separators {
    pub script: String,
    pub stylesheet: String,
}

impl Separators {
    pub fn for_type(&self, kind: SeedType) -> &str {
        match kind {
            SeedType::Script => &self.script,
            SeedType::Stylesheet => &self.stylesheet,
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            script: defaults::SCRIPT_SEPARATOR.to_string(),
            stylesheet: defaults::STYLESHEET_SEPARATOR.to_string(),
        }
    }
}

/// External commands the combined output is piped through, per seed type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifierConfig {
    pub script: Option<Vec<String>>,
    pub stylesheet: Option<Vec<String>>,
}

impl MinifierConfig {
    pub fn command_for(&self, kind: SeedType) -> Option<&[String]> {
        let argv = match kind {
            SeedType::Script => self.script.as_deref(),
            SeedType::Stylesheet => self.stylesheet.as_deref(),
        };
        argv.filter(|argv| !argv.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.command_for(SeedType::Script).is_none()
            && self.command_for(SeedType::Stylesheet).is_none()
    }
}

/// Parse a YAML configuration string. An empty document is the default config.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Load configuration from a YAML file.
///
/// A relative `root` in the file is taken relative to the file's directory.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse(&content).map_err(|e| Error::Configuration {
        message: format!("Invalid configuration in {}: {}", path.display(), e),
    })?;

    if let Some(root) = config.root.take() {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.root = Some(if root.is_absolute() {
            root
        } else {
            base.join(root)
        });
    }

    Ok(config)
}

/// Load the run's configuration.
///
/// An explicit path must exist. Without one, `.ycombo.yaml` in `cwd` is used
/// if present, otherwise defaults apply.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(Error::Configuration {
                    message: format!("Configuration file not found: {}", path.display()),
                });
            }
            from_file(&path)
        }
        None => {
            let path = cwd.join(defaults::CONFIG_FILE);
            if path.is_file() {
                debug!("Using configuration {}", path.display());
                from_file(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
