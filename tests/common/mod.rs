//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_site_layout();
//!     fixture.command().arg("build").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Custom seed tag.
    pub const SRC_EXTNAME: &str = "extname: src\n";

    /// GBK sources.
    pub const GBK: &str = "charset: gbk\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";

    /// Unknown key.
    pub const UNKNOWN_KEY: &str = "compress: true\n";
}

/// A site directory in a temporary folder.
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_site_layout()
///     .with_file("js/a.js", "var a;\n")
///     .with_file("js/app.js.seed", "// #require <js/a.js>\n");
///
/// fixture.command().arg("build").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create the `js` and `css` folders that mark a site root.
    #[allow(dead_code)]
    pub fn with_site_layout(self) -> Self {
        self.temp_dir
            .child("js")
            .create_dir_all()
            .expect("Failed to create js dir");
        self.temp_dir
            .child("css")
            .create_dir_all()
            .expect("Failed to create css dir");
        self
    }

    /// Add a `.ycombo.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".ycombo.yaml", content)
    }

    /// Add a file with the given path and content, creating parent folders.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.with_binary_file(path, content.as_bytes())
    }

    /// Add a binary file with the given path and content.
    pub fn with_binary_file(self, path: &str, content: &[u8]) -> Self {
        let child = self.temp_dir.child(path);
        if let Some(parent) = child.path().parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        child.write_binary(content).expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical path of a file inside the fixture.
    #[allow(dead_code)]
    pub fn canonical(&self, path: &str) -> PathBuf {
        std::fs::canonicalize(self.path().join(path)).expect("Failed to canonicalize")
    }

    /// Read a produced file as text.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colour is disabled and `YCOMBO_*` variables from the calling
    /// environment are cleared so output is stable.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ycombo");
        cmd.current_dir(self.path())
            .env_remove("YCOMBO_CONFIG")
            .env_remove("YCOMBO_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_site_layout() {
        let fixture = TestFixture::new().with_site_layout();
        assert!(fixture.path().join("js").is_dir());
        assert!(fixture.path().join("css").is_dir());
    }

    #[test]
    fn test_fixture_with_file_creates_parents() {
        let fixture = TestFixture::new().with_file("js/lib/a.js", "var a;");
        assert_eq!(fixture.read("js/lib/a.js"), "var a;");
    }

    #[test]
    fn test_configs_parse_as_yaml() {
        for config in [configs::SRC_EXTNAME, configs::GBK, configs::UNKNOWN_KEY] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML).is_err());
    }
}
