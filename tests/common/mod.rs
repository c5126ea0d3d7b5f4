//! Shared test utilities for the CLI end-to-end tests.
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
//!     let fixture = TestFixture::new().with_file("doc.json", r#"{"a": 1}"#);
//!     fixture.command().args(["get", "doc.json", "a"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Append mode by default.
    pub const APPEND_MODE: &str = "mode: append\n";

    /// A rule set used by `match` when no `--rule` is given.
    pub const RULES: &str = r#"
rules:
  - "a.b"
  - "c.*"
  - "items[*]"
"#;

    /// Stringify defaults.
    pub const STRINGIFY: &str = r#"
stringify:
  root_symbol: "$"
"#;

    /// Cleaner exclusions.
    pub const KEEP_MAPS: &str = r#"
clean:
  exclude: ["*.map"]
"#;

    /// Misspelled top-level field.
    pub const UNKNOWN_FIELD: &str = "mods: append\n";
}

/// A test fixture that provides a temporary directory with optional config.
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

    /// Add a `.object-ops.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".object-ops.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a JSON file from the temp directory.
    #[allow(dead_code)]
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.path().join(path)).expect("Failed to read file");
        serde_json::from_str(&content).expect("File should be valid JSON")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("object-ops");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("nested/test.txt", "hello");
        assert!(fixture.path().join("nested/test.txt").exists());
    }

    #[test]
    fn test_configs_are_valid() {
        for config in [
            configs::APPEND_MODE,
            configs::RULES,
            configs::STRINGIFY,
            configs::KEEP_MAPS,
        ] {
            object_ops::config::parse(config).expect("Config should parse");
        }
        assert!(object_ops::config::parse(configs::UNKNOWN_FIELD).is_err());
    }
}
