//! Shared test utilities for E2E tests.
//!
//! This module provides common fixtures and catalog snippets to reduce
//! duplication across test files.
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
//!     let fixture = TestFixture::new(catalogs::INHERITED);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    pub use super::TestFixture;
}

/// Common catalog JSON snippets for testing.
#[allow(dead_code)]
pub mod catalogs {
    /// Minimal catalog with one empty configuration.
    pub const MINIMAL: &str = r#"{
  "default": "debug",
  "configurations": { "debug": {} }
}"#;

    /// A two-level inheritance chain with overlapping options.
    pub const INHERITED: &str = r#"{
  "default": "release",
  "configurations": {
    "base":    { "options": { "X": "1", "FOO": "from-config" } },
    "release": { "inherits": "base", "options": { "Y": "2" } }
  }
}"#;

    /// Two configurations that inherit from each other.
    pub const CYCLIC: &str = r#"{
  "configurations": {
    "a": { "inherits": "b" },
    "b": { "inherits": "a" }
  }
}"#;

    /// A configuration whose build tools are stand-ins that always succeed.
    pub const RUNNABLE: &str = r#"{
  "default": "fast",
  "configurations": {
    "fast": {
      "cmake-exe": "true",
      "build-command": "true",
      "source-directory": "."
    }
  }
}"#;
}

/// A temporary project directory holding a `build.json` catalog.
pub struct TestFixture {
    temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture whose `build.json` holds the given catalog.
    pub fn new(catalog: &str) -> Self {
        let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
        temp.child("build.json")
            .write_str(catalog)
            .expect("failed to write catalog");
        Self { temp }
    }

    /// Path to the fixture's catalog file.
    pub fn catalog_path(&self) -> std::path::PathBuf {
        self.temp.path().join("build.json")
    }

    /// The fixture's project directory.
    pub fn path(&self) -> &std::path::Path {
        self.temp.path()
    }

    /// The basename of the fixture's project directory.
    pub fn basename(&self) -> String {
        self.temp
            .path()
            .file_name()
            .expect("temp dir has a name")
            .to_string_lossy()
            .into_owned()
    }
}
