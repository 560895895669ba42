//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and manifest
//! snippets to reduce duplication across test files.
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
//!     let fixture = TestFixture::new().with_manifest(manifests::WHOLE_TREE);
//!     fixture.command().arg("validate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{git_available, SourceRepo};
    pub use super::TestFixture;
}

/// Common manifest YAML snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// A single whole-tree entry.
    pub const WHOLE_TREE: &str = r#"
- remote: https://example.com/user/repo.git
  revision: abc1234
  destination: vendor/repo
"#;

    /// A single selective entry with one mapping of each kind.
    pub const SELECTIVE: &str = r#"
- remote: https://example.com/user/repo.git
  revision: abc1234
  sources:
    - pattern: foo/*.yml
      destinationDir: vendor/foo
    - pattern: README.md
      destinationFile: docs/README.md
"#;

    /// A branch name instead of a commit hash.
    pub const BRANCH_REVISION: &str = r#"
- remote: https://example.com/user/repo.git
  revision: main
  destination: vendor/repo
"#;

    /// The legacy key shape, which is no longer accepted.
    pub const LEGACY_KEYS: &str = r#"
- git: https://example.com/user/repo.git
  version: abc1234
  dstDir: vendor/repo
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "- remote: [unclosed";
}

/// Check whether a usable `git` binary is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A test fixture that provides a temporary project directory.
///
/// The fixture keeps gilt's clone directory inside the temporary directory
/// so tests never touch `~/.gilt`.
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

    /// Add a `gilt.yml` manifest with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("gilt.yml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an empty directory.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the manifest file.
    #[allow(dead_code)]
    pub fn manifest_path(&self) -> PathBuf {
        self.temp_dir.path().join("gilt.yml")
    }

    /// gilt's clone directory for this fixture.
    pub fn gilt_dir(&self) -> PathBuf {
        self.temp_dir.path().join(".gilt")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gilt");
        cmd.current_dir(self.path())
            .env_remove("GILT_FILENAME")
            .env_remove("GILT_LOG")
            .env("GILT_CACHE_DIRECTORY", self.gilt_dir())
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local Git repository with committed content, usable as a `remote`.
#[allow(dead_code)]
pub struct SourceRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl SourceRepo {
    /// Initialize an empty repository.
    pub fn new() -> Self {
        let repo = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        repo.git(&["init", "--quiet"]);
        repo
    }

    /// Write a file into the working tree.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Commit everything and return the full commit hash.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// The repository path, used as the manifest `remote`.
    pub fn remote(&self) -> String {
        self.temp_dir.path().display().to_string()
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=gilt",
                "-c",
                "user.email=gilt@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest(manifests::WHOLE_TREE);
        assert!(fixture.manifest_path().exists());
    }

    #[test]
    fn test_manifests_are_valid_yaml() {
        let snippets = [
            manifests::WHOLE_TREE,
            manifests::SELECTIVE,
            manifests::BRANCH_REVISION,
            manifests::LEGACY_KEYS,
        ];

        for snippet in snippets {
            serde_yaml::from_str::<serde_yaml::Value>(snippet).expect("Manifest should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(manifests::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
