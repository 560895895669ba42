//! Default values for gilt configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Default manifest file name, relative to the current directory.
pub const DEFAULT_MANIFEST: &str = "gilt.yml";

/// Name of the clone cache directory inside the gilt directory.
pub const CACHE_SUBDIR: &str = "cache";

/// Returns the default gilt directory, `~/.gilt/clone`.
///
/// Falls back to `.gilt/clone` in the current directory if the home
/// directory cannot be determined.
///
/// This can be overridden by the `--giltdir` CLI flag or the
/// `GILT_CACHE_DIRECTORY` environment variable.
pub fn default_gilt_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gilt")
        .join("clone")
}

/// The clone cache root for a gilt directory.
pub fn cache_root(gilt_dir: &Path) -> PathBuf {
    gilt_dir.join(CACHE_SUBDIR)
}
