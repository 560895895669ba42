//! # Clone Cache Addressing
//!
//! This module owns the on-disk layout of the clone cache. Every
//! (`remote`, `revision`) pair maps to exactly one directory under the cache
//! root:
//!
//! ```text
//! <cache root>/<remote with '/' and ':' replaced by '-'>-<revision>
//! ```
//!
//! The mapping is a pure function with no side effects. The existence of the
//! directory is the only cache key: there is no metadata file, and once a
//! directory exists it is never re-verified or evicted.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Permission bits used when creating the cache root.
pub const CACHE_ROOT_MODE: u32 = 0o755;

/// Addresses clone directories beneath a single cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCache {
    root: PathBuf,
}

impl CloneCache {
    /// Create a cache rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The clone directory for `remote` pinned at `revision`.
    pub fn clone_dir(&self, remote: &str, revision: &str) -> PathBuf {
        self.root.join(cache_key(remote, revision))
    }

    /// Create the cache root, and any missing parents, if it does not exist.
    pub fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(CACHE_ROOT_MODE);
        }
        builder.create(&self.root)?;

        log::debug!("Created cache root {}", self.root.display());
        Ok(())
    }
}

/// The directory name used for `remote` pinned at `revision`.
pub fn cache_key(remote: &str, revision: &str) -> String {
    let sanitized: String = remote
        .chars()
        .map(|c| match c {
            '/' | ':' => '-',
            c => c,
        })
        .collect();
    format!("{sanitized}-{revision}")
}
