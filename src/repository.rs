//! # Revision-Pinned Repository Management
//!
//! This module provides the `RepositoryManager`, which makes sure a clone of
//! each manifest entry exists in the cache, checked out at the pinned
//! revision.
//!
//! ## Design
//!
//! Every clone directory is in one of two states:
//!
//! - **Absent**: the manager runs `git clone` into the directory, followed by
//!   `git reset --hard <revision>`. If either command fails the entry fails
//!   with `Error::Fetch`, carrying git's diagnostic output, and whatever the
//!   clone left behind is removed so the directory is Absent again.
//! - **Present**: the directory is used as-is. No subprocess runs and the pin
//!   is not re-verified, so the first successful writer wins.
//!
//! Git is reached through [`crate::git::Git`], whose [`CommandRunner`] can be
//! swapped out in tests to observe or fail the invocations without a real
//! `git` binary.

use std::path::PathBuf;

use crate::cache::CloneCache;
use crate::config::RepositoryEntry;
use crate::error::{Error, Result};
use crate::filesystem::FileOperations;
use crate::git::{CommandRunner, Git};

/// The main entry point for fetching and pinning repositories.
pub struct RepositoryManager {
    cache: CloneCache,
    git: Git,
}

impl RepositoryManager {
    /// Creates a `RepositoryManager` that keeps clones under `cache` and runs
    /// git through `runner`.
    pub fn with_runner(cache: CloneCache, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            cache,
            git: Git::new(runner),
        }
    }

    /// The git wrapper, shared with the tree extractor.
    pub fn git(&self) -> &Git {
        &self.git
    }

    /// Ensure `entry` is cloned and pinned, returning its clone directory.
    ///
    /// Only a clone whose reset succeeded is left in the cache; a failed
    /// attempt is removed through `files`.
    pub fn ensure_cloned(
        &self,
        entry: &RepositoryEntry,
        files: &dyn FileOperations,
    ) -> Result<PathBuf> {
        let clone_dir = self.cache.clone_dir(&entry.remote, &entry.revision);

        log::info!("[{}@{}]:", entry.remote, entry.revision);
        log::info!("   - Cloning to '{}'", clone_dir.display());

        if clone_dir.exists() {
            log::info!("     * Clone already exists");
            return Ok(clone_dir);
        }

        let fetched = self
            .git
            .clone(&entry.remote, &clone_dir)
            .and_then(|_| self.git.reset_hard(&clone_dir, &entry.revision));

        if let Err(source) = fetched {
            if clone_dir.exists() {
                if let Err(e) = files.remove_dir(&clone_dir) {
                    log::warn!("Failed to remove partial clone: {}", e);
                }
            }
            return Err(Error::Fetch {
                remote: entry.remote.clone(),
                revision: entry.revision.clone(),
                source: Box::new(source),
            });
        }

        Ok(clone_dir)
    }
}
