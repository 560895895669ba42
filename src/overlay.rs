//! # Overlay Engine
//!
//! The top-level orchestration of an overlay run. For each manifest entry, in
//! order, the engine makes sure the pinned clone exists and then materializes
//! it: the whole tree for a `destination` entry, or the selected paths for a
//! `sources` entry.
//!
//! Runs are strictly sequential and fail fast: the first error is returned
//! unchanged and later entries are never attempted. Nothing already written is
//! rolled back; re-running the overlay is the recovery strategy.

use std::path::PathBuf;

use crate::cache::CloneCache;
use crate::config::{Manifest, RepositoryEntry, Target};
use crate::error::Result;
use crate::extract::extract_tree;
use crate::filesystem::{DefaultFileOperations, FileOperations};
use crate::git::{CommandRunner, SystemCommandRunner};
use crate::projector::SourceProjector;
use crate::repository::RepositoryManager;

/// Applies a manifest against a clone cache.
pub struct Overlay {
    repositories: RepositoryManager,
    files: Box<dyn FileOperations>,
}

impl Overlay {
    /// Creates an overlay that clones into `cache_root` with the system `git`
    /// and writes to the host filesystem. The cache root is created if needed.
    ///
    /// With `debug` set, git output is streamed to the terminal.
    pub fn new(cache_root: impl Into<PathBuf>, debug: bool) -> Result<Self> {
        Self::with_operations(
            cache_root,
            Box::new(SystemCommandRunner::new(debug)),
            Box::new(DefaultFileOperations),
        )
    }

    /// Creates an overlay with custom command and filesystem implementations.
    pub fn with_operations(
        cache_root: impl Into<PathBuf>,
        runner: Box<dyn CommandRunner>,
        files: Box<dyn FileOperations>,
    ) -> Result<Self> {
        let cache = CloneCache::new(cache_root);
        cache.ensure_root()?;

        Ok(Self {
            repositories: RepositoryManager::with_runner(cache, runner),
            files,
        })
    }

    /// Apply every entry of `manifest`, stopping at the first failure.
    pub fn run(&self, manifest: &Manifest) -> Result<()> {
        for entry in manifest {
            self.apply_entry(entry)?;
        }
        Ok(())
    }

    /// Fetch, pin and materialize a single entry.
    pub fn apply_entry(&self, entry: &RepositoryEntry) -> Result<()> {
        let clone_dir = self
            .repositories
            .ensure_cloned(entry, self.files.as_ref())?;

        match &entry.target {
            Target::Destination(destination) => extract_tree(
                self.repositories.git(),
                self.files.as_ref(),
                &clone_dir,
                destination,
            ),
            Target::Sources(sources) => {
                SourceProjector::new(self.files.as_ref()).project(&clone_dir, sources)
            }
        }
    }
}
