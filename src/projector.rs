//! # Selective Source Projection
//!
//! This module copies the paths selected by an entry's `sources` out of its
//! clone and into the project tree.
//!
//! ## Algorithm
//!
//! Mappings are processed in manifest order. For each one, the pattern is
//! globbed against the clone root and every match is classified exactly once
//! as a [`PathKind`]. The pair of (kind, declared destination) decides what
//! happens:
//!
//! | Match       | Destination      | Effect                                              |
//! |-------------|------------------|-----------------------------------------------------|
//! | file        | `destinationFile`| copy to that path, overwriting, creating parents    |
//! | file        | `destinationDir` | copy into the directory, which must already exist   |
//! | directory   | `destinationDir` | remove the directory if present, then copy in full  |
//! | directory   | `destinationFile`| `Error::DirectoryToFile`                            |
//! | unsupported | either           | skipped with a warning                              |
//!
//! A directory match therefore *replaces* its destination rather than merging
//! into it. A pattern that matches nothing is not an error.
//!
//! The first failing mapping aborts the entry. Copies made by earlier mappings
//! are left in place.

use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use glob::{MatchOptions, Pattern};

use crate::config::{MappingDestination, SourceMapping};
use crate::error::{Error, Result};
use crate::filesystem::FileOperations;

/// The kind of a matched path, with symlinks followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    RegularFile,
    Directory,
    /// Sockets, FIFOs, devices and dangling symlinks.
    Unsupported,
}

impl PathKind {
    /// Classify `path`, following symlinks.
    pub fn of(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => PathKind::RegularFile,
            Ok(metadata) if metadata.is_dir() => PathKind::Directory,
            _ => PathKind::Unsupported,
        }
    }
}

/// Glob semantics for source patterns: `*` stays within one path component.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Projects source mappings out of a clone using the given file primitives.
pub struct SourceProjector<'a> {
    files: &'a dyn FileOperations,
}

impl<'a> SourceProjector<'a> {
    pub fn new(files: &'a dyn FileOperations) -> Self {
        Self { files }
    }

    /// Apply every mapping in `sources` against `clone_dir`, in order.
    pub fn project(&self, clone_dir: &Path, sources: &[SourceMapping]) -> Result<()> {
        log::info!("   [{}]:", clone_dir.display());

        for mapping in sources {
            self.project_mapping(clone_dir, mapping)?;
        }
        Ok(())
    }

    fn project_mapping(&self, clone_dir: &Path, mapping: &SourceMapping) -> Result<()> {
        let matches = resolve_matches(clone_dir, &mapping.pattern)?;
        if matches.is_empty() {
            log::debug!(
                "Pattern '{}' matched nothing in {}",
                mapping.pattern,
                clone_dir.display()
            );
            return Ok(());
        }

        for src in matches {
            let kind = PathKind::of(&src);
            match (kind, &mapping.destination) {
                (PathKind::RegularFile, MappingDestination::File(dst)) => {
                    self.copy_file(&src, dst)?;
                }
                (PathKind::RegularFile, MappingDestination::Dir(dir)) => {
                    if !dir.is_dir() {
                        return Err(Error::DestinationMissing { path: dir.clone() });
                    }
                    let name = src.file_name().ok_or_else(|| Error::Path {
                        message: format!("'{}' has no file name", src.display()),
                    })?;
                    self.copy_file(&src, &dir.join(name))?;
                }
                (PathKind::Directory, MappingDestination::Dir(dir)) => {
                    if dir.is_dir() {
                        self.files.remove_dir(dir)?;
                    }
                    log::info!("     - Copying '{}' to '{}'", src.display(), dir.display());
                    self.files.copy_dir(&src, dir)?;
                }
                (PathKind::Directory, MappingDestination::File(dst)) => {
                    return Err(Error::DirectoryToFile {
                        src,
                        dst: dst.clone(),
                    });
                }
                (PathKind::Unsupported, _) => {
                    log::warn!(
                        "Skipping '{}': not a regular file or directory",
                        src.display()
                    );
                }
            }
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        log::info!("     - Copying '{}' to '{}'", src.display(), dst.display());
        self.files.copy_file(src, dst)
    }
}

/// Glob `pattern` beneath `clone_dir`, treating the clone path literally.
fn resolve_matches(clone_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root = clone_dir.to_str().ok_or_else(|| Error::Path {
        message: format!("clone directory '{}' is not valid UTF-8", clone_dir.display()),
    })?;
    // Patterns stay under the clone root even when written as absolute paths.
    let relative = pattern.trim_start_matches(std::path::is_separator);
    let full_pattern = format!("{}{}{}", Pattern::escape(root), MAIN_SEPARATOR, relative);

    let mut matches = Vec::new();
    for entry in glob::glob_with(&full_pattern, MATCH_OPTIONS)? {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => log::warn!("Skipping unreadable path {}: {}", e.path().display(), e.error()),
        }
    }
    Ok(matches)
}
