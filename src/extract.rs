//! Whole-tree extraction of a pinned clone into a destination directory.

use std::path::Path;

use crate::error::{Error, Result};
use crate::filesystem::FileOperations;
use crate::git::Git;

/// Materialize every tracked file of `clone_dir` under `destination`.
///
/// The destination is resolved to an absolute path first, then handed to
/// `git checkout-index` as a directory prefix. Existing files are
/// overwritten; nothing is filtered.
pub fn extract_tree(
    git: &Git,
    files: &dyn FileOperations,
    clone_dir: &Path,
    destination: &Path,
) -> Result<()> {
    let extract_error = |message: String| Error::Extract {
        destination: destination.display().to_string(),
        message,
    };

    let absolute = files
        .absolute(destination)
        .map_err(|e| extract_error(e.to_string()))?;

    log::info!("   - Extracting to '{}'", absolute.display());

    git.checkout_index(clone_dir, &absolute)
        .map_err(|e| extract_error(e.to_string()))
}
