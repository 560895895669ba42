//! Path manipulation utilities for gilt

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user` forms
/// and paths without a leading tilde are returned unchanged.
pub fn expand_user<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let rest = match path.strip_prefix("~") {
        Ok(rest) => rest,
        Err(_) => return Ok(path.to_path_buf()),
    };

    let home = dirs::home_dir().ok_or_else(|| Error::Path {
        message: format!(
            "cannot expand '{}': home directory is unknown",
            path.display()
        ),
    })?;

    if rest.as_os_str().is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
