//! Overlay command implementation
//!
//! Loads and validates the manifest, then clones, pins and materializes every
//! entry in order. The first failure stops the run.

use anyhow::{anyhow, Result};

use gilt::overlay::Overlay;

use super::{cache_root, load_manifest};
use crate::cli::GlobalArgs;

/// Execute the overlay command
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    // Validation happens before the cache or any destination is touched.
    let manifest = load_manifest(globals)?;

    let cache_root = cache_root(globals)?;
    log::debug!("Using cache root {}", cache_root.display());

    let overlay = Overlay::new(&cache_root, globals.debug).map_err(|e| {
        anyhow!(
            "Failed to prepare cache '{}': {}",
            cache_root.display(),
            e
        )
    })?;

    overlay.run(&manifest)?;
    Ok(())
}
