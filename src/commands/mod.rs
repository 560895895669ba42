//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `gilt`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module exposes an `execute` function that receives the
//! global settings parsed by `clap` and performs the command's logic by
//! calling into the `gilt` library.

pub mod overlay;
pub mod validate;
pub mod version;

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use gilt::config::{self, Manifest};
use gilt::defaults;
use gilt::path::expand_user;

use crate::cli::GlobalArgs;

/// The manifest path with `~` expanded.
pub(crate) fn manifest_path(globals: &GlobalArgs) -> Result<PathBuf> {
    Ok(expand_user(&globals.filename)?)
}

/// The clone cache root: `<giltdir>/cache`, with `~` expanded.
pub(crate) fn cache_root(globals: &GlobalArgs) -> Result<PathBuf> {
    let gilt_dir = match &globals.giltdir {
        Some(dir) => expand_user(dir)?,
        None => defaults::default_gilt_dir(),
    };
    Ok(defaults::cache_root(&gilt_dir))
}

/// Load and validate the manifest named by the global `--filename`.
pub(crate) fn load_manifest(globals: &GlobalArgs) -> Result<Manifest> {
    let path = manifest_path(globals)?;
    config::from_file(&path)
        .map_err(|e| anyhow!("Failed to load manifest '{}': {}", path.display(), e))
}
