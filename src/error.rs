//! # Error Handling
//!
//! This module defines the centralized error type for `gilt`. It uses the
//! `thiserror` library to describe every failure mode of an overlay run with
//! enough context to be reported to the user verbatim.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. The overlay-specific variants map
//!   one-to-one onto the stages of a run:
//!   - `Validation`: the manifest failed the schema; raised before any I/O.
//!   - `Fetch`: cloning or pinning a repository failed.
//!   - `Extract`: whole-tree materialization failed.
//!   - `DestinationMissing`: a file mapping targets a directory that does not
//!     exist.
//!   - `DirectoryToFile`: a glob matched a directory but the mapping declared
//!     a file destination.
//!   - `Copy`: a file or directory copy primitive failed.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! No variant is retried anywhere in the crate. The first error of a run is
//! propagated unchanged to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gilt operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `$` in the manifest text is not a valid placeholder.
    #[error("Invalid interpolation at line {line}, column {column}: '{fragment}'")]
    Interpolation {
        line: usize,
        column: usize,
        fragment: String,
    },

    /// The manifest did not satisfy the schema.
    ///
    /// Holds every violation found, each prefixed with the path of the
    /// offending node (e.g. `0.revision: ...`).
    #[error("Manifest validation failed:\n{}", violations.join("\n"))]
    Validation { violations: Vec<String> },

    /// Cloning a repository or resetting it to the pinned revision failed.
    #[error("Failed to fetch {remote}@{revision}: {source}")]
    Fetch {
        remote: String,
        revision: String,
        #[source]
        source: Box<Error>,
    },

    /// Materializing a clone's tracked tree into a destination failed.
    #[error("Failed to extract into '{destination}': {message}")]
    Extract {
        destination: String,
        message: String,
    },

    /// A file mapping's destination directory does not exist.
    #[error("destinationDir '{}' does not exist", path.display())]
    DestinationMissing { path: PathBuf },

    /// A glob matched a directory but the mapping declared `destinationFile`.
    #[error(
        "Cannot copy directory '{}' to destinationFile '{}'",
        src.display(),
        dst.display()
    )]
    DirectoryToFile { src: PathBuf, dst: PathBuf },

    /// A copy or removal primitive failed.
    #[error("Failed to copy '{}' to '{}': {message}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    /// An external command exited unsuccessfully or could not be started.
    #[error("Command failed: {command}: {stderr}")]
    Command { command: String, stderr: String },

    /// A path could not be resolved (e.g. `~` without a home directory).
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
