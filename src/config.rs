//! # Manifest Model and Parsing
//!
//! This module defines the data structures that represent a `gilt.yml`
//! manifest, and the logic that turns manifest text into them.
//!
//! ## Key Components
//!
//! - **`Manifest`**: A type alias for `Vec<RepositoryEntry>`, in manifest
//!   order.
//! - **`RepositoryEntry`**: One repository pinned at one revision, together
//!   with where its content goes (`Target`).
//! - **`SourceMapping`**: One glob pattern and the destination its matches
//!   are copied to (`MappingDestination`).
//!
//! ## Parsing
//!
//! `parse` first substitutes `$VAR`, `${VAR}` and `${VAR:-default}`
//! placeholders from the environment (see [`crate::interpolate`]). It then
//! decodes the YAML into a generic value, validates it with
//! [`crate::schema::validate`], and only then deserializes it into the raw
//! `serde` structs and converts those into the domain types. The "exactly one
//! of" rules enforced by the schema are encoded in the domain types as enums,
//! so an entry can never be both whole-tree and selective.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::interpolate::interpolate;
use crate::schema;

/// A parsed manifest, in declaration order.
pub type Manifest = Vec<RepositoryEntry>;

/// One manifest item: a remote pinned at a revision, and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    /// Remote location understood by `git clone` (URL or local path).
    pub remote: String,
    /// Commit hash the clone is hard-reset to.
    pub revision: String,
    /// Whole-tree destination or selective source mappings.
    pub target: Target,
}

/// What an entry materializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Extract every tracked file into this directory.
    Destination(PathBuf),
    /// Copy only glob-matched paths, mapping by mapping.
    Sources(Vec<SourceMapping>),
}

/// A glob pattern, relative to the clone root, and where its matches go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapping {
    pub pattern: String,
    pub destination: MappingDestination,
}

/// Destination of a single source mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingDestination {
    /// Exact path a matched regular file is copied to.
    File(PathBuf),
    /// Directory matches are copied into (files) or replace (directories).
    Dir(PathBuf),
}

impl fmt::Display for RepositoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.remote, self.revision)
    }
}

/// Serialized form of an entry; only built from validated documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawEntry {
    remote: String,
    revision: String,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    sources: Option<Vec<RawSourceMapping>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSourceMapping {
    pattern: String,
    #[serde(default)]
    destination_file: Option<String>,
    #[serde(default)]
    destination_dir: Option<String>,
}

impl RawEntry {
    /// Convert the entry at `index` of a validated document.
    ///
    /// The schema already rejects entries with both or neither target, so the
    /// error arms only fire for documents that skipped validation.
    fn into_entry(self, index: usize) -> Result<RepositoryEntry> {
        let target = match (self.destination, self.sources) {
            (Some(destination), None) => Target::Destination(PathBuf::from(destination)),
            (None, Some(sources)) => Target::Sources(
                sources
                    .into_iter()
                    .enumerate()
                    .map(|(position, raw)| {
                        raw.into_mapping(&format!("{index}.sources.{position}"))
                    })
                    .collect::<Result<_>>()?,
            ),
            _ => return Err(one_of(&index.to_string())),
        };

        Ok(RepositoryEntry {
            remote: self.remote,
            revision: self.revision,
            target,
        })
    }
}

impl RawSourceMapping {
    fn into_mapping(self, path: &str) -> Result<SourceMapping> {
        let destination = match (self.destination_file, self.destination_dir) {
            (Some(file), None) => MappingDestination::File(PathBuf::from(file)),
            (None, Some(dir)) => MappingDestination::Dir(PathBuf::from(dir)),
            _ => return Err(one_of(path)),
        };

        Ok(SourceMapping {
            pattern: self.pattern,
            destination,
        })
    }
}

fn one_of(path: &str) -> Error {
    Error::Validation {
        violations: vec![format!(
            "{path}: Must validate one and only one schema (oneOf)"
        )],
    }
}

/// Parse and validate manifest text, interpolating variables from the
/// process environment.
///
/// Fails with `Error::Interpolation` on a malformed `$` placeholder, with
/// `Error::Yaml` if the text is not YAML, and with `Error::Validation`
/// (listing every violation) if it does not match the schema. No filesystem
/// or process I/O happens here.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    parse_with_env(yaml_content, |name| std::env::var(name).ok())
}

/// Like [`parse`], but resolves `$VAR` placeholders through `lookup`.
pub fn parse_with_env<F>(yaml_content: &str, lookup: F) -> Result<Manifest>
where
    F: Fn(&str) -> Option<String>,
{
    let interpolated = interpolate(yaml_content, lookup)?;
    let document: serde_yaml::Value = serde_yaml::from_str(&interpolated)?;
    schema::validate(&document)?;

    let raw: Vec<RawEntry> = serde_yaml::from_value(document)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_entry(index))
        .collect()
}

/// Read and parse a manifest file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
