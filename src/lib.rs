//! # gilt
//!
//! This library overlays pinned revisions of external Git repositories onto a
//! local project tree. It is used by the `gilt` command-line tool but can be
//! embedded in other applications that vendor content from Git.
//!
//! ## Quick Example
//!
//! ```
//! use gilt::cache::CloneCache;
//! use gilt::config::{self, Target};
//!
//! let manifest = config::parse(r#"
//! - remote: https://example.com/user/repo.git
//!   revision: abc1234
//!   destination: vendor/repo
//! "#).unwrap();
//! assert_eq!(manifest.len(), 1);
//! assert!(matches!(manifest[0].target, Target::Destination(_)));
//!
//! let cache = CloneCache::new("/tmp/gilt-cache");
//! assert!(cache
//!     .clone_dir(&manifest[0].remote, &manifest[0].revision)
//!     .ends_with("https---example.com-user-repo.git-abc1234"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`config`, `interpolate`, `schema`)**: The `gilt.yml`
//!   document. Environment placeholders are substituted first, then it is
//!   validated against a fixed schema, reporting every violation at once,
//!   before any entry is built.
//! - **Clone cache (`cache`)**: One directory per (remote, revision) pair,
//!   addressed by a pure function of the two.
//! - **Revision pinning (`repository`, `git`)**: A missing clone is created
//!   with `git clone` and pinned with `git reset --hard`. An existing one is
//!   reused untouched.
//! - **Materialization (`extract`, `projector`)**: Whole-tree entries are
//!   written with `git checkout-index`; selective entries copy glob matches
//!   with file/directory aware semantics.
//! - **Overlay (`overlay`)**: Runs every entry in order and stops at the
//!   first failure.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod filesystem;
pub mod git;
pub mod interpolate;
pub mod output;
pub mod overlay;
pub mod path;
pub mod projector;
pub mod repository;
pub mod schema;

#[cfg(test)]
mod cache_proptest;
