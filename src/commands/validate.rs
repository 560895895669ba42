//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the manifest
//! against the schema without applying it.
//!
//! On success it prints a short summary of every entry. On failure the error
//! lists every schema violation. This command is a safe, read-only operation:
//! it never clones, copies or creates the cache.

use anyhow::Result;

use gilt::config::{MappingDestination, Manifest, RepositoryEntry, Target};
use gilt::output::OutputConfig;

use super::{load_manifest, manifest_path};
use crate::cli::GlobalArgs;

/// Execute the `validate` command.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let path = manifest_path(globals)?;
    println!("Validating manifest: {}", path.display());

    let manifest = load_manifest(globals)?;
    print!("{}", summarize(&manifest, &globals.output));
    Ok(())
}

/// Render the summary printed for a valid manifest.
fn summarize(manifest: &Manifest, out: &OutputConfig) -> String {
    let mut summary = format!(
        "{} ({} {})\n",
        out.success("Manifest is valid"),
        manifest.len(),
        if manifest.len() == 1 { "entry" } else { "entries" }
    );

    for entry in manifest {
        summary.push_str(&format!("  {}\n", describe(entry, out)));
    }
    summary
}

fn describe(entry: &RepositoryEntry, out: &OutputConfig) -> String {
    let reference = out.repository(&entry.to_string());
    match &entry.target {
        Target::Destination(destination) => {
            format!("{} -> {}", reference, destination.display())
        }
        Target::Sources(sources) => {
            let mappings: Vec<String> = sources
                .iter()
                .map(|mapping| match &mapping.destination {
                    MappingDestination::File(file) => {
                        format!("{} -> {}", mapping.pattern, file.display())
                    }
                    MappingDestination::Dir(dir) => {
                        format!("{} -> {}/", mapping.pattern, dir.display())
                    }
                })
                .collect();
            format!("{} [{}]", reference, mappings.join(", "))
        }
    }
}
