//! # Manifest Schema Validation
//!
//! Validates a decoded manifest document before any domain object is built.
//! The document is walked as a generic `serde_yaml::Value` tree so that every
//! violation can be collected and reported together, rather than stopping at
//! the first field `serde` fails to deserialize.
//!
//! ## Rules
//!
//! - The root must be a non-empty sequence.
//! - Each entry is a mapping with `remote`, `revision` and exactly one of
//!   `destination` or `sources`.
//! - Each `sources` element has `pattern` and exactly one of
//!   `destinationFile` or `destinationDir`.
//! - Unknown keys are rejected at both levels; all leaf values are strings.
//! - `revision` must match [`REVISION_PATTERN`].
//!
//! Violations are rendered as `<path>: <message>`, where `<path>` is
//! `(root)` for the document itself and a dotted index/key path otherwise
//! (e.g. `0.sources.1.pattern`).

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Revisions must be abbreviated or full commit hashes.
pub const REVISION_PATTERN: &str = "^[0-9a-f]{5,40}$";

const ENTRY_KEYS: [&str; 4] = ["remote", "revision", "destination", "sources"];
const MAPPING_KEYS: [&str; 3] = ["pattern", "destinationFile", "destinationDir"];
const ROOT: &str = "(root)";

static REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REVISION_PATTERN).expect("revision pattern is a valid regex"));

/// Validate a manifest document, aggregating every violation found.
///
/// Returns `Error::Validation` listing all violations if the document does
/// not conform.
pub fn validate(document: &Value) -> Result<()> {
    let violations = violations(document);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { violations })
    }
}

/// Collect all schema violations in document order.
pub fn violations(document: &Value) -> Vec<String> {
    let mut out = Vec::new();

    match document {
        Value::Sequence(entries) => {
            if entries.is_empty() {
                out.push(format!("{ROOT}: Array must have at least 1 items"));
            }
            for (index, entry) in entries.iter().enumerate() {
                check_entry(&index.to_string(), entry, &mut out);
            }
        }
        other => out.push(invalid_type(ROOT, "array", other)),
    }

    out
}

fn check_entry(path: &str, entry: &Value, out: &mut Vec<String>) {
    let Some(map) = entry.as_mapping() else {
        out.push(invalid_type(path, "object", entry));
        return;
    };

    check_additional_properties(path, map, &ENTRY_KEYS, out);
    check_required_string(path, map, "remote", out);

    match map.get("revision") {
        None => out.push(required(path, "revision")),
        Some(Value::String(revision)) => {
            if !REVISION.is_match(revision) {
                out.push(format!(
                    "{}: Does not match pattern '{REVISION_PATTERN}'",
                    child(path, "revision")
                ));
            }
        }
        Some(other) => out.push(invalid_type(&child(path, "revision"), "string", other)),
    }

    if let Some(destination) = map.get("destination") {
        if !destination.is_string() {
            out.push(invalid_type(&child(path, "destination"), "string", destination));
        }
    }

    if let Some(sources) = map.get("sources") {
        let sources_path = child(path, "sources");
        match sources {
            Value::Sequence(mappings) => {
                for (index, mapping) in mappings.iter().enumerate() {
                    check_mapping(&child(&sources_path, &index.to_string()), mapping, out);
                }
            }
            other => out.push(invalid_type(&sources_path, "array", other)),
        }
    }

    check_one_of(path, map, "destination", "sources", out);
}

fn check_mapping(path: &str, mapping: &Value, out: &mut Vec<String>) {
    let Some(map) = mapping.as_mapping() else {
        out.push(invalid_type(path, "object", mapping));
        return;
    };

    check_additional_properties(path, map, &MAPPING_KEYS, out);
    check_required_string(path, map, "pattern", out);

    for key in ["destinationFile", "destinationDir"] {
        if let Some(value) = map.get(key) {
            if !value.is_string() {
                out.push(invalid_type(&child(path, key), "string", value));
            }
        }
    }

    check_one_of(path, map, "destinationFile", "destinationDir", out);
}

/// Exactly one of `first` / `second` must be present.
///
/// When neither is present the first alternative's missing key is reported
/// as well, so the message points at something the user can add.
fn check_one_of(path: &str, map: &Mapping, first: &str, second: &str, out: &mut Vec<String>) {
    match (map.contains_key(first), map.contains_key(second)) {
        (true, false) | (false, true) => {}
        (true, true) => out.push(one_of(path)),
        (false, false) => {
            out.push(one_of(path));
            out.push(required(path, first));
        }
    }
}

fn check_required_string(path: &str, map: &Mapping, key: &str, out: &mut Vec<String>) {
    match map.get(key) {
        None => out.push(required(path, key)),
        Some(value) if !value.is_string() => {
            out.push(invalid_type(&child(path, key), "string", value))
        }
        Some(_) => {}
    }
}

fn check_additional_properties(path: &str, map: &Mapping, allowed: &[&str], out: &mut Vec<String>) {
    for key in map.keys() {
        let name = key_name(key);
        if !allowed.contains(&name.as_str()) {
            out.push(format!(
                "{}: Additional property {name} is not allowed",
                child(path, &name)
            ));
        }
    }
}

fn child(path: &str, key: &str) -> String {
    if path == ROOT {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn required(path: &str, key: &str) -> String {
    format!("{}: {key} is required", child(path, key))
}

fn one_of(path: &str) -> String {
    format!("{path}: Must validate one and only one schema (oneOf)")
}

fn invalid_type(path: &str, expected: &str, given: &Value) -> String {
    format!(
        "{path}: Invalid type. Expected: {expected}, given: {}",
        type_name(given)
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(tagged) => type_name(&tagged.value),
    }
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        _ => format!("{key:?}"),
    }
}
