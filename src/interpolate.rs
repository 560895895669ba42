//! # Manifest Variable Interpolation
//!
//! Manifest text may reference environment variables before it is parsed as
//! YAML. The supported placeholders are:
//!
//! | Placeholder          | Result                                          |
//! |----------------------|-------------------------------------------------|
//! | `$$`                 | a literal `$`                                   |
//! | `$NAME`, `${NAME}`   | the value of `NAME`, or empty if unset          |
//! | `${NAME:-default}`   | `default` if `NAME` is unset or empty           |
//! | `${NAME-default}`    | `default` if `NAME` is unset                    |
//!
//! Names start with a letter or underscore, followed by letters, digits or
//! underscores. Any other use of `$` is rejected with
//! `Error::Interpolation`, which reports the one-based line and column of the
//! offending `$`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\$(?:(?P<escaped>\$)|(?P<named>[_a-z][_a-z0-9]*)|\{(?P<braced>[_a-z][_a-z0-9]*(?::?-[^}]*)?)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is a valid regex")
});

/// Substitute every placeholder in `text`, resolving names through `lookup`.
pub fn interpolate<F>(text: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&substitute(text, whole.start(), &caps, &lookup)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

fn substitute<F>(text: &str, offset: usize, caps: &Captures<'_>, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if caps.name("escaped").is_some() {
        return Ok("$".to_string());
    }
    if let Some(name) = caps.name("named") {
        return Ok(lookup(name.as_str()).unwrap_or_default());
    }
    if let Some(braced) = caps.name("braced") {
        return Ok(resolve_braced(braced.as_str(), lookup));
    }
    Err(invalid(text, offset))
}

fn resolve_braced<F>(body: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let name_end = body
        .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
        .unwrap_or(body.len());
    let (name, modifier) = body.split_at(name_end);
    let value = lookup(name);

    if let Some(default) = modifier.strip_prefix(":-") {
        return value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string());
    }
    if let Some(default) = modifier.strip_prefix('-') {
        return value.unwrap_or_else(|| default.to_string());
    }
    value.unwrap_or_default()
}

fn invalid(text: &str, offset: usize) -> Error {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    let fragment: String = text[offset..]
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(20)
        .collect();

    Error::Interpolation {
        line,
        column,
        fragment,
    }
}
