//! File-name validation and collision resolution

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("static pattern"));

/// Reject blank names, names with path separators or reserved characters,
/// and the `.`/`..` pseudo-entries
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid(name) {
        return Ok(());
    }
    let err = Error::invalid_name(name);
    let cleaned = sanitize_name(name);
    if is_valid(&cleaned) {
        return Err(err.with_suggestion(format!("Try '{}'", cleaned)));
    }
    Err(err)
}

fn is_valid(name: &str) -> bool {
    !(name.trim().is_empty() || name == "." || name == ".." || INVALID_CHARS.is_match(name))
}

/// Strip reserved characters and surrounding whitespace
pub fn sanitize_name(name: &str) -> String {
    INVALID_CHARS.replace_all(name, "").trim().to_string()
}

/// Split a name into base and extension (extension keeps its dot)
///
/// A leading dot does not start an extension: `.bashrc` has none.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

/// Name of the `counter`-th duplicate, e.g. `report (copia 2).pdf`
pub fn duplicate_name(name: &str, label: &str, counter: usize) -> String {
    let (base, ext) = split_name(name);
    format!("{} ({} {}){}", base, label, counter, ext)
}

/// First free path for `name` inside `dir`
///
/// Returns `dir/name` when free, otherwise the first free duplicate name
/// counting up from 1.
pub fn resolve_unique_path(
    dir: &Path,
    name: &str,
    label: &str,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    let candidate = dir.join(name);
    if !exists(&candidate) {
        return candidate;
    }
    (1..)
        .map(|counter| dir.join(duplicate_name(name, label, counter)))
        .find(|candidate| !exists(candidate))
        .unwrap_or(candidate)
}
