//! Storage root resolution
//!
//! The configured root wins when it exists and is a directory. Otherwise the
//! app-private directory under the platform data dir is used, created on
//! demand.

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Expand `~` and environment variables in a configured path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| Error::config(format!("Cannot expand path '{}': {}", raw, e)))
}

/// App-private data directory (`<data_dir>/filedeck`)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".filedeck"))
        .join("filedeck")
}

/// Resolve the storage root the file manager starts in
pub fn resolve_storage_root(schema: &ConfigSchema) -> Result<PathBuf> {
    if let Some(raw) = schema.general.root.as_deref() {
        let root = expand_path(raw)?;
        if root.is_dir() {
            return Ok(root);
        }
        tracing::warn!(
            root = %root.display(),
            "Configured storage root is not a directory, using app data dir"
        );
    }

    let fallback = default_data_dir().join("files");
    std::fs::create_dir_all(&fallback).map_err(|e| Error::from_io(e, &fallback))?;
    Ok(fallback)
}
