//! JSON document persistence shared by the record stores
//!
//! A document is a JSON array of records written through a sibling temp file
//! and a rename, so readers never see a torn file.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a store keeps its records
#[derive(Debug, Clone)]
pub enum Backend {
    /// Nothing is written; records live as long as the store
    Memory,
    /// Records are written to this JSON file after every change
    File(PathBuf),
}

impl Backend {
    /// Load all records, treating a missing file as empty
    ///
    /// A file that fails to parse is logged and ignored; the next save
    /// replaces it.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let Backend::File(path) = self else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Store document is corrupted, starting empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Persist all records
    pub fn save<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let Backend::File(path) = self else {
            return Ok(());
        };
        write_atomic(path, &serde_json::to_vec_pretty(records)?)
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::from_io(e, parent))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(|e| Error::from_io(e, &tmp))?;
    fs::rename(&tmp, path).map_err(|e| {
        Error::store(format!("Failed to replace {}: {}", path.display(), e)).with_source(e)
    })
}
