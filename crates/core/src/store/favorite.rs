//! Favorited files

use super::{Backend, PathRecord, Records};
use crate::entry::{FileEntry, FileKind};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A row of `favorite_files(path, name, added_date, type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub path: PathBuf,
    pub name: String,
    pub added_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl PathRecord for FavoriteEntry {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Favorited files, most recently added first
#[derive(Debug)]
pub struct FavoriteStore {
    records: Records<FavoriteEntry>,
}

impl FavoriteStore {
    /// Open a store over `backend`
    pub fn open(backend: Backend) -> Result<Self> {
        Ok(Self {
            records: Records::open(backend)?,
        })
    }

    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            records: Records {
                backend: Backend::Memory,
                items: Default::default(),
            },
        }
    }

    /// Favorite `entry`, replacing any existing record for its path
    pub fn add(&self, entry: &FileEntry) -> Result<FavoriteEntry> {
        let record = FavoriteEntry {
            path: entry.path.clone(),
            name: entry.name.clone(),
            added_date: Utc::now(),
            kind: entry.kind,
        };
        self.records.update(|items| {
            items.retain(|f| f.path != record.path);
            items.insert(0, record.clone());
            (record, true)
        })
    }

    /// Unfavorite `path`
    pub fn remove(&self, path: &Path) -> Result<bool> {
        self.records.remove(path)
    }

    /// Remove favorites for `path` and everything below it
    pub fn remove_under(&self, path: &Path) -> Result<usize> {
        self.records.remove_under(path)
    }

    /// Whether `path` is favorited
    pub fn contains(&self, path: &Path) -> Result<bool> {
        Ok(self.records.find(path)?.is_some())
    }

    /// Flip the favorite state of `entry`; returns the new state
    pub fn toggle(&self, entry: &FileEntry) -> Result<bool> {
        if self.remove(&entry.path)? {
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }

    /// All favorites, most recently added first
    pub fn list(&self) -> Result<Vec<FavoriteEntry>> {
        self.records.snapshot()
    }
}
