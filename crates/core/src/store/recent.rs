//! Recently-opened files

use super::{Backend, PathRecord, Records};
use crate::entry::{FileEntry, FileKind};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A row of `recent_files(path, name, last_accessed, type, size)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: PathBuf,
    pub name: String,
    pub last_accessed: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: u64,
}

impl PathRecord for RecentEntry {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Recently-opened files, most recent first, capped at `limit`
#[derive(Debug)]
pub struct RecentStore {
    records: Records<RecentEntry>,
    limit: usize,
}

impl RecentStore {
    /// Open a store over `backend`, trimming it to `limit`
    pub fn open(backend: Backend, limit: usize) -> Result<Self> {
        let store = Self {
            records: Records::open(backend)?,
            limit,
        };
        store.records.update(|items| {
            items.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
            let before = items.len();
            items.truncate(limit);
            ((), items.len() != before)
        })?;
        Ok(store)
    }

    /// A store that is never written to disk
    pub fn in_memory(limit: usize) -> Self {
        Self {
            records: Records {
                backend: Backend::Memory,
                items: Default::default(),
            },
            limit,
        }
    }

    /// Record an access to `entry` now
    pub fn touch(&self, entry: &FileEntry) -> Result<RecentEntry> {
        self.touch_at(entry, Utc::now())
    }

    /// Record an access to `entry` at `at`
    ///
    /// Inserts a new record or refreshes the existing one, then evicts the
    /// oldest records beyond the limit.
    pub fn touch_at(&self, entry: &FileEntry, at: DateTime<Utc>) -> Result<RecentEntry> {
        let record = RecentEntry {
            path: entry.path.clone(),
            name: entry.name.clone(),
            last_accessed: at,
            kind: entry.kind,
            size: entry.size,
        };
        let limit = self.limit;
        self.records.update(|items| {
            items.retain(|r| r.path != record.path);
            items.insert(0, record.clone());
            items.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
            items.truncate(limit);
            (record, true)
        })
    }

    /// All records, most recent first
    pub fn list(&self) -> Result<Vec<RecentEntry>> {
        self.records.snapshot()
    }

    /// The record for `path`, if any
    pub fn get(&self, path: &Path) -> Result<Option<RecentEntry>> {
        self.records.find(path)
    }

    /// Remove the record for `path`
    pub fn remove(&self, path: &Path) -> Result<bool> {
        self.records.remove(path)
    }

    /// Remove records for `path` and everything below it
    pub fn remove_under(&self, path: &Path) -> Result<usize> {
        self.records.remove_under(path)
    }

    /// Remove every record
    pub fn clear(&self) -> Result<()> {
        self.records.update(|items| {
            let changed = !items.is_empty();
            items.clear();
            ((), changed)
        })
    }

    /// Maximum number of records kept
    pub fn limit(&self) -> usize {
        self.limit
    }
}
