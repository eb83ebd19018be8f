//! Persistent records of recently-opened and favorited files
//!
//! Both stores are keyed by absolute path and hold lightweight pointers that
//! are independent of the filesystem's own metadata. Records are kept in
//! memory behind a lock and written through to a JSON document on every
//! change.

mod document;
mod favorite;
mod recent;

pub use document::Backend;
pub use favorite::{FavoriteEntry, FavoriteStore};
pub use recent::{RecentEntry, RecentStore};

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::RwLock;

/// File name of the recent-files document
pub const RECENT_FILE: &str = "recent.json";
/// File name of the favorites document
pub const FAVORITES_FILE: &str = "favorites.json";

/// Records that are addressed by a filesystem path
pub trait PathRecord {
    /// The path this record points to
    fn path(&self) -> &Path;
}

/// Ordered record collection with write-through persistence
#[derive(Debug)]
struct Records<T> {
    backend: Backend,
    items: RwLock<Vec<T>>,
}

impl<T> Records<T>
where
    T: Clone + Serialize + DeserializeOwned + PathRecord,
{
    fn open(backend: Backend) -> Result<Self> {
        let items = backend.load()?;
        Ok(Self {
            backend,
            items: RwLock::new(items),
        })
    }

    fn snapshot(&self) -> Result<Vec<T>> {
        let guard = self
            .items
            .read()
            .map_err(|_| Error::internal("Failed to acquire store read lock"))?;
        Ok(guard.clone())
    }

    fn find(&self, path: &Path) -> Result<Option<T>> {
        let guard = self
            .items
            .read()
            .map_err(|_| Error::internal("Failed to acquire store read lock"))?;
        Ok(guard.iter().find(|r| r.path() == path).cloned())
    }

    /// Apply `f` and persist when it reports a change
    fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> (R, bool)) -> Result<R> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| Error::internal("Failed to acquire store write lock"))?;
        let (result, changed) = f(&mut guard);
        if changed {
            self.backend.save(&guard)?;
        }
        Ok(result)
    }

    fn remove(&self, path: &Path) -> Result<bool> {
        self.update(|items| {
            let before = items.len();
            items.retain(|r| r.path() != path);
            let removed = items.len() != before;
            (removed, removed)
        })
    }

    fn remove_under(&self, path: &Path) -> Result<usize> {
        self.update(|items| {
            let before = items.len();
            items.retain(|r| !r.path().starts_with(path));
            let removed = before - items.len();
            (removed, removed > 0)
        })
    }
}

/// Both record stores, opened together from one data directory
#[derive(Debug)]
pub struct Stores {
    pub recent: RecentStore,
    pub favorites: FavoriteStore,
}

impl Stores {
    /// Open the JSON-backed stores under `data_dir`
    pub fn open(data_dir: &Path, recent_limit: usize) -> Result<Self> {
        Ok(Self {
            recent: RecentStore::open(Backend::File(data_dir.join(RECENT_FILE)), recent_limit)?,
            favorites: FavoriteStore::open(Backend::File(data_dir.join(FAVORITES_FILE)))?,
        })
    }

    /// Stores that are never written to disk
    pub fn in_memory(recent_limit: usize) -> Self {
        Self {
            recent: RecentStore::in_memory(recent_limit),
            favorites: FavoriteStore::in_memory(),
        }
    }

    /// Drop records for `path`, and for everything below it when
    /// `descendants` is set
    pub fn purge(&self, path: &Path, descendants: bool) -> Result<usize> {
        let removed = if descendants {
            self.recent.remove_under(path)? + self.favorites.remove_under(path)?
        } else {
            usize::from(self.recent.remove(path)?) + usize::from(self.favorites.remove(path)?)
        };
        if removed > 0 {
            tracing::debug!(path = %path.display(), removed, "Purged stale records");
        }
        Ok(removed)
    }
}
