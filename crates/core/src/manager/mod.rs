//! The file manager
//!
//! [`FileManager`] is the synchronous core of every user-facing operation:
//!
//! - Browsing: [`FileManager::list_dir`], [`FileManager::stat`]
//! - Search: [`FileManager::search`] and the lazy [`Search`] iterator
//! - Mutation: create, rename, delete
//! - Transfer: copy, copy with a resolved name, move, paste
//! - Records: recents and favorites, kept consistent with mutations
//!
//! All filesystem access goes through the [`FileSystem`] capability it was
//! built with. Long-running operations take a [`CancelToken`].
//!
//! [`CancelToken`]: crate::cancel::CancelToken

mod mutate;
mod search;
mod transfer;

pub use search::Search;

use crate::config::ConfigSchema;
use crate::entry::{FileEntry, display_name, is_hidden_name, sort_entries};
use crate::error::{Error, ErrorCode, Result};
use crate::fs::{FileSystem, FsMetadata};
use crate::store::{FavoriteEntry, RecentEntry, Stores};
use std::io::ErrorKind;
use std::path::Path;

/// Behavioural knobs, usually taken from the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Include dot-files in listings and search
    pub show_hidden: bool,
    /// Cap on results returned by [`FileManager::search`]
    pub max_search_results: usize,
    /// Drop records below a directory that is deleted, renamed or moved
    pub purge_descendants: bool,
    /// Largest file [`FileManager::read_text`] will load
    pub max_text_bytes: u64,
    /// Word used in resolved copy names, e.g. `a (copia 1).txt`
    pub duplicate_label: String,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self::from(&ConfigSchema::default())
    }
}

impl From<&ConfigSchema> for ManagerOptions {
    fn from(schema: &ConfigSchema) -> Self {
        Self {
            show_hidden: schema.general.show_hidden,
            max_search_results: schema.search.max_results,
            purge_descendants: schema.store.purge_descendants,
            max_text_bytes: schema.viewer.max_text_bytes,
            duplicate_label: schema.copy.duplicate_label.clone(),
        }
    }
}

/// File operations over a filesystem capability plus the record stores
#[derive(Debug)]
pub struct FileManager<F> {
    fs: F,
    stores: Stores,
    options: ManagerOptions,
}

impl<F: FileSystem> FileManager<F> {
    pub fn new(fs: F, stores: Stores, options: ManagerOptions) -> Self {
        Self {
            fs,
            stores,
            options,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// Describe a single path
    pub fn stat(&self, path: &Path) -> Result<FileEntry> {
        let meta = self.metadata(path)?;
        Ok(FileEntry::from_metadata(path, &meta))
    }

    /// Immediate children of `dir`, directories first then by name
    ///
    /// Hidden entries are skipped unless `show_hidden` is set. Children that
    /// disappear between the listing and the stat are skipped.
    pub fn list_dir(&self, dir: &Path) -> Result<Vec<FileEntry>> {
        self.require_dir(dir)?;
        let children = self.read_children(dir)?;

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            if !self.options.show_hidden && is_hidden_name(&display_name(&child)) {
                continue;
            }
            match self.fs.metadata(&child) {
                Ok(meta) => entries.push(FileEntry::from_metadata(child, &meta)),
                Err(e) => {
                    tracing::debug!(path = %child.display(), error = %e, "Skipping entry");
                }
            }
        }
        sort_entries(&mut entries);

        tracing::debug!(dir = %dir.display(), count = entries.len(), "Listed directory");
        Ok(entries)
    }

    /// Read a file as UTF-8 text for the viewer
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let meta = self.metadata(path)?;
        if meta.is_dir {
            return Err(Error::new(
                ErrorCode::NotText,
                format!("'{}' is a directory", display_name(path)),
            ));
        }
        if meta.len > self.options.max_text_bytes {
            return Err(Error::new(
                ErrorCode::FileTooLarge,
                format!(
                    "'{}' is too large to view ({} bytes, limit {})",
                    display_name(path),
                    meta.len,
                    self.options.max_text_bytes
                ),
            ));
        }

        let bytes = self.fs.read(path).map_err(|e| Error::from_io(e, path))?;
        String::from_utf8(bytes).map_err(|e| {
            Error::new(
                ErrorCode::NotText,
                format!("'{}' is not a text file", display_name(path)),
            )
            .with_source(e)
        })
    }

    /// Replace the contents of an existing text file
    pub fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        let meta = self.metadata(path)?;
        if meta.is_dir {
            return Err(Error::new(
                ErrorCode::NotText,
                format!("'{}' is a directory", display_name(path)),
            ));
        }
        self.fs
            .write(path, contents.as_bytes())
            .map_err(|e| Error::from_io(e, path))?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "Saved text file");
        Ok(())
    }

    /// Open an entry: files are recorded as recently accessed
    pub fn open(&self, path: &Path) -> Result<FileEntry> {
        let entry = self.stat(path)?;
        if !entry.is_dir {
            self.stores.recent.touch(&entry)?;
        }
        Ok(entry)
    }

    /// Recently opened files, most recent first
    pub fn recent(&self) -> Result<Vec<RecentEntry>> {
        self.stores.recent.list()
    }

    pub fn clear_recent(&self) -> Result<()> {
        self.stores.recent.clear()
    }

    /// Favorites, most recently added first
    pub fn favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.stores.favorites.list()
    }

    pub fn is_favorite(&self, path: &Path) -> Result<bool> {
        self.stores.favorites.contains(path)
    }

    pub fn add_favorite(&self, path: &Path) -> Result<FavoriteEntry> {
        let entry = self.stat(path)?;
        self.stores.favorites.add(&entry)
    }

    /// Remove a favorite; the path does not have to exist any more
    pub fn remove_favorite(&self, path: &Path) -> Result<bool> {
        self.stores.favorites.remove(path)
    }

    /// Flip favorite status, returning whether `path` is now a favorite
    pub fn toggle_favorite(&self, path: &Path) -> Result<bool> {
        let entry = self.stat(path)?;
        self.stores.favorites.toggle(&entry)
    }

    fn metadata(&self, path: &Path) -> Result<FsMetadata> {
        self.fs.metadata(path).map_err(|e| Error::from_io(e, path))
    }

    fn read_children(&self, dir: &Path) -> Result<Vec<std::path::PathBuf>> {
        self.fs.read_dir(dir).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => Error::access_denied(dir).with_source(e),
            _ => Error::from_io(e, dir),
        })
    }

    /// `dir` exists and is a directory
    fn require_dir(&self, dir: &Path) -> Result<FsMetadata> {
        let meta = self.fs.metadata(dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::not_a_directory(dir)
                .with_context("The directory does not exist")
                .with_source(e),
            _ => Error::from_io(e, dir),
        })?;
        if !meta.is_dir {
            return Err(Error::not_a_directory(dir));
        }
        Ok(meta)
    }

    /// `dir` exists, is a directory and accepts new children
    fn require_writable_dir(&self, dir: &Path) -> Result<FsMetadata> {
        let meta = self.require_dir(dir)?;
        if meta.readonly {
            return Err(Error::parent_not_writable(dir));
        }
        Ok(meta)
    }

    /// Drop records for a path that no longer exists
    ///
    /// The filesystem change already happened, so a store failure is logged
    /// rather than reported.
    fn forget(&self, path: &Path, is_dir: bool) {
        let descendants = is_dir && self.options.purge_descendants;
        if let Err(e) = self.stores.purge(path, descendants) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to update records");
        }
    }
}

/// Map a write failure inside a directory to the caller-facing error
fn write_error(err: std::io::Error, target: &Path) -> Error {
    match err.kind() {
        ErrorKind::PermissionDenied => {
            Error::parent_not_writable(target.parent().unwrap_or(target)).with_source(err)
        }
        _ => Error::from_io(err, target),
    }
}
