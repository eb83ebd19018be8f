//! Async facade over [`FileManager`]
//!
//! Every operation runs on tokio's blocking pool so callers on an async
//! runtime never block on disk I/O. The service owns the shared clipboard
//! and is cheap to clone.

use crate::cancel::CancelToken;
use crate::clipboard::{Clipboard, PendingOperation};
use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::manager::FileManager;
use crate::store::{FavoriteEntry, RecentEntry};
use std::path::PathBuf;
use std::sync::Arc;

/// Shareable handle to a file manager and its clipboard
pub struct FileService<F> {
    manager: Arc<FileManager<F>>,
    clipboard: Arc<Clipboard>,
}

impl<F> Clone for FileService<F> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            clipboard: Arc::clone(&self.clipboard),
        }
    }
}

impl<F: FileSystem> FileService<F> {
    pub fn new(manager: FileManager<F>) -> Self {
        Self::with_clipboard(manager, Arc::new(Clipboard::new()))
    }

    /// Share a clipboard between several services
    pub fn with_clipboard(manager: FileManager<F>, clipboard: Arc<Clipboard>) -> Self {
        Self {
            manager: Arc::new(manager),
            clipboard,
        }
    }

    pub fn manager(&self) -> &FileManager<F> {
        &self.manager
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    async fn run<T, Op>(&self, op: Op) -> Result<T>
    where
        T: Send + 'static,
        Op: FnOnce(&FileManager<F>) -> Result<T> + Send + 'static,
    {
        let manager = Arc::clone(&self.manager);
        tokio::task::spawn_blocking(move || op(&manager))
            .await
            .map_err(|e| Error::internal(format!("File operation task failed: {}", e)).with_source(e))?
    }

    pub async fn list_dir(&self, dir: impl Into<PathBuf>) -> Result<Vec<FileEntry>> {
        let dir = dir.into();
        self.run(move |m| m.list_dir(&dir)).await
    }

    pub async fn stat(&self, path: impl Into<PathBuf>) -> Result<FileEntry> {
        let path = path.into();
        self.run(move |m| m.stat(&path)).await
    }

    pub async fn search(
        &self,
        root: impl Into<PathBuf>,
        query: impl Into<String>,
        cancel: CancelToken,
    ) -> Result<Vec<FileEntry>> {
        let (root, query) = (root.into(), query.into());
        self.run(move |m| m.search(&root, &query, &cancel)).await
    }

    pub async fn create_folder(
        &self,
        parent: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Result<FileEntry> {
        let (parent, name) = (parent.into(), name.into());
        self.run(move |m| m.create_folder(&parent, &name)).await
    }

    pub async fn rename(
        &self,
        path: impl Into<PathBuf>,
        new_name: impl Into<String>,
    ) -> Result<FileEntry> {
        let (path, new_name) = (path.into(), new_name.into());
        self.run(move |m| m.rename(&path, &new_name)).await
    }

    pub async fn delete(&self, path: impl Into<PathBuf>, cancel: CancelToken) -> Result<()> {
        let path = path.into();
        self.run(move |m| m.delete(&path, &cancel)).await
    }

    pub async fn copy(
        &self,
        src: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        cancel: CancelToken,
    ) -> Result<FileEntry> {
        let (src, dest_dir) = (src.into(), dest_dir.into());
        self.run(move |m| m.copy(&src, &dest_dir, &cancel)).await
    }

    pub async fn copy_resolved(
        &self,
        src: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        cancel: CancelToken,
    ) -> Result<FileEntry> {
        let (src, dest_dir) = (src.into(), dest_dir.into());
        self.run(move |m| m.copy_resolved(&src, &dest_dir, &cancel))
            .await
    }

    pub async fn move_to(
        &self,
        src: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        cancel: CancelToken,
    ) -> Result<FileEntry> {
        let (src, dest_dir) = (src.into(), dest_dir.into());
        self.run(move |m| m.move_to(&src, &dest_dir, &cancel)).await
    }

    pub fn start_copy(&self, path: impl Into<PathBuf>) {
        self.clipboard.start_copy(path);
    }

    pub fn start_move(&self, path: impl Into<PathBuf>) {
        self.clipboard.start_move(path);
    }

    pub fn cancel_pending(&self) {
        self.clipboard.cancel();
    }

    pub fn pending(&self) -> PendingOperation {
        self.clipboard.current()
    }

    /// Paste the staged operation into `dest_dir`
    pub async fn paste(&self, dest_dir: impl Into<PathBuf>, cancel: CancelToken) -> Result<FileEntry> {
        let dest_dir = dest_dir.into();
        let clipboard = Arc::clone(&self.clipboard);
        self.run(move |m| m.paste(&clipboard, &dest_dir, &cancel))
            .await
    }

    pub async fn read_text(&self, path: impl Into<PathBuf>) -> Result<String> {
        let path = path.into();
        self.run(move |m| m.read_text(&path)).await
    }

    pub async fn write_text(&self, path: impl Into<PathBuf>, contents: String) -> Result<()> {
        let path = path.into();
        self.run(move |m| m.write_text(&path, &contents)).await
    }

    pub async fn open(&self, path: impl Into<PathBuf>) -> Result<FileEntry> {
        let path = path.into();
        self.run(move |m| m.open(&path)).await
    }

    pub async fn recent(&self) -> Result<Vec<RecentEntry>> {
        self.run(|m| m.recent()).await
    }

    pub async fn clear_recent(&self) -> Result<()> {
        self.run(|m| m.clear_recent()).await
    }

    pub async fn favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.run(|m| m.favorites()).await
    }

    pub async fn is_favorite(&self, path: impl Into<PathBuf>) -> Result<bool> {
        let path = path.into();
        self.run(move |m| m.is_favorite(&path)).await
    }

    pub async fn add_favorite(&self, path: impl Into<PathBuf>) -> Result<FavoriteEntry> {
        let path = path.into();
        self.run(move |m| m.add_favorite(&path)).await
    }

    pub async fn remove_favorite(&self, path: impl Into<PathBuf>) -> Result<bool> {
        let path = path.into();
        self.run(move |m| m.remove_favorite(&path)).await
    }

    pub async fn toggle_favorite(&self, path: impl Into<PathBuf>) -> Result<bool> {
        let path = path.into();
        self.run(move |m| m.toggle_favorite(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::fs::{LocalFs, MemoryFs};
    use crate::manager::ManagerOptions;
    use crate::store::Stores;
    use tempfile::TempDir;

    fn service(fs: MemoryFs) -> FileService<MemoryFs> {
        FileService::new(FileManager::new(fs, Stores::in_memory(10), ManagerOptions::default()))
    }

    #[tokio::test]
    async fn test_list_and_create() {
        let service = service(MemoryFs::new().with_dir("/r"));
        service.create_folder("/r", "new").await.unwrap();

        let entries = service.list_dir("/r").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "new");
    }

    #[tokio::test]
    async fn test_paste_flow_shares_clipboard_across_clones() {
        let fs = MemoryFs::new()
            .with_file("/a/x.txt", "x")
            .with_dir("/d1")
            .with_dir("/d2");
        fs.set_readonly("/d1", true);
        let service = service(fs);
        let other = service.clone();

        service.start_copy("/a/x.txt");
        assert_eq!(other.pending(), PendingOperation::CopyStaged("/a/x.txt".into()));

        let err = other.paste("/d1", CancelToken::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ParentNotWritable);
        assert!(!service.pending().is_idle());

        other.paste("/d2", CancelToken::new()).await.unwrap();
        assert!(service.pending().is_idle());
        assert!(service.stat("/d2/x.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_pending() {
        let service = service(MemoryFs::new().with_file("/a/x.txt", "x"));
        service.start_move("/a/x.txt");
        service.cancel_pending();

        let err = service.paste("/a", CancelToken::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingStaged);
    }

    #[tokio::test]
    async fn test_delete_removes_favorite() {
        let service = service(MemoryFs::new().with_file("/r/f.txt", "x"));
        assert!(service.toggle_favorite("/r/f.txt").await.unwrap());
        assert!(service.is_favorite("/r/f.txt").await.unwrap());

        service.delete("/r/f.txt", CancelToken::new()).await.unwrap();
        assert!(!service.is_favorite("/r/f.txt").await.unwrap());
        assert!(service.favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_searches() {
        let service = service(
            MemoryFs::new()
                .with_file("/r/a/match-1.txt", "")
                .with_file("/r/b/match-2.txt", "")
                .with_file("/r/c/other.txt", ""),
        );

        let (first, second) = tokio::join!(
            service.search("/r", "match", CancelToken::new()),
            service.search("/r", "other", CancelToken::new()),
        );
        assert_eq!(first.unwrap().len(), 2);
        assert_eq!(second.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_text_round_trip_on_disk() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "draft").unwrap();
        let service = FileService::new(FileManager::new(
            LocalFs::new(),
            Stores::in_memory(10),
            ManagerOptions::default(),
        ));

        service.write_text(&file, "final".to_string()).await.unwrap();
        assert_eq!(service.read_text(&file).await.unwrap(), "final");

        service.open(&file).await.unwrap();
        assert_eq!(service.recent().await.unwrap()[0].path, file);
        service.clear_recent().await.unwrap();
        assert!(service.recent().await.unwrap().is_empty());
    }
}
