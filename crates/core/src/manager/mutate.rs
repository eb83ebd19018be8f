use super::{FileManager, write_error};
use crate::cancel::CancelToken;
use crate::entry::FileEntry;
use crate::error::{Error, ErrorCode, Result};
use crate::fs::{FileSystem, FsMetadata};
use crate::naming::validate_name;
use std::path::Path;

impl<F: FileSystem> FileManager<F> {
    /// Create a directory named `name` inside `parent`
    pub fn create_folder(&self, parent: &Path, name: &str) -> Result<FileEntry> {
        validate_name(name)?;
        self.require_writable_dir(parent)?;

        let target = parent.join(name);
        if self.fs.exists(&target) {
            return Err(Error::already_exists(&target));
        }
        self.fs
            .create_dir(&target)
            .map_err(|e| write_error(e, &target))?;

        tracing::info!(path = %target.display(), "Created folder");
        self.stat(&target)
    }

    /// Rename an entry in place
    ///
    /// Records pointing at the old path are dropped.
    pub fn rename(&self, path: &Path, new_name: &str) -> Result<FileEntry> {
        validate_name(new_name)?;
        let meta = self.metadata(path)?;
        let parent = path.parent().ok_or_else(|| {
            Error::new(ErrorCode::InvalidName, "The storage root cannot be renamed")
        })?;

        let target = parent.join(new_name);
        if target == path {
            return self.stat(path);
        }
        if self.fs.exists(&target) {
            return Err(Error::already_exists(&target));
        }
        self.fs
            .rename(path, &target)
            .map_err(|e| write_error(e, path))?;

        self.forget(path, meta.is_dir);
        tracing::info!(from = %path.display(), to = %target.display(), "Renamed");
        self.stat(&target)
    }

    /// Delete a file, or a directory with everything below it
    ///
    /// Cancellation stops between entries; whatever was already removed
    /// stays removed.
    pub fn delete(&self, path: &Path, cancel: &CancelToken) -> Result<()> {
        let meta = self.metadata(path)?;
        self.remove_tree(path, &meta, cancel)?;
        self.forget(path, meta.is_dir);
        tracing::info!(path = %path.display(), is_dir = meta.is_dir, "Deleted");
        Ok(())
    }

    /// Post-order removal. Links are removed, never followed.
    pub(super) fn remove_tree(
        &self,
        path: &Path,
        meta: &FsMetadata,
        cancel: &CancelToken,
    ) -> Result<()> {
        if meta.is_dir && !meta.is_symlink {
            for child in self.read_children(path)? {
                cancel.check()?;
                let child_meta = self.metadata(&child)?;
                self.remove_tree(&child, &child_meta, cancel)?;
            }
            self.fs
                .remove_dir(path)
                .map_err(|e| write_error(e, path))
        } else {
            self.fs
                .remove_file(path)
                .map_err(|e| write_error(e, path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{LocalFs, MemoryFs};
    use crate::manager::tests::{memory_manager, tripping_manager};
    use crate::manager::{FileManager, ManagerOptions};
    use crate::store::Stores;
    use tempfile::TempDir;

    #[test]
    fn test_create_folder() {
        let manager = memory_manager(MemoryFs::new().with_dir("/r"));
        let entry = manager.create_folder(Path::new("/r"), "Photos").unwrap();

        assert!(entry.is_dir);
        assert_eq!(entry.name, "Photos");
        assert!(manager.fs().metadata(Path::new("/r/Photos")).unwrap().is_dir);
    }

    #[test]
    fn test_create_folder_errors() {
        let fs = MemoryFs::new()
            .with_dir("/r/existing")
            .with_dir("/ro")
            .with_file("/r/file.txt", "");
        fs.set_readonly("/ro", true);
        let manager = memory_manager(fs);

        let cases = [
            ("/r", "existing", ErrorCode::AlreadyExists),
            ("/r", "a/b", ErrorCode::InvalidName),
            ("/r", "  ", ErrorCode::InvalidName),
            ("/ro", "new", ErrorCode::ParentNotWritable),
            ("/missing", "new", ErrorCode::NotADirectory),
            ("/r/file.txt", "new", ErrorCode::NotADirectory),
        ];
        for (parent, name, code) in cases {
            let err = manager.create_folder(Path::new(parent), name).unwrap_err();
            assert_eq!(err.code, code, "{} / {}", parent, name);
        }
    }

    #[test]
    fn test_rename_file() {
        let manager = memory_manager(MemoryFs::new().with_file("/r/old.txt", "data"));
        let entry = manager.rename(Path::new("/r/old.txt"), "new.txt").unwrap();

        assert_eq!(entry.path, Path::new("/r/new.txt"));
        assert!(!manager.fs().exists(Path::new("/r/old.txt")));
    }

    #[test]
    fn test_rename_errors() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/r/a.txt", "")
                .with_file("/r/b.txt", ""),
        );

        let taken = manager.rename(Path::new("/r/a.txt"), "b.txt").unwrap_err();
        assert_eq!(taken.code, ErrorCode::AlreadyExists);

        let missing = manager.rename(Path::new("/r/zz.txt"), "c.txt").unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let invalid = manager.rename(Path::new("/r/a.txt"), "c:d").unwrap_err();
        assert_eq!(invalid.code, ErrorCode::InvalidName);
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let manager = memory_manager(MemoryFs::new().with_file("/r/a.txt", ""));
        let entry = manager.rename(Path::new("/r/a.txt"), "a.txt").unwrap();
        assert_eq!(entry.path, Path::new("/r/a.txt"));
    }

    #[test]
    fn test_rename_purges_records() {
        let manager = memory_manager(MemoryFs::new().with_file("/r/dir/a.txt", ""));
        manager.open(Path::new("/r/dir/a.txt")).unwrap();
        manager.add_favorite(Path::new("/r/dir")).unwrap();

        manager.rename(Path::new("/r/dir"), "renamed").unwrap();

        assert!(manager.recent().unwrap().is_empty());
        assert!(manager.favorites().unwrap().is_empty());
    }

    #[test]
    fn test_delete_tree_and_purge() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/r/d/a.txt", "")
                .with_file("/r/d/sub/b.txt", "")
                .with_file("/r/keep.txt", ""),
        );
        manager.open(Path::new("/r/d/sub/b.txt")).unwrap();
        manager.open(Path::new("/r/keep.txt")).unwrap();
        manager.add_favorite(Path::new("/r/d/a.txt")).unwrap();

        manager.delete(Path::new("/r/d"), &CancelToken::new()).unwrap();

        assert!(!manager.fs().exists(Path::new("/r/d")));
        let recent = manager.recent().unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].path, Path::new("/r/keep.txt"));
        assert!(manager.favorites().unwrap().is_empty());
    }

    #[test]
    fn test_delete_keeps_descendant_records_when_configured() {
        let fs = MemoryFs::new().with_file("/r/d/a.txt", "");
        let options = ManagerOptions {
            purge_descendants: false,
            ..ManagerOptions::default()
        };
        let manager = FileManager::new(fs, Stores::in_memory(5), options);
        manager.open(Path::new("/r/d/a.txt")).unwrap();

        manager.delete(Path::new("/r/d"), &CancelToken::new()).unwrap();
        assert_eq!(manager.recent().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing() {
        let manager = memory_manager(MemoryFs::new().with_dir("/r"));
        let err = manager.delete(Path::new("/r/nope"), &CancelToken::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_delete_readonly_parent() {
        let fs = MemoryFs::new().with_file("/ro/a.txt", "");
        fs.set_readonly("/ro", true);
        let manager = memory_manager(fs);

        let err = manager.delete(Path::new("/ro/a.txt"), &CancelToken::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParentNotWritable);
        assert!(manager.fs().exists(Path::new("/ro/a.txt")));
    }

    #[test]
    fn test_delete_cancelled() {
        let manager = memory_manager(MemoryFs::new().with_file("/r/d/a.txt", ""));
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = manager.delete(Path::new("/r/d"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
        assert!(manager.fs().exists(Path::new("/r/d/a.txt")));
    }

    #[test]
    fn test_delete_cancelled_between_entries() {
        let manager = tripping_manager(
            MemoryFs::new()
                .with_file("/r/d/a.txt", "")
                .with_file("/r/d/b.txt", "")
                .with_file("/r/d/c.txt", ""),
            1,
        );
        let cancel = manager.fs().token.clone();

        let err = manager.delete(Path::new("/r/d"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);

        let fs = &manager.fs().inner;
        assert!(!fs.exists(Path::new("/r/d/a.txt")));
        assert!(fs.exists(Path::new("/r/d/b.txt")));
        assert!(fs.exists(Path::new("/r/d/c.txt")));
    }

    #[test]
    fn test_delete_unlinks_without_descending() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/keep/precious.txt", "keep")
                .with_link("/r/d/link", "/keep"),
        );
        manager.delete(Path::new("/r/d"), &CancelToken::new()).unwrap();

        assert!(!manager.fs().exists(Path::new("/r/d")));
        assert!(manager.fs().exists(Path::new("/keep/precious.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_does_not_follow_links() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        std::fs::create_dir(&outside).unwrap();
        std::fs::write(outside.join("precious.txt"), "keep").unwrap();
        let dir = temp.path().join("dir");
        std::fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(&outside, dir.join("link")).unwrap();

        let manager = FileManager::new(LocalFs::new(), Stores::in_memory(5), ManagerOptions::default());
        manager.delete(&dir, &CancelToken::new()).unwrap();

        assert!(!dir.exists());
        assert!(outside.join("precious.txt").exists());
    }
}
