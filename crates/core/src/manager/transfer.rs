use super::{FileManager, write_error};
use crate::cancel::CancelToken;
use crate::clipboard::{Clipboard, PendingOperation};
use crate::entry::FileEntry;
use crate::error::{Error, ErrorCode, Result};
use crate::fs::{FileSystem, FsMetadata};
use crate::naming::resolve_unique_path;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

impl<F: FileSystem> FileManager<F> {
    /// Copy `src` into `dest_dir`, keeping its name
    ///
    /// Fails with `AlreadyExists` when the name is taken. A failure part way
    /// through leaves whatever was already copied in place.
    pub fn copy(&self, src: &Path, dest_dir: &Path, cancel: &CancelToken) -> Result<FileEntry> {
        let (meta, target) = self.prepare_transfer(src, dest_dir)?;
        if self.fs.exists(&target) {
            return Err(Error::already_exists(&target));
        }
        self.copy_tree(src, &meta, &target, cancel)?;
        tracing::info!(from = %src.display(), to = %target.display(), "Copied");
        self.stat(&target)
    }

    /// Copy `src` into `dest_dir`, picking a free duplicate name on collision
    pub fn copy_resolved(
        &self,
        src: &Path,
        dest_dir: &Path,
        cancel: &CancelToken,
    ) -> Result<FileEntry> {
        let (meta, target) = self.prepare_transfer(src, dest_dir)?;
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = resolve_unique_path(dest_dir, &name, &self.options.duplicate_label, |p| {
            self.fs.exists(p)
        });
        self.copy_tree(src, &meta, &target, cancel)?;
        tracing::info!(from = %src.display(), to = %target.display(), "Copied");
        self.stat(&target)
    }

    /// Move `src` into `dest_dir`
    ///
    /// A same-volume move is a rename. Across volumes the tree is copied and
    /// then the source deleted. If either step fails the destination copy is
    /// removed again, so the entry never ends up in both places.
    pub fn move_to(&self, src: &Path, dest_dir: &Path, cancel: &CancelToken) -> Result<FileEntry> {
        let (meta, target) = self.prepare_transfer(src, dest_dir)?;
        if self.fs.exists(&target) {
            return Err(Error::already_exists(&target));
        }

        match self.fs.rename(src, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                tracing::debug!(from = %src.display(), to = %target.display(), "Moving across volumes");
                self.move_across_volumes(src, &meta, &target, cancel)?;
            }
            Err(e) => return Err(write_error(e, &target)),
        }

        self.forget(src, meta.is_dir);
        tracing::info!(from = %src.display(), to = %target.display(), "Moved");
        self.stat(&target)
    }

    /// Run the operation staged on `clipboard` with `dest_dir` as target
    ///
    /// A staged copy uses [`FileManager::copy_resolved`], a staged move uses
    /// [`FileManager::move_to`]. On success the clipboard returns to idle
    /// unless something else was staged meanwhile; on failure it keeps the
    /// staged operation so the paste can be retried elsewhere.
    pub fn paste(
        &self,
        clipboard: &Clipboard,
        dest_dir: &Path,
        cancel: &CancelToken,
    ) -> Result<FileEntry> {
        let (operation, generation) = clipboard.snapshot();
        let entry = match &operation {
            PendingOperation::Idle => {
                return Err(Error::new(ErrorCode::NothingStaged, "Nothing to paste")
                    .with_suggestion("Copy or cut an entry first"));
            }
            PendingOperation::CopyStaged(src) => self.copy_resolved(src, dest_dir, cancel),
            PendingOperation::MoveStaged(src) => self.move_to(src, dest_dir, cancel),
        };

        match entry {
            Ok(entry) => {
                clipboard.complete(generation);
                Ok(entry)
            }
            Err(e) => {
                tracing::warn!(
                    operation = operation.label(),
                    dest = %dest_dir.display(),
                    error = %e.user_message(),
                    "Paste failed; operation stays staged"
                );
                Err(e)
            }
        }
    }

    /// Shared checks for copy and move; returns source metadata and the
    /// same-name target inside `dest_dir`
    fn prepare_transfer(&self, src: &Path, dest_dir: &Path) -> Result<(FsMetadata, PathBuf)> {
        let meta = self.metadata(src)?;
        let name = src.file_name().ok_or_else(|| {
            Error::new(
                ErrorCode::InvalidName,
                format!("'{}' has no file name", src.display()),
            )
        })?;
        self.require_writable_dir(dest_dir)?;
        if meta.is_dir && dest_dir.starts_with(src) {
            return Err(Error::recursive_target(src));
        }
        Ok((meta, dest_dir.join(name)))
    }

    /// Pre-order copy of a file or directory tree to `target`
    ///
    /// Symbolic links are recreated with the same target, never followed.
    fn copy_tree(
        &self,
        src: &Path,
        meta: &FsMetadata,
        target: &Path,
        cancel: &CancelToken,
    ) -> Result<()> {
        cancel.check()?;
        if meta.is_symlink {
            let link = self.fs.read_link(src).map_err(|e| Error::from_io(e, src))?;
            self.fs
                .symlink(&link, target)
                .map_err(|e| write_error(e, target))?;
            return Ok(());
        }
        if !meta.is_dir {
            self.fs
                .copy_file(src, target)
                .map_err(|e| write_error(e, target))?;
            return Ok(());
        }

        self.fs
            .create_dir(target)
            .map_err(|e| write_error(e, target))?;
        for child in self.read_children(src)? {
            let child_meta = self.metadata(&child)?;
            let Some(name) = child.file_name() else {
                continue;
            };
            self.copy_tree(&child, &child_meta, &target.join(name), cancel)?;
        }
        Ok(())
    }

    fn move_across_volumes(
        &self,
        src: &Path,
        meta: &FsMetadata,
        target: &Path,
        cancel: &CancelToken,
    ) -> Result<()> {
        if let Err(e) = self.copy_tree(src, meta, target, cancel) {
            self.discard(target);
            return Err(e.with_context("The move was aborted and the partial copy removed"));
        }

        // Deleting the source is not cancellable: stopping half way would
        // leave the entry split between two places.
        if let Err(e) = self.remove_tree(src, meta, &CancelToken::new()) {
            self.discard(target);
            return Err(e.with_context("The source could not be removed, so the copy was undone"));
        }
        Ok(())
    }

    /// Best-effort removal of a partial transfer target
    fn discard(&self, target: &Path) {
        let Ok(meta) = self.fs.metadata(target) else {
            return;
        };
        if let Err(e) = self.remove_tree(target, &meta, &CancelToken::new()) {
            tracing::warn!(path = %target.display(), error = %e, "Failed to clean up partial copy");
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
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn read(manager: &FileManager<MemoryFs>, path: &str) -> String {
        manager.read_text(Path::new(path)).unwrap()
    }

    #[test]
    fn test_copy_file() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/report.pdf", "pdf")
                .with_dir("/b"),
        );
        let entry = manager
            .copy(Path::new("/a/report.pdf"), Path::new("/b"), &CancelToken::new())
            .unwrap();

        assert_eq!(entry.path, Path::new("/b/report.pdf"));
        assert_eq!(read(&manager, "/b/report.pdf"), "pdf");
        assert!(manager.fs().exists(Path::new("/a/report.pdf")));
    }

    #[test]
    fn test_copy_tree_is_recursive() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/dir/one.txt", "1")
                .with_file("/a/dir/sub/two.txt", "2")
                .with_dir("/a/dir/empty")
                .with_dir("/b"),
        );
        manager
            .copy(Path::new("/a/dir"), Path::new("/b"), &CancelToken::new())
            .unwrap();

        assert_eq!(read(&manager, "/b/dir/one.txt"), "1");
        assert_eq!(read(&manager, "/b/dir/sub/two.txt"), "2");
        assert!(manager.fs().metadata(Path::new("/b/dir/empty")).unwrap().is_dir);
    }

    #[test]
    fn test_copy_collision_fails() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/x.txt", "new")
                .with_file("/b/x.txt", "old"),
        );
        let err = manager
            .copy(Path::new("/a/x.txt"), Path::new("/b"), &CancelToken::new())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(read(&manager, "/b/x.txt"), "old");
    }

    #[test]
    fn test_copy_into_itself_is_rejected() {
        let manager = memory_manager(MemoryFs::new().with_dir("/a/dir/sub"));
        let cancel = CancelToken::new();

        let err = manager
            .copy(Path::new("/a/dir"), Path::new("/a/dir/sub"), &cancel)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RecursiveTarget);

        let err = manager
            .move_to(Path::new("/a/dir"), Path::new("/a/dir"), &cancel)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RecursiveTarget);
    }

    #[test]
    fn test_copy_to_sibling_with_shared_prefix_is_allowed() {
        let manager = memory_manager(MemoryFs::new().with_dir("/a/dir").with_dir("/a/dir2"));
        manager
            .copy(Path::new("/a/dir"), Path::new("/a/dir2"), &CancelToken::new())
            .unwrap();
        assert!(manager.fs().exists(Path::new("/a/dir2/dir")));
    }

    #[test]
    fn test_copy_destination_errors() {
        let fs = MemoryFs::new()
            .with_file("/a/x.txt", "")
            .with_dir("/ro")
            .with_file("/file", "");
        fs.set_readonly("/ro", true);
        let manager = memory_manager(fs);
        let cancel = CancelToken::new();

        let cases = [
            ("/a/x.txt", "/ro", ErrorCode::ParentNotWritable),
            ("/a/x.txt", "/file", ErrorCode::NotADirectory),
            ("/a/x.txt", "/missing", ErrorCode::NotADirectory),
            ("/a/none.txt", "/a", ErrorCode::NotFound),
        ];
        for (src, dest, code) in cases {
            let err = manager.copy(Path::new(src), Path::new(dest), &cancel).unwrap_err();
            assert_eq!(err.code, code, "{} -> {}", src, dest);
        }
    }

    #[test]
    fn test_copy_resolved_picks_duplicate_names() {
        let manager = memory_manager(MemoryFs::new().with_file("/a/report.pdf", "x"));
        let cancel = CancelToken::new();

        let first = manager
            .copy_resolved(Path::new("/a/report.pdf"), Path::new("/a"), &cancel)
            .unwrap();
        let second = manager
            .copy_resolved(Path::new("/a/report.pdf"), Path::new("/a"), &cancel)
            .unwrap();

        assert_eq!(first.name, "report (copia 1).pdf");
        assert_eq!(second.name, "report (copia 2).pdf");
    }

    #[test]
    fn test_copy_resolved_leaves_existing_target_untouched() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/report.pdf", "source")
                .with_file("/b/report.pdf", "existing"),
        );
        let entry = manager
            .copy_resolved(Path::new("/a/report.pdf"), Path::new("/b"), &CancelToken::new())
            .unwrap();

        assert_eq!(entry.path, Path::new("/b/report (copia 1).pdf"));
        assert_eq!(read(&manager, "/b/report.pdf"), "existing");
        assert_eq!(read(&manager, "/b/report (copia 1).pdf"), "source");
        assert_eq!(read(&manager, "/a/report.pdf"), "source");
    }

    #[test]
    fn test_copy_resolved_uses_configured_label() {
        let fs = MemoryFs::new().with_dir("/a/Photos");
        let options = ManagerOptions {
            duplicate_label: "copy".into(),
            ..ManagerOptions::default()
        };
        let manager = FileManager::new(fs, Stores::in_memory(5), options);

        let entry = manager
            .copy_resolved(Path::new("/a/Photos"), Path::new("/a"), &CancelToken::new())
            .unwrap();
        assert_eq!(entry.name, "Photos (copy 1)");
    }

    #[test]
    fn test_copy_cancelled() {
        let manager = memory_manager(MemoryFs::new().with_file("/a/x.txt", "").with_dir("/b"));
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = manager.copy(Path::new("/a/x.txt"), Path::new("/b"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
        assert!(!manager.fs().exists(Path::new("/b/x.txt")));
    }

    #[test]
    fn test_copy_cancelled_between_entries_keeps_partial_copy() {
        let manager = tripping_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_file("/a/dir/y.txt", "y")
                .with_file("/a/dir/z.txt", "z")
                .with_dir("/b"),
            1,
        );
        let cancel = manager.fs().token.clone();

        let err = manager.copy(Path::new("/a/dir"), Path::new("/b"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);

        let fs = &manager.fs().inner;
        assert!(fs.exists(Path::new("/b/dir/x.txt")));
        assert!(!fs.exists(Path::new("/b/dir/y.txt")));
        assert_eq!(fs.read_dir(Path::new("/a/dir")).unwrap().len(), 3);
    }

    #[test]
    fn test_copy_recreates_links() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_link("/a/dir/loop", "/a/dir")
                .with_link("/a/dir/note", "x.txt")
                .with_dir("/b"),
        );
        manager
            .copy(Path::new("/a/dir"), Path::new("/b"), &CancelToken::new())
            .unwrap();

        let fs = manager.fs();
        assert_eq!(read(&manager, "/b/dir/x.txt"), "x");
        assert!(fs.metadata(Path::new("/b/dir/loop")).unwrap().is_symlink);
        assert_eq!(fs.read_link(Path::new("/b/dir/loop")).unwrap(), Path::new("/a/dir"));
        assert!(!fs.exists(Path::new("/b/dir/loop/x.txt")));
        assert_eq!(fs.read_link(Path::new("/b/dir/note")).unwrap(), Path::new("x.txt"));
        assert_eq!(read(&manager, "/b/dir/note"), "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_on_disk_does_not_follow_link_cycles() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(&src, src.join("loop")).unwrap();
        let dest = temp.path().join("dest");
        std::fs::create_dir(&dest).unwrap();

        let manager = FileManager::new(LocalFs::new(), Stores::in_memory(5), ManagerOptions::default());
        manager.copy(&src, &dest, &CancelToken::new()).unwrap();

        let copied_link = dest.join("src/loop");
        let link_meta = std::fs::symlink_metadata(&copied_link).unwrap();
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(std::fs::read_link(&copied_link).unwrap(), src);
        assert_eq!(std::fs::read_dir(dest.join("src")).unwrap().count(), 2);
    }

    #[test]
    fn test_move_same_volume() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_dir("/b"),
        );
        manager.open(Path::new("/a/dir/x.txt")).unwrap();

        let entry = manager
            .move_to(Path::new("/a/dir"), Path::new("/b"), &CancelToken::new())
            .unwrap();

        assert_eq!(entry.path, Path::new("/b/dir"));
        assert_eq!(read(&manager, "/b/dir/x.txt"), "x");
        assert!(!manager.fs().exists(Path::new("/a/dir")));
        assert!(manager.recent().unwrap().is_empty());
    }

    #[test]
    fn test_move_collision() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/x.txt", "new")
                .with_file("/b/x.txt", "old"),
        );
        let err = manager
            .move_to(Path::new("/a/x.txt"), Path::new("/b"), &CancelToken::new())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(read(&manager, "/a/x.txt"), "new");
        assert_eq!(read(&manager, "/b/x.txt"), "old");
    }

    #[test]
    fn test_move_across_volumes() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_file("/a/dir/sub/y.txt", "y")
                .with_volume("/sd"),
        );
        manager
            .move_to(Path::new("/a/dir"), Path::new("/sd"), &CancelToken::new())
            .unwrap();

        assert_eq!(read(&manager, "/sd/dir/x.txt"), "x");
        assert_eq!(read(&manager, "/sd/dir/sub/y.txt"), "y");
        assert!(!manager.fs().exists(Path::new("/a/dir")));
    }

    #[test]
    fn test_move_across_volumes_rolls_back_when_copy_fails() {
        let fs = MemoryFs::new()
            .with_file("/a/dir/x.txt", "x")
            .with_file("/a/dir/sub/y.txt", "y")
            .with_volume("/sd");
        fs.set_unreadable("/a/dir/sub", true);
        let manager = memory_manager(fs);

        let err = manager
            .move_to(Path::new("/a/dir"), Path::new("/sd"), &CancelToken::new())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AccessDenied);
        assert!(!manager.fs().exists(Path::new("/sd/dir")));
        assert!(manager.fs().exists(Path::new("/a/dir/x.txt")));
        assert!(manager.fs().exists(Path::new("/a/dir/sub/y.txt")));
    }

    #[test]
    fn test_move_across_volumes_rolls_back_when_source_is_stuck() {
        let fs = MemoryFs::new()
            .with_file("/a/dir/x.txt", "x")
            .with_volume("/sd");
        fs.set_readonly("/a/dir", true);
        let manager = memory_manager(fs);

        let err = manager
            .move_to(Path::new("/a/dir"), Path::new("/sd"), &CancelToken::new())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ParentNotWritable);
        assert!(err.context.is_some());
        assert!(!manager.fs().exists(Path::new("/sd/dir")));
        assert_eq!(read(&manager, "/a/dir/x.txt"), "x");
    }

    #[test]
    fn test_move_cancelled_across_volumes() {
        let manager = memory_manager(MemoryFs::new().with_file("/a/x.txt", "x").with_volume("/sd"));
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = manager.move_to(Path::new("/a/x.txt"), Path::new("/sd"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
        assert!(manager.fs().exists(Path::new("/a/x.txt")));
        assert!(!manager.fs().exists(Path::new("/sd/x.txt")));
    }

    #[test]
    fn test_move_cancelled_mid_copy_rolls_back() {
        let manager = tripping_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_file("/a/dir/y.txt", "y")
                .with_file("/a/dir/z.txt", "z")
                .with_volume("/sd"),
            2,
        );
        let cancel = manager.fs().token.clone();

        let err = manager.move_to(Path::new("/a/dir"), Path::new("/sd"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
        assert!(err.context.is_some());

        let fs = &manager.fs().inner;
        assert!(!fs.exists(Path::new("/sd/dir")));
        for name in ["x.txt", "y.txt", "z.txt"] {
            assert!(fs.exists(&Path::new("/a/dir").join(name)), "{} lost", name);
        }
    }

    #[test]
    fn test_move_across_volumes_keeps_links() {
        let manager = memory_manager(
            MemoryFs::new()
                .with_file("/a/dir/x.txt", "x")
                .with_link("/a/dir/up", "/a")
                .with_volume("/sd"),
        );
        manager
            .move_to(Path::new("/a/dir"), Path::new("/sd"), &CancelToken::new())
            .unwrap();

        let fs = manager.fs();
        assert_eq!(fs.read_link(Path::new("/sd/dir/up")).unwrap(), Path::new("/a"));
        assert!(!fs.exists(Path::new("/a/dir")));
        assert!(fs.exists(Path::new("/a")));
    }

    #[test]
    fn test_paste_nothing_staged() {
        let manager = memory_manager(MemoryFs::new().with_dir("/a"));
        let err = manager
            .paste(&Clipboard::new(), Path::new("/a"), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingStaged);
    }

    #[test]
    fn test_failed_paste_stays_staged_then_succeeds_elsewhere() {
        let fs = MemoryFs::new()
            .with_file("/a/x.txt", "x")
            .with_dir("/d1")
            .with_dir("/d2");
        fs.set_readonly("/d1", true);
        let manager = memory_manager(fs);
        let clipboard = Clipboard::new();
        let cancel = CancelToken::new();
        clipboard.start_copy("/a/x.txt");

        let err = manager.paste(&clipboard, Path::new("/d1"), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParentNotWritable);
        assert_eq!(clipboard.current(), PendingOperation::CopyStaged("/a/x.txt".into()));

        let entry = manager.paste(&clipboard, Path::new("/d2"), &cancel).unwrap();
        assert_eq!(entry.path, Path::new("/d2/x.txt"));
        assert!(clipboard.current().is_idle());
    }

    #[test]
    fn test_paste_copy_resolves_names() {
        let manager = memory_manager(MemoryFs::new().with_file("/a/x.txt", "x"));
        let clipboard = Clipboard::new();
        clipboard.start_copy("/a/x.txt");

        let entry = manager
            .paste(&clipboard, Path::new("/a"), &CancelToken::new())
            .unwrap();
        assert_eq!(entry.name, "x (copia 1).txt");
    }

    #[test]
    fn test_paste_move() {
        let manager = memory_manager(MemoryFs::new().with_file("/a/x.txt", "x").with_dir("/b"));
        let clipboard = Clipboard::new();
        clipboard.start_move("/a/x.txt");

        manager
            .paste(&clipboard, Path::new("/b"), &CancelToken::new())
            .unwrap();
        assert!(!manager.fs().exists(Path::new("/a/x.txt")));
        assert!(clipboard.current().is_idle());
    }

    #[test]
    fn test_copy_on_disk() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("nested/file.txt"), "content").unwrap();
        let dest = temp.path().join("dest");
        std::fs::create_dir(&dest).unwrap();

        let manager = FileManager::new(LocalFs::new(), Stores::in_memory(5), ManagerOptions::default());
        let cancel = CancelToken::new();
        manager.copy(&src, &dest, &cancel).unwrap();

        let copied = std::fs::read_to_string(dest.join("src/nested/file.txt")).unwrap();
        assert_eq!(copied, "content");

        let err = manager.move_to(&dest.join("src"), temp.path(), &cancel).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert!(src.join("nested/file.txt").exists());
    }

    proptest! {
        #[test]
        fn test_resolved_copies_never_collide(count in 1usize..6) {
            let manager = memory_manager(MemoryFs::new().with_file("/a/f.txt", "x"));
            let cancel = CancelToken::new();
            let mut names = std::collections::HashSet::new();
            for _ in 0..count {
                let entry = manager
                    .copy_resolved(Path::new("/a/f.txt"), Path::new("/a"), &cancel)
                    .unwrap();
                prop_assert!(names.insert(entry.name));
            }
            prop_assert_eq!(manager.list_dir(Path::new("/a")).unwrap().len(), count + 1);
        }
    }
}
