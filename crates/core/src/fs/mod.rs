//! Filesystem capability
//!
//! The file manager never touches `std::fs` directly. It goes through the
//! narrow [`FileSystem`] trait so the same operations run against the real
//! disk ([`LocalFs`]) or an in-memory tree ([`MemoryFs`]).
//!
//! Implementations report failures as `std::io::Error`; the callers map them
//! to typed [`crate::Error`]s at the point of failure.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Metadata the file manager needs about one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsMetadata {
    /// Whether the node is a directory
    pub is_dir: bool,
    /// Byte length (0 for directories)
    pub len: u64,
    /// Last modification time, when the platform reports one
    pub modified: Option<SystemTime>,
    /// Whether the node refuses writes (for directories: creating children)
    pub readonly: bool,
    /// Whether the path itself is a symbolic link (the other fields describe its target)
    pub is_symlink: bool,
}

/// Primitive filesystem operations
///
/// Recursion (tree copy, tree delete, search) is built on top of these by the
/// caller so it can be cancelled between entries.
pub trait FileSystem: Send + Sync + 'static {
    /// Stat a path without following the caller into it
    fn metadata(&self, path: &Path) -> io::Result<FsMetadata>;

    /// Immediate children of a directory, in no particular order
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a single directory; the parent must exist
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Rename within one volume. Fails with `ErrorKind::CrossesDevices` when
    /// `from` and `to` live on different volumes.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy file contents to a new file. Never overwrites: fails with
    /// `ErrorKind::AlreadyExists` when `to` exists.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Read a whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate a file with the given contents
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Target a symbolic link points at, as stored in the link
    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} cannot hold symbolic links", path.display()),
        ))
    }

    /// Create a symbolic link at `link` pointing at `target`
    fn symlink(&self, _target: &Path, link: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} cannot hold symbolic links", link.display()),
        ))
    }

    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }
}

impl<F: FileSystem + ?Sized> FileSystem for std::sync::Arc<F> {
    fn metadata(&self, path: &Path) -> io::Result<FsMetadata> {
        (**self).metadata(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).read_dir(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        (**self).copy_file(from, to)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).read_link(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        (**self).symlink(target, link)
    }
}
