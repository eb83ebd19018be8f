//! Core file operation service for Filedeck
//!
//! This crate holds everything a file-manager front end needs below the UI:
//!
//! - **Error handling**: Typed errors with codes, context, and recovery suggestions
//! - **Filesystem capability**: A narrow trait with disk and in-memory implementations
//! - **File manager**: Listing, search, create/rename/delete, copy/move with name resolution
//! - **Clipboard**: The single staged copy or move awaiting a paste
//! - **Stores**: Persistent recent-files and favorites records
//! - **Configuration**: TOML-based configuration with defaults
//! - **Service**: An async facade that keeps disk I/O off the runtime threads
//!
//! # Example
//!
//! ```rust,no_run
//! use filedeck_core::prelude::*;
//! use std::path::Path;
//!
//! let manager = FileManager::new(LocalFs::new(), Stores::in_memory(50), ManagerOptions::default());
//! for entry in manager.list_dir(Path::new("/tmp"))? {
//!     println!("{} {}", if entry.is_dir { "d" } else { "-" }, entry.name);
//! }
//!
//! let clipboard = Clipboard::new();
//! clipboard.start_copy("/tmp/report.pdf");
//! manager.paste(&clipboard, Path::new("/tmp/archive"), &CancelToken::new())?;
//! # Ok::<(), filedeck_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod clipboard;
pub mod config;
pub mod entry;
pub mod error;
pub mod fs;
pub mod manager;
pub mod naming;
pub mod service;
pub mod store;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::clipboard::{Clipboard, PendingOperation};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::entry::{FileEntry, FileKind, breadcrumbs};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt, exit_codes};
    pub use crate::fs::{FileSystem, LocalFs, MemoryFs};
    pub use crate::manager::{FileManager, ManagerOptions};
    pub use crate::service::FileService;
    pub use crate::store::{FavoriteEntry, RecentEntry, Stores};
}
