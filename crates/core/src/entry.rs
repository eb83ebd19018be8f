//! Filesystem entries as the file manager presents them
//!
//! A [`FileEntry`] is transient: it is rebuilt from the filesystem on every
//! listing and never persisted directly.

use crate::fs::FsMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// File-type category derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Directory,
    Text,
    Image,
    Video,
    Audio,
    Pdf,
    Archive,
    Apk,
    Unknown,
}

impl FileKind {
    /// Classify a file by its (case-insensitive) extension
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "txt" | "md" | "log" | "json" | "xml" | "csv" => Self::Text,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => Self::Image,
            "mp4" | "avi" | "mkv" | "mov" | "wmv" => Self::Video,
            "mp3" | "wav" | "ogg" | "m4a" | "flac" => Self::Audio,
            "pdf" => Self::Pdf,
            "zip" | "rar" | "7z" | "tar" | "gz" => Self::Archive,
            "apk" => Self::Apk,
            _ => Self::Unknown,
        }
    }

    /// Classify a path; directories always map to [`FileKind::Directory`]
    pub fn of(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            return Self::Directory;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Short lowercase tag, as stored in the recent/favorite records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Archive => "archive",
            Self::Apk => "apk",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filesystem node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path, the natural key
    pub path: PathBuf,
    /// Display name (last path component)
    pub name: String,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Size in bytes, 0 for directories
    pub size: u64,
    /// Last modification time
    pub modified: Option<DateTime<Utc>>,
    /// Derived type category
    pub kind: FileKind,
}

impl FileEntry {
    /// Build an entry from a path and its metadata
    pub fn from_metadata(path: impl Into<PathBuf>, meta: &FsMetadata) -> Self {
        let path = path.into();
        let name = display_name(&path);
        let kind = FileKind::of(&path, meta.is_dir);
        Self {
            name,
            is_dir: meta.is_dir,
            size: if meta.is_dir { 0 } else { meta.len },
            modified: meta.modified.map(DateTime::<Utc>::from),
            kind,
            path,
        }
    }

    /// Lower-cased extension, empty for directories and extension-less files
    pub fn extension(&self) -> String {
        if self.is_dir {
            return String::new();
        }
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Whether the name starts with a dot
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }

    /// Best-effort MIME type for opening or previewing the file
    pub fn mime_type(&self) -> &'static str {
        if self.is_dir {
            return "inode/directory";
        }
        match self.extension().as_str() {
            "txt" | "log" | "md" => "text/plain",
            "csv" => "text/csv",
            "json" => "application/json",
            "xml" => "application/xml",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "webp" => "image/webp",
            "pdf" => "application/pdf",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "mp4" => "video/mp4",
            "zip" => "application/zip",
            "apk" => "application/vnd.android.package-archive",
            _ => "application/octet-stream",
        }
    }
}

/// Last path component as a display string
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Dot-files are hidden
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Directories first, then case-insensitive by name
pub fn listing_order(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort entries in listing order
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(listing_order);
}

/// Label used for the storage root in breadcrumbs
pub const ROOT_LABEL: &str = "Storage";

/// Breadcrumb trail from `root` down to `current`
///
/// The first crumb is always the root, labelled [`ROOT_LABEL`]. A `current`
/// outside `root` yields just the root crumb.
pub fn breadcrumbs(root: &Path, current: &Path) -> Vec<(String, PathBuf)> {
    let mut crumbs = vec![(ROOT_LABEL.to_string(), root.to_path_buf())];
    let Ok(relative) = current.strip_prefix(root) else {
        return crumbs;
    };

    let mut path = root.to_path_buf();
    for component in relative.components() {
        path.push(component);
        crumbs.push((component.as_os_str().to_string_lossy().into_owned(), path.clone()));
    }
    crumbs
}
