//! In-memory filesystem
//!
//! Used by tests and demos. Supports marking nodes read-only or unreadable,
//! symbolic links, and declaring extra volumes so cross-volume moves can be
//! exercised.
//!
//! Links are followed one level only. A relative link target is joined to
//! the link's directory without resolving `..`.

use super::{FileSystem, FsMetadata};
use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

#[derive(Debug, Clone)]
enum NodeKind {
    Dir,
    File(Vec<u8>),
    Link(PathBuf),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    modified: SystemTime,
    readonly: bool,
    unreadable: bool,
}

impl Node {
    fn dir() -> Self {
        Self {
            kind: NodeKind::Dir,
            modified: SystemTime::now(),
            readonly: false,
            unreadable: false,
        }
    }

    fn file(contents: Vec<u8>) -> Self {
        Self {
            kind: NodeKind::File(contents),
            modified: SystemTime::now(),
            readonly: false,
            unreadable: false,
        }
    }

    fn link(target: PathBuf) -> Self {
        Self {
            kind: NodeKind::Link(target),
            modified: SystemTime::now(),
            readonly: false,
            unreadable: false,
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir)
    }
}

#[derive(Debug)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    volumes: Vec<PathBuf>,
}

impl State {
    fn node(&self, path: &Path) -> io::Result<&Node> {
        self.nodes
            .get(path)
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, format!("{} not found", path.display())))
    }

    /// The node at `path`, or the node a link at `path` points at
    fn follow(&self, path: &Path) -> io::Result<&Node> {
        let node = self.node(path)?;
        match &node.kind {
            NodeKind::Link(target) => self.node(&link_target(path, target)),
            _ => Ok(node),
        }
    }

    fn children(&self, path: &Path) -> Vec<PathBuf> {
        self.nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect()
    }

    /// The parent of `path` must exist, be a directory and accept writes
    fn check_parent_writable(&self, path: &Path) -> io::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::new(ErrorKind::PermissionDenied, "cannot modify the root"))?;
        let node = self.node(parent)?;
        if !node.is_dir() {
            return Err(io::Error::new(
                ErrorKind::NotADirectory,
                format!("{} is not a directory", parent.display()),
            ));
        }
        if node.readonly {
            return Err(io::Error::new(
                ErrorKind::PermissionDenied,
                format!("{} is read-only", parent.display()),
            ));
        }
        Ok(())
    }

    fn volume_of(&self, path: &Path) -> PathBuf {
        self.volumes
            .iter()
            .filter(|v| path.starts_with(v))
            .max_by_key(|v| v.components().count())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    fn ensure_dirs(&mut self, path: &Path) {
        for ancestor in path.ancestors().collect::<Vec<_>>().into_iter().rev() {
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert_with(Node::dir);
        }
    }
}

/// Filesystem held entirely in memory
#[derive(Debug)]
pub struct MemoryFs {
    state: RwLock<State>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create an empty filesystem containing only `/`
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::dir());
        Self {
            state: RwLock::new(State {
                nodes,
                volumes: Vec::new(),
            }),
        }
    }

    /// Add a directory, creating missing ancestors
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.write_state().ensure_dirs(path.as_ref());
        self
    }

    /// Add a file, creating missing ancestors
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref();
        {
            let mut state = self.write_state();
            if let Some(parent) = path.parent() {
                state.ensure_dirs(parent);
            }
            state
                .nodes
                .insert(path.to_path_buf(), Node::file(contents.as_ref().to_vec()));
        }
        self
    }

    /// Add a symbolic link at `path` pointing at `target`
    pub fn with_link(self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        {
            let mut state = self.write_state();
            if let Some(parent) = path.parent() {
                state.ensure_dirs(parent);
            }
            state
                .nodes
                .insert(path.to_path_buf(), Node::link(target.as_ref().to_path_buf()));
        }
        self
    }

    /// Declare `path` as the root of a separate volume
    pub fn with_volume(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        {
            let mut state = self.write_state();
            state.ensure_dirs(path);
            state.volumes.push(path.to_path_buf());
        }
        self
    }

    /// Make a node refuse writes (for directories: refuse new or removed children)
    pub fn set_readonly(&self, path: impl AsRef<Path>, readonly: bool) {
        if let Some(node) = self.write_state().nodes.get_mut(path.as_ref()) {
            node.readonly = readonly;
        }
    }

    /// Make a node refuse reads and listings
    pub fn set_unreadable(&self, path: impl AsRef<Path>, unreadable: bool) {
        if let Some(node) = self.write_state().nodes.get_mut(path.as_ref()) {
            node.unreadable = unreadable;
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn link_target(link: &Path, target: &Path) -> PathBuf {
    match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target.to_path_buf(),
    }
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(ErrorKind::IsADirectory, format!("{} is a directory", path.display()))
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(ErrorKind::NotADirectory, format!("{} is not a directory", path.display()))
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(ErrorKind::AlreadyExists, format!("{} already exists", path.display()))
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(ErrorKind::PermissionDenied, format!("{} is not readable", path.display()))
}

impl FileSystem for MemoryFs {
    fn metadata(&self, path: &Path) -> io::Result<FsMetadata> {
        let state = self.read_state();
        let own = state.node(path)?;
        let is_symlink = matches!(own.kind, NodeKind::Link(_));
        // A dangling link describes itself
        let node = state.follow(path).unwrap_or(own);
        let len = match &node.kind {
            NodeKind::File(data) => data.len() as u64,
            NodeKind::Dir | NodeKind::Link(_) => 0,
        };
        Ok(FsMetadata {
            is_dir: node.is_dir(),
            len,
            modified: Some(node.modified),
            readonly: node.readonly,
            is_symlink,
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.read_state();
        let node = state.node(path)?;
        if !node.is_dir() {
            return Err(not_a_directory(path));
        }
        if node.unreadable {
            return Err(permission_denied(path));
        }
        Ok(state.children(path))
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state();
        if state.nodes.contains_key(path) {
            return Err(already_exists(path));
        }
        state.check_parent_writable(path)?;
        state.nodes.insert(path.to_path_buf(), Node::dir());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state();
        if state.node(path)?.is_dir() {
            return Err(is_a_directory(path));
        }
        state.check_parent_writable(path)?;
        state.nodes.remove(path);
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state();
        if !state.node(path)?.is_dir() {
            return Err(not_a_directory(path));
        }
        if !state.children(path).is_empty() {
            return Err(io::Error::new(
                ErrorKind::DirectoryNotEmpty,
                format!("{} is not empty", path.display()),
            ));
        }
        state.check_parent_writable(path)?;
        state.nodes.remove(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.write_state();
        state.node(from)?;
        if state.nodes.contains_key(to) {
            return Err(already_exists(to));
        }
        if to.starts_with(from) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("cannot move {} into itself", from.display()),
            ));
        }
        if state.volume_of(from) != state.volume_of(to) {
            return Err(io::Error::new(
                ErrorKind::CrossesDevices,
                format!("{} and {} are on different volumes", from.display(), to.display()),
            ));
        }
        state.check_parent_writable(from)?;
        state.check_parent_writable(to)?;

        let moved: Vec<PathBuf> = state
            .nodes
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = state.nodes.remove(&old) {
                let suffix = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new = if suffix.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(suffix)
                };
                state.nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut state = self.write_state();
        let source = state.follow(from)?;
        let data = match &source.kind {
            NodeKind::Dir | NodeKind::Link(_) => return Err(is_a_directory(from)),
            NodeKind::File(_) if source.unreadable => return Err(permission_denied(from)),
            NodeKind::File(data) => data.clone(),
        };
        if state.nodes.contains_key(to) {
            return Err(already_exists(to));
        }
        state.check_parent_writable(to)?;
        let len = data.len() as u64;
        state.nodes.insert(to.to_path_buf(), Node::file(data));
        Ok(len)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.read_state();
        let node = state.follow(path)?;
        match &node.kind {
            NodeKind::Dir | NodeKind::Link(_) => Err(is_a_directory(path)),
            NodeKind::File(_) if node.unreadable => Err(permission_denied(path)),
            NodeKind::File(data) => Ok(data.clone()),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.write_state();
        match state.nodes.get(path) {
            Some(node) if node.is_dir() => return Err(is_a_directory(path)),
            Some(node) if node.readonly => {
                return Err(io::Error::new(
                    ErrorKind::PermissionDenied,
                    format!("{} is read-only", path.display()),
                ));
            }
            Some(_) => {}
            None => state.check_parent_writable(path)?,
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::file(contents.to_vec()));
        Ok(())
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        match &self.read_state().node(path)?.kind {
            NodeKind::Link(target) => Ok(target.clone()),
            _ => Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not a symbolic link", path.display()),
            )),
        }
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        let mut state = self.write_state();
        if state.nodes.contains_key(link) {
            return Err(already_exists(link));
        }
        state.check_parent_writable(link)?;
        state
            .nodes
            .insert(link.to_path_buf(), Node::link(target.to_path_buf()));
        Ok(())
    }
}
