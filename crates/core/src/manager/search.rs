use super::FileManager;
use crate::cancel::CancelToken;
use crate::entry::{FileEntry, display_name, is_hidden_name, sort_entries};
use crate::error::Result;
use crate::fs::FileSystem;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Breadth-first, case-insensitive name search below a directory
///
/// Yields matches lazily so callers can stop early. Directories whose
/// listing fails are skipped with a warning. Symbolic links to directories
/// are reported but not descended into. Once the token is cancelled the
/// iterator yields a single `Err(Cancelled)` and then ends.
pub struct Search<'a, F> {
    manager: &'a FileManager<F>,
    needle: String,
    cancel: &'a CancelToken,
    pending: VecDeque<PathBuf>,
    ready: VecDeque<FileEntry>,
    finished: bool,
}

impl<'a, F: FileSystem> Search<'a, F> {
    fn new(
        manager: &'a FileManager<F>,
        root: &Path,
        query: &str,
        cancel: &'a CancelToken,
    ) -> Result<Self> {
        let needle = query.trim().to_lowercase();
        let mut search = Self {
            manager,
            finished: needle.is_empty(),
            needle,
            cancel,
            pending: VecDeque::new(),
            ready: VecDeque::new(),
        };
        if !search.finished {
            // The root itself must be listable; deeper failures are skipped
            let children = manager.read_children(root)?;
            search.visit(children);
        }
        Ok(search)
    }

    fn visit(&mut self, children: Vec<PathBuf>) {
        let show_hidden = self.manager.options.show_hidden;
        let mut entries: Vec<FileEntry> = children
            .into_iter()
            .filter(|child| show_hidden || !is_hidden_name(&display_name(child)))
            .filter_map(|child| {
                let meta = self.manager.fs.metadata(&child).ok()?;
                if meta.is_dir && !meta.is_symlink {
                    self.pending.push_back(child.clone());
                }
                Some(FileEntry::from_metadata(child, &meta))
            })
            .collect();
        sort_entries(&mut entries);

        let needle = &self.needle;
        self.ready
            .extend(entries.into_iter().filter(|e| e.name.to_lowercase().contains(needle)));
    }
}

impl<F: FileSystem> Iterator for Search<'_, F> {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if let Err(e) = self.cancel.check() {
                self.finished = true;
                return Some(Err(e));
            }
            if let Some(entry) = self.ready.pop_front() {
                return Some(Ok(entry));
            }

            let Some(dir) = self.pending.pop_front() else {
                self.finished = true;
                return None;
            };
            match self.manager.fs.read_dir(&dir) {
                Ok(children) => self.visit(children),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                }
            }
        }
    }
}

impl<F: FileSystem> FileManager<F> {
    /// Lazily search below `root` for names containing `query`
    ///
    /// A blank query yields nothing. `root` must be a listable directory.
    pub fn search_iter<'a>(
        &'a self,
        root: &Path,
        query: &str,
        cancel: &'a CancelToken,
    ) -> Result<Search<'a, F>> {
        self.require_dir(root)?;
        Search::new(self, root, query, cancel)
    }

    /// Collect up to `max_search_results` matches, directories first
    pub fn search(&self, root: &Path, query: &str, cancel: &CancelToken) -> Result<Vec<FileEntry>> {
        let mut results = self
            .search_iter(root, query, cancel)?
            .take(self.options.max_search_results)
            .collect::<Result<Vec<_>>>()?;
        sort_entries(&mut results);
        tracing::debug!(
            root = %root.display(),
            query,
            matches = results.len(),
            "Search finished"
        );
        Ok(results)
    }
}
