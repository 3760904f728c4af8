//! A [`TreeStore`] over a directory hierarchy.
//!
//! Directory listings are read on first use and cached, so the index only
//! touches the disk for directories it actually expands. Expansion flags
//! are kept by path and survive listing refreshes.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use treerow::StoreError;
use treerow::store::{StoreChange, TreeStore};

/// One file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsEntry {
    path: PathBuf,
    is_dir: bool,
}

impl FsEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Display name: the last path component, or the whole path for roots
    /// like `/`.
    pub fn name(&self) -> String {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.path.display().to_string(),
        }
    }
}

/// Directory tree rooted at a single path.
#[derive(Debug)]
pub struct FsStore {
    root: FsEntry,
    show_hidden: bool,
    listings: RefCell<HashMap<PathBuf, Vec<FsEntry>>>,
    expanded: HashSet<PathBuf>,
    changes: Vec<StoreChange<FsEntry>>,
}

impl FsStore {
    /// Open a store on `root`, which must be a directory. The root starts
    /// expanded.
    pub fn open(root: impl Into<PathBuf>, show_hidden: bool) -> Result<Self, StoreError> {
        let root = root.into();
        if !fs::metadata(&root)?.is_dir() {
            return Err(StoreError::Other(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        let mut expanded = HashSet::new();
        expanded.insert(root.clone());
        log::info!("FsStore: opened {}", root.display());
        Ok(Self {
            root: FsEntry::new(root, true),
            show_hidden,
            listings: RefCell::new(HashMap::new()),
            expanded,
            changes: Vec::new(),
        })
    }

    pub fn root(&self) -> &FsEntry {
        &self.root
    }

    /// Expanded directories, sorted.
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.expanded.iter().cloned().collect();
        paths.sort();
        paths
    }

    /// Mark directories as expanded. Meant to be called before the store is
    /// attached to an index.
    pub fn restore_expanded(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.expanded.extend(paths);
    }

    /// Forget the cached listing of `dir` and everything below it, and queue
    /// a reset of its children.
    pub fn refresh(&mut self, dir: &Path) {
        self.listings
            .borrow_mut()
            .retain(|path, _| !path.starts_with(dir));
        log::debug!("FsStore: refresh {}", dir.display());
        self.changes
            .push(StoreChange::reset(Some(FsEntry::new(dir, true))));
    }

    /// Forget every cached listing and queue a full reset.
    pub fn refresh_all(&mut self) {
        self.listings.borrow_mut().clear();
        self.changes.push(StoreChange::reset(None));
    }

    /// Run `f` on the listing of `dir`, reading it on first use.
    fn with_listing<R>(
        &self,
        dir: &Path,
        f: impl FnOnce(&[FsEntry]) -> R,
    ) -> Result<R, StoreError> {
        if let Some(listing) = self.listings.borrow().get(dir) {
            return Ok(f(listing));
        }
        let listing = self.read_dir(dir)?;
        let result = f(&listing);
        self.listings.borrow_mut().insert(dir.to_path_buf(), listing);
        Ok(result)
    }

    /// Directories first, then files, each by name.
    fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let name = entry.file_name();
            if !self.show_hidden && name.to_string_lossy().starts_with('.') {
                continue;
            }
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            entries.push(FsEntry::new(entry.path(), is_dir));
        }
        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.path.cmp(&b.path)));
        log::trace!("FsStore: read {} ({} entries)", dir.display(), entries.len());
        Ok(entries)
    }
}

impl TreeStore for FsStore {
    type Item = FsEntry;

    fn child_count(&self, parent: Option<&FsEntry>) -> Result<usize, StoreError> {
        match parent {
            None => Ok(1),
            Some(entry) if entry.is_dir => self.with_listing(&entry.path, <[FsEntry]>::len),
            Some(_) => Ok(0),
        }
    }

    fn child_at(&self, parent: Option<&FsEntry>, index: usize) -> Result<FsEntry, StoreError> {
        let out_of_range = |count| StoreError::ChildOutOfRange { index, count };
        match parent {
            None if index == 0 => Ok(self.root.clone()),
            None => Err(out_of_range(1)),
            Some(entry) => self
                .with_listing(&entry.path, |listing| {
                    listing.get(index).cloned().ok_or(out_of_range(listing.len()))
                })?,
        }
    }

    fn is_expandable(&self, item: &FsEntry) -> bool {
        item.is_dir
    }

    fn is_expanded(&self, item: &FsEntry) -> bool {
        self.expanded.contains(&item.path)
    }

    fn set_expanded(&mut self, item: &FsEntry, expanded: bool) {
        if expanded {
            self.expanded.insert(item.path.clone());
        } else {
            self.expanded.remove(&item.path);
        }
    }

    fn drain_changes(&mut self) -> Vec<StoreChange<FsEntry>> {
        std::mem::take(&mut self.changes)
    }
}
