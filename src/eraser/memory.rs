//! # In-Memory Filesystem
//!
//! A [`FileSystem`] that lives entirely in memory. Removal and listing
//! failures can be injected per path, as can entries that disappear right
//! after their parent is listed, which makes the eraser's failure handling
//! testable without touching permissions on a real disk.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
};

use crate::eraser::filesystem::{EntryKind, FileSystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File,
    Directory,
}

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<PathBuf, Node>,
    undeletable: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
    vanishing: BTreeSet<PathBuf>,
}

impl State {
    fn children(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|entry| entry.parent() == Some(path))
            .cloned()
            .collect()
    }

    fn descendants(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|entry| entry.starts_with(path) && entry.as_path() != path)
            .cloned()
            .collect()
    }

    fn remove_tree(&mut self, path: &Path) {
        for descendant in self.descendants(path) {
            self.entries.remove(&descendant);
        }
        self.entries.remove(path);
    }
}

/// An in-memory filesystem tree with failure injection.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: RefCell<State>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating any missing parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.state
            .borrow_mut()
            .entries
            .insert(path.to_path_buf(), Node::File);
        self
    }

    /// Adds a directory, creating any missing parent directories.
    pub fn add_directory(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.state
            .borrow_mut()
            .entries
            .insert(path.to_path_buf(), Node::Directory);
        self
    }

    /// Makes every removal of `path` fail with a permission error.
    pub fn deny_removal(&self, path: impl AsRef<Path>) -> &Self {
        self.state
            .borrow_mut()
            .undeletable
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Makes listing the children of `path` fail with a permission error.
    pub fn deny_listing(&self, path: impl AsRef<Path>) -> &Self {
        self.state
            .borrow_mut()
            .unlistable
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Removes `path` (and anything beneath it) right after its parent has
    /// been listed, as if another process deleted it mid-walk.
    pub fn vanish_when_listed(&self, path: impl AsRef<Path>) -> &Self {
        self.state
            .borrow_mut()
            .vanishing
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Returns true if `path` is present.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.state.borrow().entries.contains_key(path.as_ref())
    }

    /// All paths currently present, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.state.borrow().entries.keys().cloned().collect()
    }

    fn add_parents(&self, path: &Path) {
        let mut state = self.state.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            state
                .entries
                .insert(ancestor.to_path_buf(), Node::Directory);
        }
    }
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn kind(&self, path: &Path) -> EntryKind {
        match self.state.borrow().entries.get(path) {
            Some(Node::File) => EntryKind::File,
            Some(Node::Directory) => EntryKind::Directory,
            None => EntryKind::Absent,
        }
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut state = self.state.borrow_mut();
        match state.entries.get(path).copied() {
            None => return Err(not_found(path)),
            Some(Node::File) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            Some(Node::Directory) => {}
        }
        if state.unlistable.contains(path) {
            return Err(permission_denied(path));
        }

        let children = state.children(path);
        for child in &children {
            if state.vanishing.remove(child) {
                state.remove_tree(child);
            }
        }
        Ok(children)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        match state.entries.get(path).copied() {
            None => Err(not_found(path)),
            Some(Node::Directory) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            )),
            Some(Node::File) if state.undeletable.contains(path) => Err(permission_denied(path)),
            Some(Node::File) => {
                state.entries.remove(path);
                Ok(())
            }
        }
    }

    /// Fails without removing anything if the directory or any entry beneath
    /// it is undeletable.
    fn remove_directory(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.entries.contains_key(path) {
            return Err(not_found(path));
        }
        let blocked = std::iter::once(path.to_path_buf())
            .chain(state.descendants(path))
            .any(|entry| state.undeletable.contains(&entry));
        if blocked {
            return Err(permission_denied(path));
        }
        state.remove_tree(path);
        Ok(())
    }

    fn remove_empty_directory(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        match state.entries.get(path).copied() {
            None => Err(not_found(path)),
            Some(Node::File) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", path.display()),
            )),
            Some(Node::Directory) if state.undeletable.contains(path) => {
                Err(permission_denied(path))
            }
            Some(Node::Directory) if !state.children(path).is_empty() => Err(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!("directory not empty: {}", path.display()),
            )),
            Some(Node::Directory) => {
                state.entries.remove(path);
                Ok(())
            }
        }
    }
}
