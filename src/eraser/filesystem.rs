//! # Filesystem Capability
//!
//! This module defines the query and mutation operations the eraser needs
//! from a filesystem, and an implementation backed by [`std::fs`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;

/// The kind of a path at the moment it is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing exists at the path.
    Absent,
    /// Anything that is unlinked rather than descended into: regular files,
    /// symbolic links (whatever they point at) and special files.
    File,
    /// A real directory.
    Directory,
}

/// Filesystem operations used by [`PathEraser`](crate::eraser::PathEraser).
///
/// Every query is answered fresh from the underlying storage; implementations
/// must not cache results between calls.
pub trait FileSystem {
    /// Resolves the current kind of `path` without following symbolic links.
    fn kind(&self, path: &Path) -> EntryKind;

    /// Lists the immediate children of a directory.
    ///
    /// # Returns
    ///
    /// The full paths of the children in whatever order the storage reports
    /// them, or an error if the directory cannot be enumerated.
    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Removes a single non-directory entry.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory along with anything still inside it.
    fn remove_directory(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory that is expected to be empty.
    fn remove_empty_directory(&self, path: &Path) -> io::Result<()>;

    /// Returns true if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.kind(path) != EntryKind::Absent
    }

    /// Returns true if `path` is a non-directory entry.
    fn is_file(&self, path: &Path) -> bool {
        self.kind(path) == EntryKind::File
    }

    /// Returns true if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.kind(path) == EntryKind::Directory
    }
}

/// The operating system's filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn kind(&self, path: &Path) -> EntryKind {
        match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(_) => EntryKind::Absent,
        }
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = fs::read_dir(path)?.map(|entry| entry.map(|entry| entry.path()));
        Ok(collect_children(path, entries))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_directory(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn remove_empty_directory(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}

/// Keeps the entries of `directory` that could be read.
///
/// An unreadable entry is logged and skipped so the rest of the directory is
/// still erased; only failing to open the directory fails the listing.
fn collect_children(
    directory: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Vec<PathBuf> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(child) => Some(child),
            Err(error) => {
                warn!(directory = %directory.display(), %error, "skipping unreadable entry");
                None
            }
        })
        .collect()
}
