//! # Storage Usage
//!
//! Measures how much space a package's directories take up.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::storage::layout::{CleanTargetKind, StorageLayout};

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// The size of one well-known directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetUsage {
    /// Which location this is.
    pub kind: CleanTargetKind,
    /// The measured path.
    pub path: PathBuf,
    /// Total size of the files beneath it, in bytes.
    pub bytes: u64,
}

/// Get the total size of all files beneath a path.
///
/// Symbolic links are not followed and entries that cannot be read are
/// skipped.
///
/// # Returns
///
/// The size in bytes; the file's own size if `path` is a file, and zero if
/// nothing exists at `path`.
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Formats a byte count for display, in powers of 1024 with two decimals.
///
/// # Returns
///
/// Strings such as `"512B"`, `"1.50KB"` or `"2.00GB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2}{}", UNITS[unit])
}

/// Measures each of the package's well-known directories.
pub fn storage_usage(layout: &StorageLayout) -> Vec<TargetUsage> {
    layout
        .well_known_targets()
        .into_iter()
        .map(|(kind, path)| TargetUsage {
            kind,
            bytes: directory_size(&path),
            path,
        })
        .collect()
}
