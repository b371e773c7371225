//! # Storage Cleaning
//!
//! This module clears a package's storage by running the
//! [`PathEraser`] over its well-known directories.
//!
//! Every target is attempted independently; a failure on one never prevents
//! the next from being tried. Results are collected in a [`CleanSummary`]
//! and each one is logged.

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    eraser::{EraseReport, FileSystem, Outcome, PathEraser},
    paths::DATABASE_COMPANION_SUFFIXES,
    storage::layout::{CleanTargetKind, StorageLayout},
};

/// The result of clearing one target.
#[derive(Debug, Clone, Serialize)]
pub struct CleanTarget {
    /// Which location this is.
    pub kind: CleanTargetKind,
    /// The erased path.
    pub path: PathBuf,
    /// Whether the erase succeeded.
    pub succeeded: bool,
    /// Every entry visited while erasing the path.
    pub report: EraseReport,
}

/// The results of clearing several targets, in the order they were cleared.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanSummary {
    /// One result per target.
    pub targets: Vec<CleanTarget>,
}

impl CleanSummary {
    /// Returns true if every target was cleared.
    pub fn succeeded(&self) -> bool {
        self.targets.iter().all(|target| target.succeeded)
    }

    /// The targets that were not fully cleared.
    pub fn failed(&self) -> impl Iterator<Item = &CleanTarget> {
        self.targets.iter().filter(|target| !target.succeeded)
    }

    /// Appends the targets of `other`.
    pub fn extend(&mut self, other: CleanSummary) {
        self.targets.extend(other.targets);
    }

    fn push(&mut self, kind: CleanTargetKind, path: &Path, report: EraseReport) {
        let succeeded = report.succeeded();
        if succeeded {
            info!(target_kind = %kind, path = %path.display(), "cleared");
        } else {
            warn!(
                target_kind = %kind,
                path = %path.display(),
                failures = report.failures().count(),
                "not fully cleared"
            );
        }
        self.targets.push(CleanTarget {
            kind,
            path: path.to_path_buf(),
            succeeded,
            report,
        });
    }
}

/// Lists the targets [`clean_application_data`] clears, in order.
///
/// # Arguments
///
/// - `layout` - The package's storage directories.
/// - `custom_paths` - Extra paths supplied by the caller.
pub fn application_data_targets(
    layout: &StorageLayout,
    custom_paths: &[PathBuf],
) -> Vec<(CleanTargetKind, PathBuf)> {
    let mut targets = layout.well_known_targets();
    targets.extend(
        custom_paths
            .iter()
            .map(|path| (CleanTargetKind::Custom, path.clone())),
    );
    targets
}

/// Clears the package's caches, databases, shared preferences, files and
/// any custom paths.
///
/// The external cache is only cleared when external storage is mounted.
///
/// # Arguments
///
/// - `eraser` - Performs the deletions.
/// - `layout` - The package's storage directories.
/// - `custom_paths` - Extra paths to erase after the well-known ones.
/// - `progress_bar` - Incremented once per target.
///
/// # Returns
///
/// A [`CleanSummary`] with one entry per target.
pub fn clean_application_data<F: FileSystem>(
    eraser: &PathEraser<F>,
    layout: &StorageLayout,
    custom_paths: &[PathBuf],
    progress_bar: &ProgressBar,
) -> CleanSummary {
    let mut summary = CleanSummary::default();
    for (kind, path) in application_data_targets(layout, custom_paths) {
        progress_bar.set_message(format!("Clearing {kind}..."));
        let report = eraser.erase_with_report(Some(path.as_path()));
        summary.push(kind, &path, report);
        progress_bar.inc(1);
    }
    summary
}

/// Erases each of `paths` independently.
pub fn clean_custom_paths<F: FileSystem>(
    eraser: &PathEraser<F>,
    paths: &[PathBuf],
) -> CleanSummary {
    let mut summary = CleanSummary::default();
    for path in paths {
        let report = eraser.erase_with_report(Some(path.as_path()));
        summary.push(CleanTargetKind::Custom, path, report);
    }
    summary
}

/// Clears every entry of the package's private data directory except those
/// whose names contain `preserve_pattern`.
///
/// An empty pattern preserves nothing. If the data directory cannot be
/// listed, the summary holds a single failed entry for it.
pub fn clear_internal_storage<F: FileSystem>(
    eraser: &PathEraser<F>,
    layout: &StorageLayout,
    preserve_pattern: &str,
) -> CleanSummary {
    clear_children(
        eraser,
        &layout.data_directory,
        CleanTargetKind::InternalStorage,
        |name| !preserve_pattern.is_empty() && name.contains(preserve_pattern),
    )
}

/// Clears every entry of the package's public directory on external
/// storage.
///
/// If external storage is not mounted or the directory cannot be listed,
/// the summary holds a single failed entry.
pub fn clear_external_storage<F: FileSystem>(
    eraser: &PathEraser<F>,
    layout: &StorageLayout,
) -> CleanSummary {
    match &layout.public_directory {
        Some(public_directory) => clear_children(
            eraser,
            public_directory,
            CleanTargetKind::ExternalStorage,
            |_| false,
        ),
        None => {
            let mut summary = CleanSummary::default();
            let mut report = EraseReport::default();
            report.push(
                Path::new(""),
                Outcome::Failed {
                    reason: "external storage is not mounted".to_string(),
                },
            );
            summary.push(CleanTargetKind::ExternalStorage, Path::new(""), report);
            summary
        }
    }
}

/// The full manual strategy: internal storage, external storage, then
/// [`clean_application_data`].
pub fn clear_internal_external_storage<F: FileSystem>(
    eraser: &PathEraser<F>,
    layout: &StorageLayout,
    preserve_pattern: &str,
    custom_paths: &[PathBuf],
    progress_bar: &ProgressBar,
) -> CleanSummary {
    let mut summary = clear_internal_storage(eraser, layout, preserve_pattern);
    if layout.external_mounted() {
        summary.extend(clear_external_storage(eraser, layout));
    }
    summary.extend(clean_application_data(
        eraser,
        layout,
        custom_paths,
        progress_bar,
    ));
    summary
}

/// Deletes one database along with its `-journal`, `-wal` and `-shm`
/// companions.
///
/// # Returns
///
/// `true` if the database file was removed and no companion that existed
/// failed to be removed. Names that are not a single file name (empty, `.`,
/// `..`, or containing a path separator) and names that do not refer to a
/// file are rejected with `false` without touching anything.
pub fn clean_database_by_name<F: FileSystem>(
    eraser: &PathEraser<F>,
    layout: &StorageLayout,
    name: &str,
) -> bool {
    if !is_plain_file_name(name) {
        warn!(name, "refusing to drop database with an invalid name");
        return false;
    }
    let database = layout.databases_directory.join(name);
    if !eraser.filesystem().is_file(&database) {
        warn!(path = %database.display(), "database is not a file");
        return false;
    }
    let mut removed = eraser.erase(Some(database.as_path()));

    for suffix in DATABASE_COMPANION_SUFFIXES {
        let companion = layout.databases_directory.join(format!("{name}{suffix}"));
        if eraser.filesystem().is_file(&companion) {
            removed &= eraser.erase(Some(companion.as_path()));
        }
    }
    removed
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Erases each child of `directory` unless `skip` returns true for its file
/// name.
fn clear_children<F: FileSystem>(
    eraser: &PathEraser<F>,
    directory: &Path,
    kind: CleanTargetKind,
    skip: impl Fn(&str) -> bool,
) -> CleanSummary {
    let mut summary = CleanSummary::default();
    let children = match eraser.filesystem().list_children(directory) {
        Ok(children) => children,
        Err(error) => {
            let mut report = EraseReport::default();
            report.push(
                directory,
                Outcome::Failed {
                    reason: error.to_string(),
                },
            );
            summary.push(kind, directory, report);
            return summary;
        }
    };

    for child in children {
        let name = child
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if skip(&name) {
            info!(path = %child.display(), "preserved");
            continue;
        }
        let report = eraser.erase_with_report(Some(child.as_path()));
        summary.push(kind, &child, report);
    }
    summary
}
