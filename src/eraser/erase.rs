//! # Path Erasing
//!
//! Recursive, best-effort deletion of a path and everything beneath it.
//!
//! Failures are recovered at every level and reduced to a single boolean:
//! a directory's result is the logical AND of its children's results, and a
//! failing child never stops its siblings from being attempted.

use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eraser::{
    filesystem::{EntryKind, FileSystem, OsFileSystem},
    report::{EraseReport, Outcome},
};

/// What happens to a directory once all of its children are gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryPolicy {
    /// Leave the emptied directory in place. A directory that cannot be
    /// listed is still removed as a whole.
    #[default]
    KeepShells,
    /// Unlink each directory after its children have all been removed.
    RemoveShells,
}

/// Erases filesystem paths through a [`FileSystem`].
///
/// The eraser holds no state between calls; every path kind is resolved at
/// the moment it is visited, so entries that disappear mid-walk are reported
/// as [`Outcome::NotFound`] rather than treated as errors.
#[derive(Debug, Clone, Default)]
pub struct PathEraser<F = OsFileSystem> {
    filesystem: F,
    policy: DirectoryPolicy,
}

impl PathEraser<OsFileSystem> {
    /// Creates an eraser over the operating system's filesystem.
    pub fn os() -> Self {
        Self::new(OsFileSystem)
    }
}

impl<F: FileSystem> PathEraser<F> {
    /// Creates an eraser over `filesystem` using [`DirectoryPolicy::KeepShells`].
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            policy: DirectoryPolicy::default(),
        }
    }

    /// Sets the policy applied to emptied directories.
    pub fn with_policy(mut self, policy: DirectoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The policy applied to emptied directories.
    pub fn policy(&self) -> DirectoryPolicy {
        self.policy
    }

    /// The filesystem this eraser works on.
    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    /// Erases `path` and, if it is a directory, everything beneath it.
    ///
    /// # Returns
    ///
    /// `true` only if the path existed and every entry beneath it was
    /// removed. An absent or empty path, a missing path and any failed
    /// removal all yield `false`.
    pub fn erase(&self, path: Option<&Path>) -> bool {
        self.erase_with_report(path).succeeded()
    }

    /// Same as [`PathEraser::erase`] for a raw path string, where `""` counts
    /// as an empty input.
    pub fn erase_str(&self, path: &str) -> bool {
        self.erase(Some(Path::new(path)))
    }

    /// Erases `path` and returns a record for every entry visited.
    pub fn erase_with_report(&self, path: Option<&Path>) -> EraseReport {
        let mut report = EraseReport::default();
        match path.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => {
                self.erase_entry(path, &mut report);
            }
            None => {
                self.record(&mut report, Path::new(""), Outcome::EmptyInput);
            }
        }
        report
    }

    fn erase_entry(&self, path: &Path, report: &mut EraseReport) -> bool {
        match self.filesystem.kind(path) {
            EntryKind::Absent => self.record(report, path, Outcome::NotFound),
            EntryKind::File => self.remove_file(path, report),
            EntryKind::Directory => self.erase_directory(path, report),
        }
    }

    fn erase_directory(&self, path: &Path, report: &mut EraseReport) -> bool {
        let children = match self.filesystem.list_children(path) {
            Ok(children) => children,
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "cannot list directory, removing it as a whole"
                );
                let outcome = match self.filesystem.remove_directory(path) {
                    Ok(()) => Outcome::Removed,
                    Err(error) => failure(error),
                };
                return self.record(report, path, outcome);
            }
        };

        let mut cleared = true;
        for child in children {
            cleared &= self.erase_child(&child, report);
        }

        let outcome = match (cleared, self.policy) {
            (false, _) => Outcome::Incomplete,
            (true, DirectoryPolicy::KeepShells) => Outcome::Cleared,
            (true, DirectoryPolicy::RemoveShells) => {
                match self.filesystem.remove_empty_directory(path) {
                    Ok(()) => Outcome::Removed,
                    Err(error) => failure(error),
                }
            }
        };
        self.record(report, path, outcome)
    }

    fn erase_child(&self, child: &Path, report: &mut EraseReport) -> bool {
        match self.filesystem.kind(child) {
            EntryKind::File => self.remove_file(child, report),
            _ => self.erase_entry(child, report),
        }
    }

    fn remove_file(&self, path: &Path, report: &mut EraseReport) -> bool {
        let outcome = match self.filesystem.remove_file(path) {
            Ok(()) => Outcome::Removed,
            Err(error) => failure(error),
        };
        self.record(report, path, outcome)
    }

    fn record(&self, report: &mut EraseReport, path: &Path, outcome: Outcome) -> bool {
        let success = outcome.is_success();
        if success {
            debug!(path = %path.display(), ?outcome, "erased");
        } else {
            warn!(path = %path.display(), ?outcome, "not erased");
        }
        report.push(path, outcome);
        success
    }
}

/// Maps a removal error to an outcome. An entry that vanished before it
/// could be removed is reported as not found.
fn failure(error: io::Error) -> Outcome {
    match error.kind() {
        io::ErrorKind::NotFound => Outcome::NotFound,
        _ => Outcome::Failed {
            reason: error.to_string(),
        },
    }
}
