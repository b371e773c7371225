//! # Erase Reports
//!
//! Structured per-path results of an erase. The boolean returned by
//! [`PathEraser::erase`](crate::eraser::PathEraser::erase) is derived from
//! these records and never disagrees with them.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened to a single visited path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The entry was unlinked.
    Removed,
    /// Every child of the directory was removed; the directory itself was
    /// left in place.
    Cleared,
    /// Nothing existed at the path when it was visited.
    NotFound,
    /// The caller supplied an empty path.
    EmptyInput,
    /// At least one child of the directory could not be removed.
    Incomplete,
    /// The removal itself failed.
    Failed {
        /// The underlying I/O error, as text.
        reason: String,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Removed`] and [`Outcome::Cleared`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Removed | Outcome::Cleared)
    }
}

/// One visited path and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EraseRecord {
    /// The visited path.
    pub path: PathBuf,
    /// What happened to it.
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The records of one top-level erase, in post-order: children come before
/// their directory and the erased root is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EraseReport {
    records: Vec<EraseRecord>,
}

impl EraseReport {
    pub(crate) fn push(&mut self, path: &Path, outcome: Outcome) {
        self.records.push(EraseRecord {
            path: path.to_path_buf(),
            outcome,
        });
    }

    /// The overall result for the erased root.
    pub fn succeeded(&self) -> bool {
        self.root().is_some_and(|record| record.outcome.is_success())
    }

    /// The record of the erased root.
    pub fn root(&self) -> Option<&EraseRecord> {
        self.records.last()
    }

    /// All records, children first.
    pub fn records(&self) -> &[EraseRecord] {
        &self.records
    }

    /// The records that are not successes.
    pub fn failures(&self) -> impl Iterator<Item = &EraseRecord> {
        self.records
            .iter()
            .filter(|record| !record.outcome.is_success())
    }

    /// Looks up the outcome recorded for `path`.
    pub fn outcome_of(&self, path: impl AsRef<Path>) -> Option<&Outcome> {
        self.records
            .iter()
            .find(|record| record.path == path.as_ref())
            .map(|record| &record.outcome)
    }
}
