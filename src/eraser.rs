//! # Eraser
//!
//! This module provides best-effort, recursive removal of filesystem paths.
//!
//! The entry point is [`PathEraser`], which works over any [`FileSystem`]
//! implementation so that the real filesystem can be swapped for an
//! in-memory one in tests.

mod erase;
pub mod filesystem;
pub mod memory;
pub mod report;

pub use erase::{DirectoryPolicy, PathEraser};
pub use filesystem::{EntryKind, FileSystem, OsFileSystem};
pub use memory::MemoryFileSystem;
pub use report::{EraseRecord, EraseReport, Outcome};
