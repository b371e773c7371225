//! # Storage
//!
//! This module knows where an Android package keeps its data and clears it
//! with the [`eraser`](crate::eraser).

pub mod clean;
pub mod layout;
pub mod usage;

pub use clean::{
    CleanSummary, CleanTarget, application_data_targets, clean_application_data,
    clean_custom_paths, clean_database_by_name, clear_external_storage,
    clear_internal_external_storage, clear_internal_storage,
};
pub use layout::{CleanTargetKind, StorageLayout};
pub use usage::{TargetUsage, directory_size, format_size, storage_usage};
