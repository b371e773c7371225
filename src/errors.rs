//! # Error Types
//!
//! This module defines the error types used outside the eraser core. The
//! eraser itself never returns errors; it reduces failures to booleans and
//! [`Outcome`](crate::eraser::Outcome) records.

use std::{io, path::PathBuf};

use thiserror;

/// Errors that occur while loading the configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read '{path}': {error}")]
    IoRead {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The configuration file is not valid JSON for a [`Config`](crate::config::Config).
    #[error("Failed to deserialize '{path}': {error}")]
    Deserialize {
        /// The configuration file.
        path: PathBuf,
        /// The underlying deserialization error.
        #[source]
        error: serde_json::Error,
    },

    /// No package name was given on the command line or in the file.
    #[error("No package name configured; pass --package or set \"package\" in the config file")]
    MissingPackage,
}

/// Errors raised while invoking platform commands.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    /// The command could not be started.
    #[error("Failed to run '{command}': {error}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The command ran but reported failure.
    #[error("'{command}' failed ({status}): {output}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// The exit status, as text.
        status: String,
        /// Whatever the command printed.
        output: String,
    },

    /// A command was configured with no program to run.
    #[error("Empty command configured")]
    EmptyCommand,
}

/// Top-level errors returned by [`run`](crate::run).
#[derive(thiserror::Error, Debug)]
pub enum CleanerError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A platform command failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Failed to serialize a report to JSON.
    #[error("Failed to serialize to JSON: {error}")]
    Serialize {
        /// The underlying serialization error.
        #[source]
        error: serde_json::Error,
    },

    /// Failed to create a progress bar.
    #[error("Failed to create progress bar: {0}")]
    ProgressBar(String),

    /// Some paths could not be fully cleared.
    #[error("{failed} path(s) could not be fully cleared")]
    Incomplete {
        /// How many top-level paths failed.
        failed: usize,
    },
}
