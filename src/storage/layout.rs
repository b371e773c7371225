//! # Storage Layout
//!
//! The directories an Android package keeps its data in.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::paths::{
    CACHE_DIRECTORY, DATABASES_DIRECTORY, EXTERNAL_APP_DATA_DIRECTORY, FILES_DIRECTORY,
    SHARED_PREFS_DIRECTORY,
};

/// A named location that gets cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanTargetKind {
    /// `<data>/cache`
    InternalCache,
    /// `<external>/Android/data/<package>/cache`
    ExternalCache,
    /// `<data>/databases`
    Databases,
    /// `<data>/shared_prefs`
    SharedPrefs,
    /// `<data>/files`
    Files,
    /// A path supplied by the caller.
    Custom,
    /// An entry of the package's data directory.
    InternalStorage,
    /// An entry of the package's public directory on external storage.
    ExternalStorage,
}

impl CleanTargetKind {
    /// Converts the enum type to a string.
    pub fn to_str(&self) -> &'static str {
        match self {
            CleanTargetKind::InternalCache => "internal cache",
            CleanTargetKind::ExternalCache => "external cache",
            CleanTargetKind::Databases => "databases",
            CleanTargetKind::SharedPrefs => "shared preferences",
            CleanTargetKind::Files => "files",
            CleanTargetKind::Custom => "custom",
            CleanTargetKind::InternalStorage => "internal storage",
            CleanTargetKind::ExternalStorage => "external storage",
        }
    }
}

impl fmt::Display for CleanTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Storage directories of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageLayout {
    /// The package name, e.g. `com.example.app`.
    pub package: String,
    /// The private data directory, `<data_root>/<package>`.
    pub data_directory: PathBuf,
    /// Internal cache directory.
    pub cache_directory: PathBuf,
    /// SQLite databases directory.
    pub databases_directory: PathBuf,
    /// Shared preferences directory.
    pub shared_prefs_directory: PathBuf,
    /// Files directory.
    pub files_directory: PathBuf,
    /// External cache directory; `None` when external storage is not mounted.
    pub external_cache_directory: Option<PathBuf>,
    /// The package's public directory, `<external_root>/<package>`; `None`
    /// when external storage is not mounted.
    pub public_directory: Option<PathBuf>,
}

impl StorageLayout {
    /// Builds the layout of `package`.
    ///
    /// # Arguments
    ///
    /// - `package` - The package name.
    /// - `data_root` - The directory holding private data directories,
    ///   normally `/data/data`.
    /// - `external_root` - The mounted shared storage volume, or `None` if
    ///   external storage is unavailable.
    pub fn new(package: &str, data_root: &Path, external_root: Option<&Path>) -> Self {
        let data_directory = data_root.join(package);
        Self {
            package: package.to_string(),
            cache_directory: data_directory.join(CACHE_DIRECTORY),
            databases_directory: data_directory.join(DATABASES_DIRECTORY),
            shared_prefs_directory: data_directory.join(SHARED_PREFS_DIRECTORY),
            files_directory: data_directory.join(FILES_DIRECTORY),
            external_cache_directory: external_root.map(|root| {
                root.join(EXTERNAL_APP_DATA_DIRECTORY)
                    .join(package)
                    .join(CACHE_DIRECTORY)
            }),
            public_directory: external_root.map(|root| root.join(package)),
            data_directory,
        }
    }

    /// Returns true if the layout includes external storage.
    pub fn external_mounted(&self) -> bool {
        self.external_cache_directory.is_some()
    }

    /// The well-known directories in clearing order: internal cache,
    /// external cache (only when mounted), databases, shared preferences
    /// and files.
    pub fn well_known_targets(&self) -> Vec<(CleanTargetKind, PathBuf)> {
        let mut targets = vec![(CleanTargetKind::InternalCache, self.cache_directory.clone())];
        if let Some(external_cache) = &self.external_cache_directory {
            targets.push((CleanTargetKind::ExternalCache, external_cache.clone()));
        }
        targets.push((CleanTargetKind::Databases, self.databases_directory.clone()));
        targets.push((
            CleanTargetKind::SharedPrefs,
            self.shared_prefs_directory.clone(),
        ));
        targets.push((CleanTargetKind::Files, self.files_directory.clone()));
        targets
    }
}
