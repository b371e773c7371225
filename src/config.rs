//! # Configuration
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags. Every field has a default, so a file only needs the
//! keys it wants to change:
//!
//! ```json
//! {
//!     "package": "com.example.app",
//!     "custom_paths": ["/sdcard/Download/example"],
//!     "directory_policy": "remove_shells"
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    eraser::DirectoryPolicy,
    errors::ConfigError,
    paths::{DATA_ROOT, EXTERNAL_STORAGE_ROOT, PRESERVE_PATTERN},
    platform::{CLEAR_COMMAND, FORCE_STOP_COMMAND, LAUNCH_COMMAND, to_command},
    storage::StorageLayout,
};

/// Settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The package whose data is cleared.
    pub package: Option<String>,
    /// The directory holding private data directories.
    pub data_root: PathBuf,
    /// The shared storage volume.
    pub external_root: PathBuf,
    /// Whether external storage is mounted; detected from `external_root`
    /// when unset.
    pub external_mounted: Option<bool>,
    /// Extra paths erased after the well-known directories.
    pub custom_paths: Vec<PathBuf>,
    /// Data directory entries whose names contain this are preserved.
    pub preserve_pattern: String,
    /// What happens to directories once emptied.
    pub directory_policy: DirectoryPolicy,
    /// Command that clears all application data; the package name is
    /// appended as the last argument.
    pub clear_command: Vec<String>,
    /// Command that stops the application before a restart. Arguments equal
    /// to `{package}` are replaced with the package name.
    pub restart_stop_command: Vec<String>,
    /// Command that launches the application after it was stopped, with the
    /// same `{package}` substitution.
    pub restart_launch_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            data_root: PathBuf::from(DATA_ROOT),
            external_root: PathBuf::from(EXTERNAL_STORAGE_ROOT),
            external_mounted: None,
            custom_paths: Vec::new(),
            preserve_pattern: PRESERVE_PATTERN.to_string(),
            directory_policy: DirectoryPolicy::default(),
            clear_command: to_command(&CLEAR_COMMAND),
            restart_stop_command: to_command(&FORCE_STOP_COMMAND),
            restart_launch_command: to_command(&LAUNCH_COMMAND),
        }
    }
}

impl Config {
    /// The configured package name.
    ///
    /// # Returns
    ///
    /// The name, or [`ConfigError::MissingPackage`] if none is set.
    pub fn package(&self) -> Result<&str, ConfigError> {
        self.package
            .as_deref()
            .filter(|package| !package.is_empty())
            .ok_or(ConfigError::MissingPackage)
    }

    /// Returns true if external storage should be treated as mounted.
    pub fn external_mounted(&self) -> bool {
        self.external_mounted
            .unwrap_or_else(|| self.external_root.is_dir())
    }

    /// Builds the storage layout of the configured package.
    pub fn layout(&self) -> Result<StorageLayout, ConfigError> {
        let external_root = self
            .external_mounted()
            .then_some(self.external_root.as_path());
        Ok(StorageLayout::new(
            self.package()?,
            &self.data_root,
            external_root,
        ))
    }
}

/// Reads a configuration file.
///
/// # Arguments
///
/// - `path` - The JSON configuration file.
///
/// # Returns
///
/// The parsed [`Config`] on success and [`ConfigError`] on failure.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw_config = fs::read_to_string(path).map_err(|error| ConfigError::IoRead {
        path: path.to_path_buf(),
        error,
    })?;
    serde_json::from_str(&raw_config).map_err(|error| ConfigError::Deserialize {
        path: path.to_path_buf(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_android_storage() {
        let config = Config::default();

        assert_eq!(config.data_root, PathBuf::from("/data/data"));
        assert_eq!(config.external_root, PathBuf::from("/storage/emulated/0"));
        assert_eq!(config.preserve_pattern, "lib");
        assert_eq!(config.directory_policy, DirectoryPolicy::KeepShells);
        assert_eq!(config.clear_command, vec!["pm", "clear"]);
        assert_eq!(
            config.restart_stop_command,
            vec!["am", "force-stop", "{package}"]
        );
        assert_eq!(config.restart_launch_command[..3], ["monkey", "-p", "{package}"]);
    }

    #[test]
    fn loads_restart_commands() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("cleaner.json");
        fs::write(
            &path,
            r#"{"restart_stop_command": ["true"], "restart_launch_command": ["am", "{package}"]}"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.restart_stop_command, vec!["true"]);
        assert_eq!(config.restart_launch_command, vec!["am", "{package}"]);
        assert_eq!(config.clear_command, vec!["pm", "clear"]);
    }

    #[test]
    fn loads_partial_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("cleaner.json");
        fs::write(
            &path,
            r#"{"package": "com.example.app", "directory_policy": "remove_shells"}"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.package().unwrap(), "com.example.app");
        assert_eq!(config.directory_policy, DirectoryPolicy::RemoveShells);
        assert_eq!(config.data_root, PathBuf::from("/data/data"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("cleaner.json");
        fs::write(&path, r#"{"packge": "typo"}"#).unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Deserialize { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let directory = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&directory.path().join("missing.json")),
            Err(ConfigError::IoRead { .. })
        ));
    }

    #[test]
    fn layout_requires_a_package() {
        assert!(matches!(
            Config::default().layout(),
            Err(ConfigError::MissingPackage)
        ));
    }

    #[test]
    fn unmounted_external_storage_has_no_external_paths() {
        let config = Config {
            package: Some("pkg".to_string()),
            external_mounted: Some(false),
            ..Config::default()
        };

        let layout = config.layout().unwrap();
        assert!(layout.external_cache_directory.is_none());
        assert!(layout.public_directory.is_none());
    }

    #[test]
    fn detects_mounted_external_storage() {
        let external = tempfile::tempdir().unwrap();
        let config = Config {
            package: Some("pkg".to_string()),
            external_root: external.path().to_path_buf(),
            ..Config::default()
        };

        assert!(config.external_mounted());
        assert_eq!(
            config.layout().unwrap().public_directory,
            Some(external.path().join("pkg"))
        );
    }
}
