//! # Paths
//!
//! Well-known Android storage locations and directory names.

/// Root under which each package's private data directory lives.
pub const DATA_ROOT: &str = "/data/data";

/// Primary shared storage volume.
pub const EXTERNAL_STORAGE_ROOT: &str = "/storage/emulated/0";

/// Directory of the shared volume holding per-package directories.
pub const EXTERNAL_APP_DATA_DIRECTORY: &str = "Android/data";

/// Cache directory name, both internal and external.
pub const CACHE_DIRECTORY: &str = "cache";

/// SQLite databases directory name.
pub const DATABASES_DIRECTORY: &str = "databases";

/// Shared preferences directory name.
pub const SHARED_PREFS_DIRECTORY: &str = "shared_prefs";

/// Files directory name.
pub const FILES_DIRECTORY: &str = "files";

/// Entries of the data directory whose names contain this are never cleared.
/// It matches the `lib` link to the package's native libraries.
pub const PRESERVE_PATTERN: &str = "lib";

/// Files SQLite keeps next to a database.
pub const DATABASE_COMPANION_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];
