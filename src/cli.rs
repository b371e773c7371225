//! # CLI
//!
//! This module defines the data structures used to parse command line
//! arguments when running the program.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{config::Config, eraser::DirectoryPolicy};

/// This struct represents the top-level CLI entry point for the tool.
#[derive(Parser, Debug)]
#[command(about = "Clears an Android application's own storage", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command. They override the configuration file.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The package whose data is cleared, e.g. "com.example.app".
    #[arg(long, short, global = true)]
    pub package: Option<String>,

    /// Directory holding private app data directories.
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    /// The shared storage volume.
    #[arg(long, global = true)]
    pub external_root: Option<PathBuf>,

    /// Treat external storage as unmounted.
    #[arg(long, global = true)]
    pub no_external: bool,

    /// Increase log verbosity; repeat for more.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Overrides the values of `config` with the flags that were given.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(package) = &self.package {
            config.package = Some(package.clone());
        }
        if let Some(data_root) = &self.data_root {
            config.data_root = data_root.clone();
        }
        if let Some(external_root) = &self.external_root {
            config.external_root = external_root.clone();
        }
        if self.no_external {
            config.external_mounted = Some(false);
        }
        config
    }

    /// The default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Options of commands that erase paths.
#[derive(Args, Debug, Default)]
pub struct EraseArgs {
    /// Also remove directories once they are empty.
    #[arg(long)]
    pub remove_shells: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

impl EraseArgs {
    /// The directory policy requested, falling back to `configured`.
    pub fn policy(&self, configured: DirectoryPolicy) -> DirectoryPolicy {
        if self.remove_shells {
            DirectoryPolicy::RemoveShells
        } else {
            configured
        }
    }
}

/// This enum represents the different commands available.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recursively erase the given paths.
    Erase {
        /// Paths to erase.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        options: EraseArgs,
    },

    /// Manually clear the package's caches, databases, preferences and files.
    Clean {
        /// Extra paths to erase after the well-known directories.
        custom_paths: Vec<PathBuf>,

        /// Also clear the whole data directory and the public external
        /// directory.
        #[arg(long)]
        full: bool,

        /// Relaunch the application afterwards.
        #[arg(long)]
        restart: bool,

        #[command(flatten)]
        options: EraseArgs,
    },

    /// Clear all application data through the package manager.
    ClearData,

    /// Delete one database and its journal files.
    DropDatabase {
        /// The database file name, e.g. "app.db".
        name: String,
    },

    /// Show how much space the package's directories use.
    Usage {
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
}
