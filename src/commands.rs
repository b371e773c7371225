//! # Commands
//!
//! The implementation of each CLI command. Every command prints its results
//! to standard output and turns a partial failure into
//! [`CleanerError::Incomplete`] so the process exits with a non-zero status.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{
    cli::EraseArgs,
    config::Config,
    eraser::PathEraser,
    errors::CleanerError,
    platform::{AppRestarter, CommandRestarter, DataClearer, PackageManagerClearer},
    storage::{self, CleanSummary, format_size},
};

/// Erases each of `paths`.
pub fn erase(config: &Config, paths: &[PathBuf], options: &EraseArgs) -> Result<(), CleanerError> {
    let eraser = PathEraser::os().with_policy(options.policy(config.directory_policy));
    let summary = storage::clean_custom_paths(&eraser, paths);
    print_summary(&summary, options.json)?;
    finish(&summary)
}

/// Manually clears the package's storage, optionally restarting it
/// afterwards.
///
/// # Arguments
///
/// - `config` - The resolved configuration.
/// - `custom_paths` - Extra paths given on the command line; erased after
///   those in the configuration.
/// - `full` - Also clear the whole data directory and public external
///   directory.
/// - `restart` - Relaunch the application once done, even if some paths
///   could not be cleared.
/// - `options` - Directory policy and output format.
pub fn clean(
    config: &Config,
    custom_paths: &[PathBuf],
    full: bool,
    restart: bool,
    options: &EraseArgs,
) -> Result<(), CleanerError> {
    let layout = config.layout()?;
    let eraser = PathEraser::os().with_policy(options.policy(config.directory_policy));

    let mut all_custom_paths = config.custom_paths.clone();
    all_custom_paths.extend_from_slice(custom_paths);

    let progress_bar = if options.json {
        ProgressBar::hidden()
    } else {
        let total_targets = storage::application_data_targets(&layout, &all_custom_paths).len();
        let progress_bar = ProgressBar::new(total_targets as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.white/white} {pos}/{len} {msg}")
                .map_err(|error| CleanerError::ProgressBar(error.to_string()))?
                .progress_chars("##-"),
        );
        progress_bar
    };

    let summary = if full {
        storage::clear_internal_external_storage(
            &eraser,
            &layout,
            &config.preserve_pattern,
            &all_custom_paths,
            &progress_bar,
        )
    } else {
        storage::clean_application_data(&eraser, &layout, &all_custom_paths, &progress_bar)
    };
    progress_bar.finish_and_clear();

    print_summary(&summary, options.json)?;

    if restart {
        CommandRestarter::new(
            config.restart_stop_command.clone(),
            config.restart_launch_command.clone(),
        )
        .restart(&layout.package)?;
    }
    finish(&summary)
}

/// Clears all application data through the platform.
pub fn clear_data(config: &Config) -> Result<(), CleanerError> {
    let package = config.package()?;
    let clearer = PackageManagerClearer::new(config.clear_command.clone());
    if clearer.clear_application_user_data(package)? {
        println!("Cleared all data of '{package}'");
        Ok(())
    } else {
        println!("The platform did not confirm clearing '{package}'");
        Err(CleanerError::Incomplete { failed: 1 })
    }
}

/// Deletes one database and its companions.
pub fn drop_database(config: &Config, name: &str) -> Result<(), CleanerError> {
    let layout = config.layout()?;
    let eraser = PathEraser::os();
    if storage::clean_database_by_name(&eraser, &layout, name) {
        println!("Dropped database '{name}'");
        Ok(())
    } else {
        println!("Failed to drop database '{name}'");
        Err(CleanerError::Incomplete { failed: 1 })
    }
}

/// Prints the size of each well-known directory.
pub fn usage(config: &Config, json: bool) -> Result<(), CleanerError> {
    let layout = config.layout()?;
    let usage = storage::storage_usage(&layout);

    if json {
        return print_json(&usage);
    }
    for target in &usage {
        println!(
            "{:<20} {:>10}  {}",
            target.kind.to_str(),
            format_size(target.bytes),
            target.path.display()
        );
    }
    let total: u64 = usage.iter().map(|target| target.bytes).sum();
    println!("{:<20} {:>10}", "total", format_size(total));
    Ok(())
}

fn print_summary(summary: &CleanSummary, json: bool) -> Result<(), CleanerError> {
    if json {
        return print_json(summary);
    }
    for target in &summary.targets {
        let status = if target.succeeded { "cleared" } else { "FAILED" };
        println!("{status:<8} {:<20} {}", target.kind.to_str(), target.path.display());
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CleanerError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|error| CleanerError::Serialize { error })?;
    println!("{json}");
    Ok(())
}

fn finish(summary: &CleanSummary) -> Result<(), CleanerError> {
    match summary.failed().count() {
        0 => Ok(()),
        failed => Err(CleanerError::Incomplete { failed }),
    }
}
