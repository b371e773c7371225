//! # Android app data cleaner
//!
//! Clears an application's own storage: caches, databases, shared
//! preferences, files and caller-supplied paths. Two strategies are
//! available: the platform's "clear app data" command, or walking and
//! erasing the well-known directories with [`eraser::PathEraser`] and then
//! relaunching the app.

pub mod cli;
mod commands;
pub mod config;
pub mod eraser;
pub mod errors;
pub mod paths;
pub mod platform;
pub mod storage;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::Config,
    errors::CleanerError,
};

/// Runs the command given on the command line.
///
/// Logging goes to standard error. Its level follows `-v` unless `RUST_LOG`
/// is set.
pub fn run() -> Result<(), CleanerError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.global.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli.global)?;
    match cli.command {
        Commands::Erase { paths, options } => commands::erase(&config, &paths, &options),
        Commands::Clean {
            custom_paths,
            full,
            restart,
            options,
        } => commands::clean(&config, &custom_paths, full, restart, &options),
        Commands::ClearData => commands::clear_data(&config),
        Commands::DropDatabase { name } => commands::drop_database(&config, &name),
        Commands::Usage { json } => commands::usage(&config, json),
    }
}

/// Loads the configuration file, if one was given, and applies the
/// command-line overrides.
fn resolve_config(global: &GlobalArgs) -> Result<Config, CleanerError> {
    let config = match &global.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    Ok(global.apply_to(config))
}
