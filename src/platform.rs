//! # Platform Capabilities
//!
//! Operations that only the host platform can perform: clearing all of an
//! application's data at once, and relaunching an application. Both are
//! traits so the cleaning workflow does not depend on how they are done; the
//! implementations here shell out to the Android `pm`, `am` and `monkey`
//! tools.

use std::process::{Command, Output};

use tracing::{debug, info};

use crate::errors::PlatformError;

/// Placeholder replaced with the package name in restart commands.
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Command clearing all application data; the package name is appended.
pub const CLEAR_COMMAND: [&str; 2] = ["pm", "clear"];

/// Command terminating an application.
pub const FORCE_STOP_COMMAND: [&str; 3] = ["am", "force-stop", PACKAGE_PLACEHOLDER];

/// Command starting an application's launcher activity.
pub const LAUNCH_COMMAND: [&str; 6] = [
    "monkey",
    "-p",
    PACKAGE_PLACEHOLDER,
    "-c",
    "android.intent.category.LAUNCHER",
    "1",
];

/// Clears all data of an application, the way the system settings screen
/// does.
pub trait DataClearer {
    /// Clears every file, database and preference of `package`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the platform reported success.
    fn clear_application_user_data(&self, package: &str) -> Result<bool, PlatformError>;
}

/// Terminates an application and starts it again from its entry activity.
pub trait AppRestarter {
    /// Restarts `package`.
    fn restart(&self, package: &str) -> Result<(), PlatformError>;
}

/// Clears application data with `pm clear <package>`.
#[derive(Debug, Clone)]
pub struct PackageManagerClearer {
    command: Vec<String>,
}

impl PackageManagerClearer {
    /// Creates a clearer running `command` with the package name appended.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Default for PackageManagerClearer {
    fn default() -> Self {
        Self::new(to_command(&CLEAR_COMMAND))
    }
}

impl DataClearer for PackageManagerClearer {
    fn clear_application_user_data(&self, package: &str) -> Result<bool, PlatformError> {
        let mut command = self.command.clone();
        command.push(package.to_string());
        let output = run_command(&command)?;
        let succeeded = String::from_utf8_lossy(&output.stdout).contains("Success");
        info!(package, succeeded, "cleared application data");
        Ok(succeeded)
    }
}

/// Restarts an application by force-stopping it and launching its
/// launcher activity.
#[derive(Debug, Clone)]
pub struct CommandRestarter {
    stop: Vec<String>,
    launch: Vec<String>,
}

impl CommandRestarter {
    /// Creates a restarter from two commands. Any argument equal to
    /// [`PACKAGE_PLACEHOLDER`] is replaced with the package name.
    pub fn new(stop: Vec<String>, launch: Vec<String>) -> Self {
        Self { stop, launch }
    }
}

impl Default for CommandRestarter {
    fn default() -> Self {
        Self::new(to_command(&FORCE_STOP_COMMAND), to_command(&LAUNCH_COMMAND))
    }
}

impl AppRestarter for CommandRestarter {
    fn restart(&self, package: &str) -> Result<(), PlatformError> {
        run_command(&substitute(&self.stop, package))?;
        run_command(&substitute(&self.launch, package))?;
        info!(package, "restarted application");
        Ok(())
    }
}

/// Converts string literals into an owned command line.
pub fn to_command(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

fn substitute(command: &[String], package: &str) -> Vec<String> {
    command
        .iter()
        .map(|argument| {
            if argument == PACKAGE_PLACEHOLDER {
                package.to_string()
            } else {
                argument.clone()
            }
        })
        .collect()
}

/// Runs a command to completion.
///
/// # Returns
///
/// The command's output if it exited successfully, otherwise a
/// [`PlatformError`].
fn run_command(command: &[String]) -> Result<Output, PlatformError> {
    let (program, arguments) = command.split_first().ok_or(PlatformError::EmptyCommand)?;
    let command_line = command.join(" ");
    debug!(command = %command_line, "running");

    let output = Command::new(program)
        .args(arguments)
        .output()
        .map_err(|error| PlatformError::Spawn {
            command: command_line.clone(),
            error,
        })?;

    if !output.status.success() {
        let mut printed = String::from_utf8_lossy(&output.stdout).into_owned();
        printed.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(PlatformError::CommandFailed {
            command: command_line,
            status: output.status.to_string(),
            output: printed.trim().to_string(),
        });
    }
    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::{to_command as words, *};

    #[test]
    fn reports_success_from_output() {
        let clearer = PackageManagerClearer::new(words(&["echo", "Success"]));
        assert!(clearer.clear_application_user_data("pkg").unwrap());

        let clearer = PackageManagerClearer::new(words(&["echo"]));
        assert!(!clearer.clear_application_user_data("pkg").unwrap());
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let clearer = PackageManagerClearer::new(words(&["false"]));
        assert!(matches!(
            clearer.clear_application_user_data("pkg"),
            Err(PlatformError::CommandFailed { .. })
        ));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let clearer = PackageManagerClearer::new(words(&["/nonexistent/pm"]));
        assert!(matches!(
            clearer.clear_application_user_data("pkg"),
            Err(PlatformError::Spawn { .. })
        ));
    }

    #[test]
    fn empty_command_is_rejected() {
        let restarter = CommandRestarter::new(Vec::new(), words(&["true"]));
        assert!(matches!(
            restarter.restart("pkg"),
            Err(PlatformError::EmptyCommand)
        ));
    }

    #[test]
    fn substitutes_package() {
        assert_eq!(
            substitute(&words(&["am", "force-stop", PACKAGE_PLACEHOLDER]), "pkg"),
            words(&["am", "force-stop", "pkg"])
        );
    }

    #[test]
    fn restarts_with_both_commands() {
        let directory = tempfile::tempdir().unwrap();
        let marker = directory.path().join("launched");
        let restarter = CommandRestarter::new(
            words(&["true"]),
            vec![
                "touch".to_string(),
                marker.to_string_lossy().into_owned(),
            ],
        );

        restarter.restart("pkg").unwrap();
        assert!(marker.exists());
    }
}
