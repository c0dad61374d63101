//! External command execution
//!
//! Every external tool the orchestrator drives (git, the configure tool,
//! the build driver, the test runner) goes through the [`Runner`] trait.
//! The production implementation spawns real processes with inherited
//! stdio; tests substitute a recording implementation.
//!
//! A non-zero exit is always an error. There are no retries.

use std::path::Path;
use thiserror::Error;

/// External command errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The command could not be launched at all
    #[error("Failed to launch '{program}': {error}")]
    Spawn { program: String, error: String },

    /// The command ran and exited non-zero
    #[error("Command '{command}' failed with {status}")]
    Failed { command: String, status: String },
}

/// Seam for external command execution.
///
/// Commands run in the current working directory of the process; the
/// orchestrator scopes directory changes around invocations with
/// [`crate::infra::workdir::ScopedWorkdir`].
pub trait Runner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[&str]) -> Result<(), ProcessError>;
}

/// Runner that spawns real processes with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl Runner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<(), ProcessError> {
        tracing::debug!("Running: {} {}", program.display(), args.join(" "));

        let status = std::process::Command::new(program)
            .args(args)
            .status()
            .map_err(|e| ProcessError::Spawn {
                program: program.display().to_string(),
                error: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                command: format!("{} {}", program.display(), args.join(" ")),
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_spawn_error_for_missing_program() {
        let runner = SystemRunner::new();
        let result = runner.run(Path::new("/nonexistent/program-xyz"), &["--version"]);

        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_nonzero_exit_is_an_error() {
        let runner = SystemRunner::new();
        let result = runner.run(Path::new("/bin/sh"), &["-c", "exit 3"]);

        match result {
            Err(ProcessError::Failed { command, status }) => {
                assert!(command.contains("/bin/sh"));
                assert!(status.contains('3'));
            }
            other => panic!("Expected Failed error, got: {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_zero_exit_is_ok() {
        let runner = SystemRunner::new();
        let result = runner.run(Path::new("/bin/sh"), &["-c", "exit 0"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_display_contains_program() {
        let err = ProcessError::Spawn {
            program: PathBuf::from("/usr/bin/git").display().to_string(),
            error: "not found".to_string(),
        };
        assert!(err.to_string().contains("/usr/bin/git"));
    }
}
