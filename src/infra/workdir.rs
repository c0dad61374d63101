//! Scoped working-directory changes
//!
//! The process working directory is the one piece of global state the
//! orchestrator mutates: repositories and their build directories are
//! entered before running external tools. [`ScopedWorkdir`] captures the
//! previous directory and restores it when dropped, on every exit path
//! including errors and panics.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Working-directory errors
#[derive(Error, Debug)]
pub enum WorkdirError {
    /// Could not read the current directory
    #[error("Failed to read current directory: {error}")]
    Current { error: String },

    /// Could not change into the target directory
    #[error("Failed to enter directory '{path}': {error}")]
    Enter { path: PathBuf, error: String },
}

/// Return the current working directory.
pub fn current() -> Result<PathBuf, WorkdirError> {
    std::env::current_dir().map_err(|e| WorkdirError::Current {
        error: e.to_string(),
    })
}

/// RAII guard for a working-directory change.
///
/// Restoration on drop is best-effort: if the previous directory vanished
/// there is nothing sensible left to do, so the failure is logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct ScopedWorkdir {
    previous: PathBuf,
}

impl ScopedWorkdir {
    /// Change into `path`, remembering the previous working directory.
    pub fn enter(path: &Path) -> Result<Self, WorkdirError> {
        let previous = current()?;
        std::env::set_current_dir(path).map_err(|e| WorkdirError::Enter {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        tracing::debug!("Entered directory: {}", path.display());
        Ok(Self { previous })
    }

    /// The directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for ScopedWorkdir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!(
                "Failed to restore working directory to '{}': {e}",
                self.previous.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_enter_and_restore() {
        let before = current().unwrap();
        let temp = TempDir::new().unwrap();

        {
            let guard = ScopedWorkdir::enter(temp.path()).unwrap();
            assert_eq!(guard.previous(), before);
            // Canonicalize to survive symlinked temp dirs (macOS /tmp)
            assert_eq!(
                current().unwrap().canonicalize().unwrap(),
                temp.path().canonicalize().unwrap()
            );
        }

        assert_eq!(current().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_enter_missing_directory_fails() {
        let before = current().unwrap();
        let result = ScopedWorkdir::enter(Path::new("/nonexistent/dir-xyz"));

        assert!(matches!(result, Err(WorkdirError::Enter { .. })));
        assert_eq!(current().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_restore_on_panic() {
        let before = current().unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let _guard = ScopedWorkdir::enter(&path).unwrap();
            panic!("boom");
        });

        assert!(result.is_err());
        assert_eq!(current().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_nested_guards_unwind_in_order() {
        let before = current().unwrap();
        let outer = TempDir::new().unwrap();
        let inner = TempDir::new().unwrap();

        {
            let _a = ScopedWorkdir::enter(outer.path()).unwrap();
            {
                let _b = ScopedWorkdir::enter(inner.path()).unwrap();
                assert_eq!(
                    current().unwrap().canonicalize().unwrap(),
                    inner.path().canonicalize().unwrap()
                );
            }
            assert_eq!(
                current().unwrap().canonicalize().unwrap(),
                outer.path().canonicalize().unwrap()
            );
        }

        assert_eq!(current().unwrap(), before);
    }
}
