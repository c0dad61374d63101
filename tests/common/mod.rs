//! Common test utilities and helpers
//!
//! Shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test workspace
///
/// Creates a temporary directory acting as the orchestrator's working
/// directory and provides utilities for setting up test scenarios.
pub struct TestWorkspace {
    /// Temporary directory for the test run
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new test workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace
    #[allow(dead_code)]
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the workspace
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Check whether a path exists in the workspace
    #[allow(dead_code)]
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Lay out a stub toolchain directory with executable `cmake` and
    /// `ctest` scripts, returning the cmake path.
    #[allow(dead_code)]
    pub fn stub_toolchain(&self) -> PathBuf {
        let bin = self.path().join("toolchain");
        std::fs::create_dir_all(&bin).expect("Failed to create toolchain dir");

        // cmake stub: generate a Makefile with a no-op install target
        write_executable(
            &bin.join("cmake"),
            "#!/bin/sh\nprintf 'install:\\n\\ttrue\\n' > Makefile\n",
        );
        // ctest stub: always green
        write_executable(&bin.join("ctest"), "#!/bin/sh\nexit 0\n");

        bin.join("cmake")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a small executable script
#[allow(dead_code)]
pub fn write_executable(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
}

/// Run the orchestrate binary in the workspace with the given arguments
#[allow(dead_code)]
pub fn run_orchestrate(workspace: &TestWorkspace, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_orchestrate"));
    cmd.current_dir(workspace.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute orchestrate")
}
