//! Per-run context
//!
//! One [`RunContext`] is constructed at startup and passed to every
//! per-repository step, replacing ad-hoc global state: resolved tool
//! paths, the install directory, the per-kind extra configure options,
//! and the shared-root slot recorded once the provider repository has
//! been checked out.

use std::path::{Path, PathBuf};

use crate::config::defaults::{BUILD_DRIVER, TEST_RUNNER};
use crate::error::ContextError;

/// State shared across one orchestration run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Resolved configure tool (cmake) executable
    pub cmake: PathBuf,
    /// Resolved test runner (ctest), sibling of the configure tool
    pub ctest: PathBuf,
    /// Resolved git binary
    pub git: PathBuf,
    /// Resolved build driver (make)
    pub make: PathBuf,
    /// Install directory shared by every repository's `install` target
    pub install_dir: PathBuf,
    /// Extra configure options for core builds
    pub core_options: Vec<String>,
    /// Extra configure options for wrapper builds
    pub wrapper_options: Vec<String>,
    /// Build parallelism for the build driver
    pub jobs: usize,
    /// Checkout path of the shared-root provider, recorded during the run
    pub shared_root: Option<PathBuf>,
}

impl RunContext {
    /// Resolve tools and assemble the context.
    ///
    /// Fails fast (before anything destructive happens) if the configure
    /// tool is missing, its sibling test runner is missing, or git/make
    /// cannot be found on PATH. The two option strings are the
    /// pre-joined single-token lists of the CLI contract, split on
    /// whitespace.
    pub fn prepare(
        cmake: &Path,
        install_dir: &Path,
        core_options: &str,
        wrapper_options: &str,
    ) -> Result<Self, ContextError> {
        if !cmake.is_file() {
            return Err(ContextError::CmakeNotFound {
                path: cmake.to_path_buf(),
            });
        }

        let ctest = cmake
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(TEST_RUNNER);
        if !ctest.is_file() {
            return Err(ContextError::CtestNotFound { path: ctest });
        }

        let git = which::which("git").map_err(|e| ContextError::ToolNotFound {
            tool: "git".to_string(),
            error: e.to_string(),
        })?;
        let make = which::which(BUILD_DRIVER).map_err(|e| ContextError::ToolNotFound {
            tool: BUILD_DRIVER.to_string(),
            error: e.to_string(),
        })?;

        Ok(Self {
            cmake: cmake.to_path_buf(),
            ctest,
            git,
            make,
            install_dir: install_dir.to_path_buf(),
            core_options: split_options(core_options),
            wrapper_options: split_options(wrapper_options),
            jobs: num_cpus::get(),
            shared_root: None,
        })
    }

    /// Override the build parallelism
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Split a pre-joined option token into individual configure arguments
fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(String::from).collect()
}
