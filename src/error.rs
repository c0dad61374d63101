//! Error types for orchestrate
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::git::GitError;
use crate::infra::process::ProcessError;
use crate::infra::workdir::WorkdirError;

/// Repository table errors
#[derive(Error, Debug)]
pub enum RepoSetError {
    /// Manifest parse error
    #[error("Failed to parse repository manifest: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    /// Manifest could not be read
    #[error("Failed to read repository manifest '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Repository name declared twice
    #[error("Repository '{name}' is declared more than once")]
    DuplicateName { name: String },

    /// Repository with an empty name
    #[error("Repository at position {index} has an empty name")]
    EmptyName { index: usize },

    /// More than one repository claims to provide the shared root
    #[error("Repositories '{first}' and '{second}' both provide the shared root")]
    MultipleSharedRoots { first: String, second: String },

    /// A wrapper build precedes the shared-root provider
    #[error(
        "Repository '{wrapper}' needs the shared root but no provider is declared before it"
    )]
    SharedRootUnavailable { wrapper: String },
}

/// Change-request discovery errors
#[derive(Error, Debug)]
pub enum ChangeRequestError {
    /// Identifier is not a plain number
    #[error(
        "Change request for '{repo}' has invalid id '{value}' (expected a numeric pull-request id)"
    )]
    InvalidId { repo: String, value: String },
}

/// Run-context preparation errors
#[derive(Error, Debug)]
pub enum ContextError {
    /// Configure tool missing at the given path
    #[error("Configure tool not found at '{path}'")]
    CmakeNotFound { path: PathBuf },

    /// Test runner missing next to the configure tool
    #[error("Test runner not found at '{path}' (expected next to the configure tool)")]
    CtestNotFound { path: PathBuf },

    /// Required tool not on PATH
    #[error("Required tool '{tool}' not found on PATH: {error}")]
    ToolNotFound { tool: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },
}

/// Build procedure errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Configure step failed
    #[error("Configure failed for repository '{repo}': {error}")]
    ConfigureFailed { repo: String, error: String },

    /// Compile/install step failed
    #[error("Build failed for repository '{repo}': {error}")]
    CompileFailed { repo: String, error: String },

    /// Test suite failed
    #[error("Tests failed for repository '{repo}': {error}")]
    TestsFailed { repo: String, error: String },

    /// Wrapper build dispatched before the shared root was recorded
    #[error("Repository '{repo}' requires the shared root, which has not been built yet")]
    MissingSharedRoot { repo: String },

    /// Build directory could not be prepared
    #[error("Failed to prepare build directory for '{repo}': {source}")]
    BuildDir {
        repo: String,
        source: FilesystemError,
    },

    /// Build directory could not be entered
    #[error("Failed to enter build directory for '{repo}': {error}")]
    EnterBuildDir { repo: String, error: String },
}

/// Top-level orchestrate error type
#[derive(Error, Debug)]
pub enum OrchestrateError {
    /// Repository table error
    #[error("Repository table error: {0}")]
    RepoSet(#[from] RepoSetError),

    /// Change-request discovery error
    #[error("Change request error: {0}")]
    ChangeRequest(#[from] ChangeRequestError),

    /// Run-context error
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Working-directory error
    #[error("Working directory error: {0}")]
    Workdir(#[from] WorkdirError),

    /// External command error
    #[error("Command error: {0}")]
    Process(#[from] ProcessError),
}
