//! Git operations
//!
//! Drives the user's `git` binary through the [`Runner`] seam. The
//! orchestrator only needs the handful of verbs the per-repository flow
//! uses: clone, checkout, fast-forward pull, pull-request fetch, merge,
//! and forced branch deletion. All of them operate on the current working
//! directory, which the caller scopes with
//! [`crate::infra::workdir::ScopedWorkdir`].

use std::path::Path;
use thiserror::Error;

use crate::config::defaults::{PR_BRANCH_PREFIX, REMOTE_NAME};
use crate::infra::process::Runner;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to clone repository
    #[error("Failed to clone '{url}': {error}")]
    CloneFailed { url: String, error: String },

    /// Failed to checkout a branch
    #[error("Failed to checkout '{branch}': {error}")]
    CheckoutFailed { branch: String, error: String },

    /// Failed to pull the mainline branch
    #[error("Failed to pull '{branch}' from '{remote}': {error}")]
    PullFailed {
        remote: String,
        branch: String,
        error: String,
    },

    /// Failed to fetch a pull-request head
    #[error("Failed to fetch '{refspec}': {error}")]
    FetchFailed { refspec: String, error: String },

    /// Failed to merge a branch
    #[error("Failed to merge '{branch}': {error}")]
    MergeFailed { branch: String, error: String },

    /// Failed to delete a branch
    #[error("Failed to delete branch '{branch}': {error}")]
    BranchDeleteFailed { branch: String, error: String },
}

/// Local branch name for a pull-request id (e.g. `PR-42`).
pub fn pr_branch(id: &str) -> String {
    format!("{PR_BRANCH_PREFIX}{id}")
}

/// Fetch refspec mapping a hosted pull request to its local branch
/// (e.g. `pull/42/head:PR-42`).
pub fn pr_refspec(id: &str) -> String {
    format!("pull/{id}/head:{}", pr_branch(id))
}

/// Git operations over a command runner
pub struct GitCli<'a, R: Runner> {
    runner: &'a R,
    program: &'a Path,
}

impl<'a, R: Runner> GitCli<'a, R> {
    /// Create a new git wrapper around `program` (the resolved git binary)
    pub fn new(runner: &'a R, program: &'a Path) -> Self {
        Self { runner, program }
    }

    /// Clone `url` into `dest` (relative to the current directory)
    pub fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let dest = dest.display().to_string();
        self.runner
            .run(self.program, &["clone", url, &dest])
            .map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                error: e.to_string(),
            })
    }

    /// Checkout an existing branch in the current repository
    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run(self.program, &["checkout", branch])
            .map_err(|e| GitError::CheckoutFailed {
                branch: branch.to_string(),
                error: e.to_string(),
            })
    }

    /// Fast-forward pull of `branch` from the default remote
    pub fn pull(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run(self.program, &["pull", REMOTE_NAME, branch])
            .map_err(|e| GitError::PullFailed {
                remote: REMOTE_NAME.to_string(),
                branch: branch.to_string(),
                error: e.to_string(),
            })
    }

    /// Fetch the head of pull request `id` into its local `PR-<id>` branch
    pub fn fetch_pull_request(&self, id: &str) -> Result<(), GitError> {
        let refspec = pr_refspec(id);
        self.runner
            .run(self.program, &["fetch", REMOTE_NAME, &refspec])
            .map_err(|e| GitError::FetchFailed {
                refspec,
                error: e.to_string(),
            })
    }

    /// Merge `branch` into the currently checked-out branch
    pub fn merge(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run(self.program, &["merge", branch])
            .map_err(|e| GitError::MergeFailed {
                branch: branch.to_string(),
                error: e.to_string(),
            })
    }

    /// Forcibly delete a local branch
    pub fn delete_branch(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run(self.program, &["branch", "-D", branch])
            .map_err(|e| GitError::BranchDeleteFailed {
                branch: branch.to_string(),
                error: e.to_string(),
            })
    }
}

impl<R: Runner> std::fmt::Debug for GitCli<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitCli")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}
