//! The multi-repository run loop
//!
//! Processes the declared repositories strictly in order: reset the
//! shared install directory, discover pending change requests from the
//! environment, then for each repository clone/checkout/merge/build, and
//! finally (only after every repository succeeded) restore mainline
//! everywhere and delete the temporary change-set branches.
//!
//! There is no retry, no checkpointing, and no partial-success
//! reporting: the first failing external command aborts the run and the
//! cleanup phase does not execute. A re-run starts from the first
//! repository again, reusing existing clones.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::defaults::MAINLINE_BRANCH;
use crate::core::build;
use crate::core::change_request::ChangeRequests;
use crate::core::context::RunContext;
use crate::core::repo_set::{RepoSet, RepoSpec};
use crate::error::OrchestrateError;
use crate::infra::filesystem;
use crate::infra::git::{pr_branch, GitCli};
use crate::infra::process::Runner;
use crate::infra::workdir::{self, ScopedWorkdir};

/// Result of a successful orchestration run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Repositories processed, in order
    pub repos_processed: Vec<String>,
    /// Change requests that were merged and cleaned up (repo -> id)
    pub merged_change_requests: BTreeMap<String, String>,
    /// Shared install directory populated by the run
    pub install_dir: PathBuf,
}

/// Sequential multi-repository orchestrator
pub struct Orchestrator<'a, R: Runner> {
    runner: &'a R,
    repos: &'a RepoSet,
    ctx: RunContext,
    env: Box<dyn Fn(&str) -> Option<String> + 'a>,
}

impl<'a, R: Runner> Orchestrator<'a, R> {
    /// Create an orchestrator reading change requests from the process
    /// environment
    pub fn new(runner: &'a R, repos: &'a RepoSet, ctx: RunContext) -> Self {
        Self {
            runner,
            repos,
            ctx,
            env: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replace the environment lookup (used by tests)
    #[must_use]
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Execute the full run
    pub fn run(mut self) -> Result<RunSummary, OrchestrateError> {
        self.reset_install_dir()?;

        let changes = ChangeRequests::discover(self.repos, &self.env)?;

        for repo in self.repos {
            self.process_repo(repo, &changes)?;
        }

        self.cleanup(&changes)?;

        Ok(RunSummary {
            repos_processed: self.repos.names().map(String::from).collect(),
            merged_change_requests: changes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            install_dir: self.ctx.install_dir.clone(),
        })
    }

    /// Delete the install directory before any repository is touched.
    ///
    /// A partially-cleaned install directory is unsafe to build into, so
    /// a failed removal aborts the whole run.
    fn reset_install_dir(&self) -> Result<(), OrchestrateError> {
        if let Err(e) = filesystem::remove_dir_all(&self.ctx.install_dir) {
            tracing::warn!("Could not reset install directory: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Clone/checkout/merge/build one repository
    fn process_repo(
        &mut self,
        repo: &RepoSpec,
        changes: &ChangeRequests,
    ) -> Result<(), OrchestrateError> {
        tracing::info!("Processing repository: {}", repo.name);
        let git = GitCli::new(self.runner, &self.ctx.git);

        // Idempotent clone: existing checkouts are reused across runs
        let repo_dir = Path::new(&repo.name);
        if !repo_dir.exists() {
            git.clone_repo(&repo.remote_url, repo_dir)?;
        }

        let _wd = ScopedWorkdir::enter(repo_dir)?;

        git.checkout(MAINLINE_BRANCH)?;

        if let Some(id) = changes.get(&repo.name) {
            // Validate the change set against current mainline
            git.fetch_pull_request(id)?;
            git.checkout(&pr_branch(id))?;
            git.merge(MAINLINE_BRANCH)?;
        } else {
            git.pull(MAINLINE_BRANCH)?;
        }

        if repo.provides_shared_root {
            let checkout = workdir::current()?;
            tracing::info!("Shared root: {}", checkout.display());
            self.ctx.shared_root = Some(checkout);
        }

        build::build_repo(self.runner, &self.ctx, repo)?;

        Ok(())
    }

    /// Restore mainline and delete change-set branches.
    ///
    /// Runs only after every repository processed successfully.
    fn cleanup(&self, changes: &ChangeRequests) -> Result<(), OrchestrateError> {
        let git = GitCli::new(self.runner, &self.ctx.git);

        for repo in self.repos {
            let Some(id) = changes.get(&repo.name) else {
                continue;
            };
            tracing::info!("Cleaning up {}: deleting {}", repo.name, pr_branch(id));

            let _wd = ScopedWorkdir::enter(Path::new(&repo.name))?;
            git.checkout(MAINLINE_BRANCH)?;
            git.delete_branch(&pr_branch(id))?;
        }
        Ok(())
    }
}

impl<R: Runner> std::fmt::Debug for Orchestrator<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("repos", &self.repos)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
