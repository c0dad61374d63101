//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`]
//! module.

pub mod output;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

use crate::core::context::RunContext;
use crate::core::orchestrator::Orchestrator;
use crate::core::repo_set::RepoSet;
use crate::infra::process::{ProcessError, Runner, SystemRunner};
use crate::infra::workdir;
use output::{status, OutputConfig};

/// Orchestrate - multi-repository build and test orchestrator
///
/// Clones the declared repositories into the current directory, merges
/// any pull requests requested through the environment (one variable per
/// repository name holding the PR number), builds each repository in
/// dependency order with the given configure tool, and runs its test
/// suite. Afterwards every repository is restored to mainline.
#[derive(Parser, Debug)]
#[command(name = "orchestrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output the run summary as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the configure tool (cmake); ctest is expected next to it
    pub cmake: PathBuf,

    /// Install directory, deleted and repopulated by the run
    pub install_dir: PathBuf,

    /// Extra configure options for core builds (one pre-joined token)
    #[arg(allow_hyphen_values = true)]
    pub core_options: String,

    /// Extra configure options for wrapper builds (one pre-joined token)
    #[arg(allow_hyphen_values = true)]
    pub wrapper_options: String,
}

impl Cli {
    /// Execute the orchestration run
    pub async fn run(self, output: &OutputConfig) -> Result<()> {
        let cwd = workdir::current().context("Cannot determine working directory")?;
        let repos = RepoSet::load_or_default(&cwd).context("Failed to load repository table")?;

        let ctx = RunContext::prepare(
            &self.cmake,
            &self.install_dir,
            &self.core_options,
            &self.wrapper_options,
        )
        .context("Preflight check failed")?;

        tracing::info!(
            "Orchestrating {} repositories with {} jobs",
            repos.len(),
            ctx.jobs
        );

        let spinner = output.spinner("Starting orchestration");
        let runner = SpinnerRunner::new(SystemRunner::new(), spinner.clone());
        let result = Orchestrator::new(&runner, &repos, ctx).run();
        spinner.finish_and_clear();
        let summary = result.context("Orchestration run failed")?;

        if output.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            output.status(&format!(
                "{} Built {} repositories into {}",
                status::SUCCESS,
                summary.repos_processed.len(),
                summary.install_dir.display()
            ));
            for (repo, id) in &summary.merged_change_requests {
                output.status(&format!("  merged PR #{id} into {repo} (branch removed)"));
            }
        }

        Ok(())
    }
}

/// Runner showing the current command on the progress spinner.
///
/// The spinner ticks while the orchestrator works between commands and
/// is suspended while a child process streams its output directly to
/// the terminal.
struct SpinnerRunner<R> {
    inner: R,
    spinner: ProgressBar,
}

impl<R: Runner> SpinnerRunner<R> {
    fn new(inner: R, spinner: ProgressBar) -> Self {
        Self { inner, spinner }
    }
}

impl<R: Runner> Runner for SpinnerRunner<R> {
    fn run(&self, program: &Path, args: &[&str]) -> Result<(), ProcessError> {
        let name = program
            .file_name()
            .map_or_else(|| program.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.spinner.set_message(format!("{name} {}", args.join(" ")));
        self.spinner.suspend(|| self.inner.run(program, args))
    }
}
