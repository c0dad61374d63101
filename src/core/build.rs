//! Build procedures
//!
//! Each [`BuildKind`] maps to a fixed recipe in a static profile table:
//! the source-relative configure path, the fixed configure options, the
//! optional test-label exclusion, and whether the shared root of the
//! core checkout is passed as a configure parameter.
//!
//! The procedure itself is the same for both kinds: reset the build
//! directory, configure, `make -j <jobs> install`, then run the test
//! suite. Any tool exiting non-zero aborts the whole multi-repo run.

use std::path::Path;

use crate::config::defaults::{BUILD_DIR_NAME, EXCLUDED_TEST_LABEL, SHARED_ROOT_OPTION};
use crate::core::context::RunContext;
use crate::core::repo_set::{BuildKind, RepoSpec};
use crate::error::BuildError;
use crate::infra::filesystem;
use crate::infra::process::Runner;
use crate::infra::workdir::ScopedWorkdir;

/// Fixed per-kind build recipe
#[derive(Debug, Clone, Copy)]
pub struct BuildProfile {
    /// Configure path relative to the build directory
    pub source_path: &'static str,
    /// Fixed configure options for this kind
    pub fixed_options: &'static [&'static str],
    /// Whether the shared root checkout path is passed to configure
    pub needs_shared_root: bool,
    /// ctest label excluded from this kind's test run
    pub excluded_test_label: Option<&'static str>,
}

const CORE_PROFILE: BuildProfile = BuildProfile {
    source_path: "..",
    fixed_options: &["-DFLUIDLIB_STATIC_LIBRARY=ON", "-DBUILD_TESTING=ON"],
    needs_shared_root: false,
    excluded_test_label: None,
};

const WRAPPER_PROFILE: BuildProfile = BuildProfile {
    source_path: "..",
    fixed_options: &["-DBUILD_TESTING=ON"],
    needs_shared_root: true,
    excluded_test_label: Some(EXCLUDED_TEST_LABEL),
};

impl BuildKind {
    /// The fixed recipe for this kind
    pub fn profile(self) -> &'static BuildProfile {
        match self {
            BuildKind::Core => &CORE_PROFILE,
            BuildKind::Wrapper => &WRAPPER_PROFILE,
        }
    }
}

/// Assemble the full configure argument list for a repository.
///
/// Order: source path, fixed options, install prefix, shared root (for
/// kinds that consume it), then the caller-supplied extra options.
pub fn configure_args(ctx: &RunContext, repo: &RepoSpec) -> Result<Vec<String>, BuildError> {
    let profile = repo.kind.profile();
    let mut args: Vec<String> = vec![profile.source_path.to_string()];
    args.extend(profile.fixed_options.iter().map(ToString::to_string));
    args.push(format!(
        "-DCMAKE_INSTALL_PREFIX={}",
        ctx.install_dir.display()
    ));

    if profile.needs_shared_root {
        let shared_root = ctx
            .shared_root
            .as_ref()
            .ok_or_else(|| BuildError::MissingSharedRoot {
                repo: repo.name.clone(),
            })?;
        args.push(format!("-D{SHARED_ROOT_OPTION}={}", shared_root.display()));
    }

    let extra = match repo.kind {
        BuildKind::Core => &ctx.core_options,
        BuildKind::Wrapper => &ctx.wrapper_options,
    };
    args.extend(extra.iter().cloned());
    Ok(args)
}

/// Test-runner argument list for a repository
pub fn test_args(repo: &RepoSpec) -> Vec<String> {
    let mut args = vec!["--output-on-failure".to_string()];
    if let Some(label) = repo.kind.profile().excluded_test_label {
        args.push("-LE".to_string());
        args.push(label.to_string());
    }
    args
}

/// Run the configure/build/install/test procedure for one repository.
///
/// Expects the current working directory to be the repository checkout.
pub fn build_repo<R: Runner>(
    runner: &R,
    ctx: &RunContext,
    repo: &RepoSpec,
) -> Result<(), BuildError> {
    tracing::info!("Building {} ({:?})", repo.name, repo.kind);

    // Stale build output: removal is best-effort, creation is not
    let build_dir = Path::new(BUILD_DIR_NAME);
    filesystem::remove_dir_all_quiet(build_dir);
    filesystem::create_dir_all(build_dir).map_err(|e| BuildError::BuildDir {
        repo: repo.name.clone(),
        source: e,
    })?;

    let _wd = ScopedWorkdir::enter(build_dir).map_err(|e| BuildError::EnterBuildDir {
        repo: repo.name.clone(),
        error: e.to_string(),
    })?;

    configure(runner, ctx, repo)?;
    compile(runner, ctx, repo)?;
    test(runner, ctx, repo)?;

    Ok(())
}

fn configure<R: Runner>(runner: &R, ctx: &RunContext, repo: &RepoSpec) -> Result<(), BuildError> {
    let args = configure_args(ctx, repo)?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runner
        .run(&ctx.cmake, &args)
        .map_err(|e| BuildError::ConfigureFailed {
            repo: repo.name.clone(),
            error: e.to_string(),
        })
}

fn compile<R: Runner>(runner: &R, ctx: &RunContext, repo: &RepoSpec) -> Result<(), BuildError> {
    let jobs = ctx.jobs.to_string();
    runner
        .run(&ctx.make, &["-j", &jobs, "install"])
        .map_err(|e| BuildError::CompileFailed {
            repo: repo.name.clone(),
            error: e.to_string(),
        })
}

fn test<R: Runner>(runner: &R, ctx: &RunContext, repo: &RepoSpec) -> Result<(), BuildError> {
    let args = test_args(repo);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runner
        .run(&ctx.ctest, &args)
        .map_err(|e| BuildError::TestsFailed {
            repo: repo.name.clone(),
            error: e.to_string(),
        })
}
