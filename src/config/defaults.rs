//! Default configuration values

/// Primary integration branch of every repository in the suite
pub const MAINLINE_BRANCH: &str = "master";

/// Name of the remote all repositories are cloned from
pub const REMOTE_NAME: &str = "origin";

/// Prefix for local change-set branches (`PR-<id>`)
pub const PR_BRANCH_PREFIX: &str = "PR-";

/// Build output directory created inside each repository clone
pub const BUILD_DIR_NAME: &str = "build";

/// Repository manifest file looked up in the working directory
pub const MANIFEST_NAME: &str = "repos.toml";

/// ctest label excluded from wrapper test runs
pub const EXCLUDED_TEST_LABEL: &str = "slow";

/// Configure option carrying the shared root checkout path
pub const SHARED_ROOT_OPTION: &str = "FLUIDLIB_ROOT";

/// Name of the build driver invoked with `-j <n> install`
pub const BUILD_DRIVER: &str = "make";

/// Name of the test runner resolved next to the configure tool
pub const TEST_RUNNER: &str = "ctest";
