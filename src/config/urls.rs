//! Default repository remotes

/// Core property library (provides the shared root for wrapper builds)
pub const FLUIDLIB_REMOTE: &str = "https://github.com/fluidkit/fluidlib.git";

/// Language wrappers around the core library
pub const FLUIDLIB_WRAPPERS_REMOTE: &str = "https://github.com/fluidkit/fluidlib-wrappers.git";

/// End-user applications built on the core library
pub const FLUIDLIB_APPS_REMOTE: &str = "https://github.com/fluidkit/fluidlib-apps.git";
