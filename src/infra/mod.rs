//! Infrastructure layer
//!
//! Handles all side effects: external processes, git invocations,
//! filesystem operations, and the process working directory.

pub mod filesystem;
pub mod git;
pub mod process;
pub mod workdir;
