//! Orchestrate - multi-repository build and test orchestrator
//!
//! This library provides the core functionality for building a suite of
//! related git repositories in dependency order: cloning missing repos,
//! optionally merging a requested pull-request branch into each, running
//! the per-repository configure/build/install/test procedure, and
//! restoring every repository to its mainline branch afterwards.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (repo table, change requests, run loop)
//! - [`infra`] - Infrastructure layer (processes, git, filesystem, cwd)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
