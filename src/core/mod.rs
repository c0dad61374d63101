//! Core business logic module
//!
//! # Submodules
//!
//! - [`repo_set`] - Ordered repository table and build kinds
//! - [`change_request`] - Pull-request discovery from the environment
//! - [`context`] - Per-run context (tool paths, install dir, options)
//! - [`build`] - Configure/build/install/test procedures
//! - [`orchestrator`] - The sequential multi-repository run loop

pub mod build;
pub mod change_request;
pub mod context;
pub mod orchestrator;
pub mod repo_set;
