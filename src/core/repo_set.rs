//! Repository table
//!
//! The ordered sequence of repositories the orchestrator processes.
//! Order encodes build dependency: earlier entries must succeed before
//! later ones are attempted, and wrapper builds consume the checkout
//! path of the shared-root provider declared before them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::{defaults::MANIFEST_NAME, urls};
use crate::error::RepoSetError;

/// Build procedure kind.
///
/// A tagged variant instead of dispatch on stored function values: each
/// kind maps to a fixed configure recipe in
/// [`crate::core::build::BuildProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    /// Standalone library build
    Core,
    /// Build that consumes the shared root of the core checkout
    Wrapper,
}

/// One repository in the suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    /// Unique repository name; also the clone directory and the
    /// environment variable carrying its change-request id
    pub name: String,
    /// Remote URL to clone from
    pub remote_url: String,
    /// Build procedure kind
    pub kind: BuildKind,
    /// Whether this repository's checkout is the shared root consumed
    /// by wrapper builds
    #[serde(default)]
    pub provides_shared_root: bool,
}

impl RepoSpec {
    /// Create a repository entry
    pub fn new(name: &str, remote_url: &str, kind: BuildKind) -> Self {
        Self {
            name: name.to_string(),
            remote_url: remote_url.to_string(),
            kind,
            provides_shared_root: false,
        }
    }

    /// Mark this repository as the shared-root provider
    #[must_use]
    pub fn shared_root(mut self) -> Self {
        self.provides_shared_root = true;
        self
    }
}

/// Ordered, validated sequence of repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSet {
    /// Repositories in declaration (build) order
    #[serde(rename = "repo")]
    repos: Vec<RepoSpec>,
}

impl RepoSet {
    /// Build a repo set from an ordered list, validating it
    pub fn new(repos: Vec<RepoSpec>) -> Result<Self, RepoSetError> {
        let set = Self { repos };
        set.validate()?;
        Ok(set)
    }

    /// The compiled-in repository table for the fluidlib suite
    pub fn built_in() -> Self {
        Self {
            repos: vec![
                RepoSpec::new("fluidlib", urls::FLUIDLIB_REMOTE, BuildKind::Core).shared_root(),
                RepoSpec::new(
                    "fluidlib-wrappers",
                    urls::FLUIDLIB_WRAPPERS_REMOTE,
                    BuildKind::Wrapper,
                ),
                RepoSpec::new("fluidlib-apps", urls::FLUIDLIB_APPS_REMOTE, BuildKind::Wrapper),
            ],
        }
    }

    /// Parse a repo set from manifest TOML
    pub fn from_toml(content: &str) -> Result<Self, RepoSetError> {
        let set: Self = toml::from_str(content)?;
        set.validate()?;
        Ok(set)
    }

    /// Load `repos.toml` from `dir` if present, otherwise the built-in table
    pub fn load_or_default(dir: &Path) -> Result<Self, RepoSetError> {
        let manifest = dir.join(MANIFEST_NAME);
        if manifest.exists() {
            tracing::info!("Using repository manifest: {}", manifest.display());
            let content =
                std::fs::read_to_string(&manifest).map_err(|e| RepoSetError::Read {
                    path: manifest,
                    error: e.to_string(),
                })?;
            Self::from_toml(&content)
        } else {
            Ok(Self::built_in())
        }
    }

    /// Validate uniqueness and shared-root ordering
    pub fn validate(&self) -> Result<(), RepoSetError> {
        let mut seen = HashSet::new();
        let mut provider: Option<&str> = None;

        for (index, repo) in self.repos.iter().enumerate() {
            if repo.name.trim().is_empty() {
                return Err(RepoSetError::EmptyName { index });
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(RepoSetError::DuplicateName {
                    name: repo.name.clone(),
                });
            }
            if repo.provides_shared_root {
                if let Some(first) = provider {
                    return Err(RepoSetError::MultipleSharedRoots {
                        first: first.to_string(),
                        second: repo.name.clone(),
                    });
                }
                provider = Some(&repo.name);
            }
            if repo.kind == BuildKind::Wrapper && provider.is_none() {
                return Err(RepoSetError::SharedRootUnavailable {
                    wrapper: repo.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Iterate repositories in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, RepoSpec> {
        self.repos.iter()
    }

    /// Repository names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos.iter().map(|r| r.name.as_str())
    }

    /// Number of repositories
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

impl<'a> IntoIterator for &'a RepoSet {
    type Item = &'a RepoSpec;
    type IntoIter = std::slice::Iter<'a, RepoSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.repos.iter()
    }
}
