//! Change-request discovery
//!
//! A change request is a pending pull request to validate against current
//! mainline. Requests are discovered once at startup from the
//! environment: one variable per declared repository, keyed exactly by
//! the repository name, holding the numeric pull-request id. Absent or
//! blank values mean "build mainline only".
//!
//! Discovery goes through an injectable lookup so tests never have to
//! mutate the process environment.

use std::collections::BTreeMap;

use crate::core::repo_set::RepoSet;
use crate::error::ChangeRequestError;

/// Pending change requests, repo name -> pull-request id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequests {
    requests: BTreeMap<String, String>,
}

impl ChangeRequests {
    /// Discover change requests for the declared repositories using the
    /// given lookup (normally [`std::env::var`]).
    pub fn discover<F>(repos: &RepoSet, lookup: F) -> Result<Self, ChangeRequestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut requests = BTreeMap::new();

        for name in repos.names() {
            let Some(value) = lookup(name) else {
                continue;
            };
            let id = value.trim();
            if id.is_empty() {
                continue;
            }
            if !id.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ChangeRequestError::InvalidId {
                    repo: name.to_string(),
                    value: value.clone(),
                });
            }
            tracing::info!("Change request for {name}: PR #{id}");
            requests.insert(name.to_string(), id.to_string());
        }

        Ok(Self { requests })
    }

    /// Discover change requests from the process environment
    pub fn from_env(repos: &RepoSet) -> Result<Self, ChangeRequestError> {
        Self::discover(repos, |name| std::env::var(name).ok())
    }

    /// Pending id for a repository, if any
    pub fn get(&self, repo: &str) -> Option<&str> {
        self.requests.get(repo).map(String::as_str)
    }

    /// Iterate (repo, id) pairs in repo-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.requests.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any change request is pending
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Number of pending change requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

impl<'a> IntoIterator for &'a ChangeRequests {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repo_set::{BuildKind, RepoSpec};
    use proptest::prelude::*;

    fn two_repos() -> RepoSet {
        RepoSet::new(vec![
            RepoSpec::new("core", "url-core", BuildKind::Core).shared_root(),
            RepoSpec::new("bindings", "url-bindings", BuildKind::Wrapper),
        ])
        .unwrap()
    }

    #[test]
    fn test_discovery_ignores_unset_and_blank() {
        let repos = two_repos();
        let requests = ChangeRequests::discover(&repos, |name| match name {
            "core" => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(requests.is_empty());
    }

    #[test]
    fn test_discovery_records_numeric_ids() {
        let repos = two_repos();
        let requests = ChangeRequests::discover(&repos, |name| match name {
            "core" => Some("42".to_string()),
            "bindings" => Some(" 7 ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests.get("core"), Some("42"));
        assert_eq!(requests.get("bindings"), Some("7"));
        assert_eq!(requests.get("unknown"), None);
    }

    #[test]
    fn test_discovery_rejects_non_numeric_ids() {
        let repos = two_repos();
        let result = ChangeRequests::discover(&repos, |name| match name {
            "core" => Some("feature-branch".to_string()),
            _ => None,
        });

        assert!(matches!(
            result,
            Err(ChangeRequestError::InvalidId { repo, value })
                if repo == "core" && value == "feature-branch"
        ));
    }

    #[test]
    fn test_only_declared_repos_are_consulted() {
        let repos = two_repos();
        let consulted = std::cell::RefCell::new(Vec::new());
        let _ = ChangeRequests::discover(&repos, |name| {
            consulted.borrow_mut().push(name.to_string());
            None
        });

        // One lookup per declared repo, nothing else
        let mut consulted = consulted.into_inner();
        let mut expected = vec!["core".to_string(), "bindings".to_string()];
        consulted.sort();
        expected.sort();
        assert_eq!(consulted, expected);
    }

    proptest! {
        /// Any sequence of ASCII digits is accepted as an id and stored
        /// trimmed; anything containing a non-digit is rejected.
        #[test]
        fn prop_numeric_ids_accepted(id in "[0-9]{1,10}") {
            let repos = two_repos();
            let requests = ChangeRequests::discover(&repos, |name| {
                (name == "core").then(|| format!(" {id} "))
            })
            .unwrap();

            prop_assert_eq!(requests.get("core"), Some(id.as_str()));
        }

        #[test]
        fn prop_non_numeric_ids_rejected(id in "[0-9]{0,3}[a-zA-Z/_.-][0-9a-zA-Z]{0,5}") {
            let repos = two_repos();
            let result = ChangeRequests::discover(&repos, |name| {
                (name == "core").then(|| id.clone())
            });

            prop_assert!(result.is_err());
        }
    }
}
