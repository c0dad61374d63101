//! Integration tests for repository-table loading
//!
//! Exercises the public manifest surface: `repos.toml` overrides the
//! compiled-in table, and validation errors surface with useful context.

mod common;

use common::TestWorkspace;
use orchestrate::core::repo_set::{BuildKind, RepoSet};

#[test]
fn test_builtin_table_used_without_manifest() {
    let workspace = TestWorkspace::new();
    let set = RepoSet::load_or_default(&workspace.path()).unwrap();

    // Built-in suite: core first, wrappers after
    let first = set.iter().next().unwrap();
    assert_eq!(first.kind, BuildKind::Core);
    assert!(first.provides_shared_root);
    assert!(set.len() > 1);
}

#[test]
fn test_manifest_overrides_builtin_table() {
    let workspace = TestWorkspace::new();
    workspace.create_file(
        "repos.toml",
        r#"
            [[repo]]
            name = "mylib"
            remote_url = "https://git.example.com/mylib.git"
            kind = "core"
            provides_shared_root = true

            [[repo]]
            name = "mylib-py"
            remote_url = "https://git.example.com/mylib-py.git"
            kind = "wrapper"
        "#,
    );

    let set = RepoSet::load_or_default(&workspace.path()).unwrap();
    assert_eq!(set.names().collect::<Vec<_>>(), vec!["mylib", "mylib-py"]);
    assert_eq!(
        set.iter().nth(1).unwrap().remote_url,
        "https://git.example.com/mylib-py.git"
    );
}

#[test]
fn test_duplicate_repo_names_rejected_on_load() {
    let workspace = TestWorkspace::new();
    workspace.create_file(
        "repos.toml",
        r#"
            [[repo]]
            name = "twice"
            remote_url = "https://git.example.com/a.git"
            kind = "core"
            provides_shared_root = true

            [[repo]]
            name = "twice"
            remote_url = "https://git.example.com/b.git"
            kind = "core"
        "#,
    );

    let result = RepoSet::load_or_default(&workspace.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("twice"));
}

#[test]
fn test_unknown_build_kind_rejected() {
    let workspace = TestWorkspace::new();
    workspace.create_file(
        "repos.toml",
        r#"
            [[repo]]
            name = "odd"
            remote_url = "https://git.example.com/odd.git"
            kind = "mystery"
        "#,
    );

    let result = RepoSet::load_or_default(&workspace.path());
    assert!(result.is_err());
}
