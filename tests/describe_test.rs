mod common;

use common::{annotated_tag, commit_file, init_repo, lightweight_tag, short_hash};
use std::process::Command;
use verstamp::config::DescribeConfig;
use verstamp::git::{resolve_repo_root, CommandDescriber, DescribeProvider, Git2Describer};
use verstamp::VerstampError;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[test]
fn test_git2_describe_exact_tag_uses_long_format() {
    let (dir, repo) = init_repo();
    let oid = commit_file(&repo, "README.md", "hello\n", "Initial commit");
    annotated_tag(&repo, "1.2.3", oid);

    let describer = Git2Describer::open(dir.path(), DescribeConfig::default()).unwrap();
    let result = describer.describe().unwrap();

    assert_eq!(result.tag, "1.2.3");
    assert_eq!(result.distance, 0);
    assert_eq!(result.sha, format!("g{}", short_hash(oid)));
}

#[test]
fn test_git2_describe_counts_distance() {
    let (dir, repo) = init_repo();
    let tagged = commit_file(&repo, "README.md", "one\n", "Initial commit");
    annotated_tag(&repo, "1.2.3", tagged);
    commit_file(&repo, "README.md", "two\n", "Second commit");
    let head = commit_file(&repo, "README.md", "three\n", "Third commit");

    let describer = Git2Describer::open(dir.path(), DescribeConfig::default()).unwrap();
    let result = describer.describe().unwrap();

    assert_eq!(result.tag, "1.2.3");
    assert_eq!(result.distance, 2);
    assert_eq!(result.sha, format!("g{}", short_hash(head)));
}

#[test]
fn test_git2_describe_ignores_lightweight_tags_by_default() {
    let (dir, repo) = init_repo();
    let oid = commit_file(&repo, "README.md", "hello\n", "Initial commit");
    lightweight_tag(&repo, "1.0.0", oid);

    let describer = Git2Describer::open(dir.path(), DescribeConfig::default()).unwrap();
    let err = describer.describe().unwrap_err();
    assert!(matches!(err, VerstampError::Vcs(_)));

    let settings = DescribeConfig {
        tags: true,
        ..DescribeConfig::default()
    };
    let describer = Git2Describer::open(dir.path(), settings).unwrap();
    assert_eq!(describer.describe().unwrap().tag, "1.0.0");
}

#[test]
fn test_git2_describe_match_pattern() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "README.md", "one\n", "Initial commit");
    annotated_tag(&repo, "v1.0.0", first);
    let second = commit_file(&repo, "README.md", "two\n", "Second commit");
    annotated_tag(&repo, "nightly-7", second);

    let settings = DescribeConfig {
        match_pattern: Some("v*".to_string()),
        ..DescribeConfig::default()
    };
    let describer = Git2Describer::open(dir.path(), settings).unwrap();
    let result = describer.describe().unwrap();
    assert_eq!(result.tag, "v1.0.0");
    assert_eq!(result.distance, 1);
}

#[test]
fn test_resolve_repo_root_from_subdirectory() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "README.md", "hello\n", "Initial commit");
    let nested = dir.path().join("Source/assembly");
    std::fs::create_dir_all(&nested).unwrap();

    let root = resolve_repo_root(&nested).unwrap();
    assert_eq!(
        root.canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[test]
fn test_command_describe_matches_git2() {
    if !git_available() {
        eprintln!("git executable not available, skipping");
        return;
    }

    let (dir, repo) = init_repo();
    let tagged = commit_file(&repo, "README.md", "one\n", "Initial commit");
    annotated_tag(&repo, "2.0.1", tagged);
    commit_file(&repo, "README.md", "two\n", "Second commit");

    let from_command = CommandDescriber::new(dir.path(), DescribeConfig::default())
        .describe()
        .unwrap();
    let from_git2 = Git2Describer::open(dir.path(), DescribeConfig::default())
        .unwrap()
        .describe()
        .unwrap();

    assert_eq!(from_command, from_git2);
}

#[test]
fn test_command_describe_without_tags() {
    if !git_available() {
        eprintln!("git executable not available, skipping");
        return;
    }

    let (dir, repo) = init_repo();
    commit_file(&repo, "README.md", "hello\n", "Initial commit");

    let err = CommandDescriber::new(dir.path(), DescribeConfig::default())
        .describe()
        .unwrap_err();
    assert!(matches!(err, VerstampError::Vcs(_)));
}

#[test]
fn test_both_backends_agree_on_lightweight_only_history() {
    if !git_available() {
        eprintln!("git executable not available, skipping");
        return;
    }

    let (dir, repo) = init_repo();
    let oid = commit_file(&repo, "README.md", "hello\n", "Initial commit");
    lightweight_tag(&repo, "1.0.0", oid);

    let from_command = CommandDescriber::new(dir.path(), DescribeConfig::default())
        .describe()
        .unwrap_err();
    let from_git2 = Git2Describer::open(dir.path(), DescribeConfig::default())
        .unwrap()
        .describe()
        .unwrap_err();

    assert_eq!(from_command.to_string(), "Version control error: no tags found");
    assert_eq!(from_command.to_string(), from_git2.to_string());
}
