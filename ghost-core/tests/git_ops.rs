//! Repository operations against a real git executable.
//!
//! Each test builds a bare "origin" seeded with a `main` branch, so nothing
//! touches the network. Tests return early when git is not installed.

use std::path::{Path, PathBuf};
use std::process::Command;

use ghost_core::git::{
    commit_and_push, commit_file, create_orphan_branch, create_temp_git_dir, pull, push,
    validate_git, TEMP_DIR_PREFIX,
};
use ghost_core::{GitValidator, Validator, WorkingTree};
use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
    remote: PathBuf,
    scratch: PathBuf,
}

impl Fixture {
    fn remote_url(&self) -> String {
        self.remote.to_string_lossy().into_owned()
    }

    fn clone_main(&self) -> PathBuf {
        let dir = create_temp_git_dir(&self.scratch, &self.remote_url(), "main").unwrap();
        configure_identity(&dir);
        dir
    }

    fn remote_validator(&self) -> GitValidator {
        GitValidator::new().with_workdir(&self.remote)
    }

    fn scratch_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.scratch)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.name", "Ghost Test"]);
    git(dir, &["config", "user.email", "ghost@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn fixture() -> Option<Fixture> {
    if validate_git().is_err() {
        eprintln!("git not available, skipping");
        return None;
    }

    let temp = TempDir::new().unwrap();
    let remote = temp.path().join("remote.git");
    git(temp.path(), &["init", "-q", "--bare", "remote.git"]);

    let seed = temp.path().join("seed");
    git(temp.path(), &["init", "-q", "seed"]);
    configure_identity(&seed);
    std::fs::write(seed.join("README.md"), "ghost fixture\n").unwrap();
    git(&seed, &["add", "README.md"]);
    git(&seed, &["commit", "-q", "-m", "seed"]);
    git(
        &seed,
        &["push", "-q", remote.to_str().unwrap(), "HEAD:refs/heads/main"],
    );
    git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let scratch = temp.path().join("scratch");
    std::fs::create_dir(&scratch).unwrap();

    Some(Fixture {
        temp,
        remote,
        scratch,
    })
}

#[test]
fn test_clone_checks_out_branch() {
    let Some(fx) = fixture() else { return };

    let dir = create_temp_git_dir(&fx.scratch, &fx.remote_url(), "main").unwrap();

    assert!(dir.starts_with(&fx.scratch));
    assert!(dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(TEMP_DIR_PREFIX));
    assert_eq!(
        std::fs::read_to_string(dir.join("README.md")).unwrap(),
        "ghost fixture\n"
    );

    let tree = WorkingTree::open(&dir).unwrap();
    assert_eq!(tree.current_branch().unwrap().as_deref(), Some("main"));
    assert_eq!(tree.history_len().unwrap(), 1);
}

#[test]
fn test_clone_without_branch_uses_remote_head() {
    let Some(fx) = fixture() else { return };

    let dir = create_temp_git_dir(&fx.scratch, &fx.remote_url(), "").unwrap();
    assert!(WorkingTree::is_working_tree(&dir));
    assert!(!WorkingTree::is_working_tree(dir.join(".git")));
    assert!(dir.join("README.md").exists());
}

#[test]
fn test_failed_clone_leaves_nothing_behind() {
    let Some(fx) = fixture() else { return };
    let missing = fx.temp.path().join("missing.git");

    let err = create_temp_git_dir(&fx.scratch, missing.to_str().unwrap(), "main").unwrap_err();

    assert!(!err.to_string().is_empty());
    assert!(fx.scratch_entries().is_empty());
}

#[test]
fn test_clone_unknown_branch_fails() {
    let Some(fx) = fixture() else { return };

    let result = create_temp_git_dir(&fx.scratch, &fx.remote_url(), "no-such-branch");

    assert!(result.is_err());
    assert!(fx.scratch_entries().is_empty());
}

#[test]
fn test_commit_missing_file_reports_staging_failure() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();

    let err = commit_file(&dir, "missing.txt", "msg").unwrap_err();

    assert!(err.to_string().contains("missing.txt"), "got: {err}");
}

#[test]
fn test_commit_unchanged_file_fails() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();

    assert!(commit_file(&dir, "README.md", "no changes").is_err());
}

#[test]
fn test_commit_and_push_reaches_remote() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();
    std::fs::write(dir.join("artifact.txt"), "diff --git a/x b/x\n").unwrap();

    commit_and_push(&dir, "artifact.txt", "add artifact", "main").unwrap();

    let head = WorkingTree::open(&dir).unwrap().head_commit().unwrap().unwrap();
    fx.remote_validator().validate_commitish(&head).unwrap();
}

#[test]
fn test_commit_and_push_without_changes_pushes_nothing() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();

    assert!(commit_and_push(&dir, "README.md", "no changes", "refs/heads/untouched").is_err());
    assert!(fx
        .remote_validator()
        .validate_commitish("refs/heads/untouched")
        .is_err());
}

#[test]
fn test_orphan_branch_has_no_history() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();

    create_orphan_branch(&dir, "ghost").unwrap();

    let tree = WorkingTree::open(&dir).unwrap();
    assert_eq!(tree.current_branch().unwrap().as_deref(), Some("ghost"));
    assert_eq!(tree.head_commit().unwrap(), None);

    std::fs::write(dir.join("ghost.txt"), "first ghost\n").unwrap();
    commit_file(&dir, "ghost.txt", "ghost root").unwrap();
    let tree = WorkingTree::open(&dir).unwrap();
    assert_eq!(tree.history_len().unwrap(), 1);

    push(&dir, "ghost").unwrap();
    fx.remote_validator().validate_commitish("ghost").unwrap();
}

#[test]
fn test_pull_fetches_pushed_commit() {
    let Some(fx) = fixture() else { return };
    let writer = fx.clone_main();
    let reader = fx.clone_main();

    std::fs::write(writer.join("shared.txt"), "shared\n").unwrap();
    commit_and_push(&writer, "shared.txt", "share", "main").unwrap();
    assert!(!reader.join("shared.txt").exists());

    pull(&reader, "main").unwrap();

    assert_eq!(
        std::fs::read_to_string(reader.join("shared.txt")).unwrap(),
        "shared\n"
    );
}

#[test]
fn test_pull_unknown_refspec_fails() {
    let Some(fx) = fixture() else { return };
    let dir = fx.clone_main();

    assert!(pull(&dir, "no-such-branch").is_err());
}

#[test]
fn test_validate_commitish() {
    let Some(fx) = fixture() else { return };
    let validator = fx.remote_validator();

    validator.validate_git().unwrap();
    validator.validate_commitish("main").unwrap();
    assert!(validator
        .validate_commitish("0123456789abcdef0123456789abcdef01234567")
        .is_err());
}

#[test]
fn test_validate_git_with_missing_program() {
    let validator = GitValidator::new().with_program("git-ghost-no-such-binary");
    assert!(validator.validate_git().is_err());
}
