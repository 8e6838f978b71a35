//! Git operations for the ghost store
//!
//! This module shells out to the git executable to clone, commit, push and
//! pull working trees, and provides environment validation and read-only
//! inspection of the resulting checkouts.

mod inspect;
mod repo;
mod runner;
mod validation;

pub use inspect::WorkingTree;
pub use repo::{
    commit_and_push, commit_file, create_orphan_branch, create_temp_git_dir, pull, push,
    redact_url, Git, REMOTE, TEMP_DIR_PREFIX,
};
pub use runner::{ProcessRunner, Runner};
pub use validation::{preflight, validate_commitish, validate_git, GitValidator, Validator};
