//! Repository operations for the ghost store
//!
//! Each operation builds a git argument list and hands it to a [`Runner`].
//! Working directories are pinned with `git -C <dir>` rather than relying on
//! the process working directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::runner::{ProcessRunner, Runner};
use crate::config::GitConfig;
use crate::Result;

/// Prefix for temporary clone directories
pub const TEMP_DIR_PREFIX: &str = "git-ghost-";

/// Remote every push and pull targets
pub const REMOTE: &str = "origin";

/// Git operations against working directories
#[derive(Debug, Clone, Default)]
pub struct Git<R = ProcessRunner> {
    runner: R,
}

impl Git<ProcessRunner> {
    /// Create operations backed by the `git` executable from `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create operations backed by the configured executable
    pub fn from_config(config: &GitConfig) -> Self {
        Self::with_runner(ProcessRunner::new().with_program(&config.program))
    }
}

impl<R: Runner> Git<R> {
    /// Create operations backed by a custom runner
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Access the underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Clone `repo` into a new temporary directory under `parent`.
    ///
    /// When `branch` is non-empty only that branch is checked out. If the
    /// clone fails the directory is removed before the error is returned.
    /// On success the caller owns the directory and must remove it.
    pub fn create_temp_git_dir(&self, parent: &Path, repo: &str, branch: &str) -> Result<PathBuf> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir_in(parent)?;

        let mut args = vec![OsString::from("clone"), OsString::from("-q")];
        if !branch.is_empty() {
            args.push("-b".into());
            args.push(branch.into());
        }
        args.push(repo.into());
        args.push(temp.path().into());

        if let Err(e) = self.runner.run(&args) {
            tracing::warn!(
                repo = %redact_url(repo),
                dir = %temp.path().display(),
                "clone failed, discarding scratch directory"
            );
            if let Err(close_err) = temp.close() {
                tracing::warn!(error = %close_err, "failed to remove scratch directory");
            }
            return Err(e);
        }

        let path = temp.keep();
        tracing::debug!(
            repo = %redact_url(repo),
            dir = %path.display(),
            "cloned into scratch directory"
        );
        Ok(path)
    }

    /// Stage `filename` and commit only that path with `message`
    pub fn commit_file(&self, dir: &Path, filename: &str, message: &str) -> Result<()> {
        self.run_in(dir, &["add", "--", filename])?;
        self.run_in(dir, &["commit", "-q", "-m", message, "--", filename])
    }

    /// Push `refspec` to origin
    pub fn push(&self, dir: &Path, refspec: &str) -> Result<()> {
        self.run_in(dir, &["push", "-q", REMOTE, refspec])
    }

    /// Pull `refspec` from origin
    pub fn pull(&self, dir: &Path, refspec: &str) -> Result<()> {
        self.run_in(dir, &["pull", "-q", REMOTE, refspec])
    }

    /// Commit a single file and push it; the push is skipped if the commit fails
    pub fn commit_and_push(
        &self,
        dir: &Path,
        filename: &str,
        message: &str,
        refspec: &str,
    ) -> Result<()> {
        self.commit_file(dir, filename, message)?;
        self.push(dir, refspec)
    }

    /// Switch `dir` onto a new branch with no history
    pub fn create_orphan_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        self.run_in(dir, &["checkout", "-q", "--orphan", branch])
    }

    fn run_in(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let mut full = Vec::with_capacity(args.len() + 2);
        full.push(OsString::from("-C"));
        full.push(dir.as_os_str().to_os_string());
        full.extend(args.iter().map(OsString::from));
        self.runner.run(&full)
    }
}

/// Clone `repo` into a temporary directory under `parent` using `git` from `PATH`
pub fn create_temp_git_dir(parent: &Path, repo: &str, branch: &str) -> Result<PathBuf> {
    Git::new().create_temp_git_dir(parent, repo, branch)
}

/// Stage and commit a single file using `git` from `PATH`
pub fn commit_file(dir: &Path, filename: &str, message: &str) -> Result<()> {
    Git::new().commit_file(dir, filename, message)
}

/// Push `refspec` to origin using `git` from `PATH`
pub fn push(dir: &Path, refspec: &str) -> Result<()> {
    Git::new().push(dir, refspec)
}

/// Pull `refspec` from origin using `git` from `PATH`
pub fn pull(dir: &Path, refspec: &str) -> Result<()> {
    Git::new().pull(dir, refspec)
}

/// Commit a single file and push `refspec` using `git` from `PATH`
pub fn commit_and_push(dir: &Path, filename: &str, message: &str, refspec: &str) -> Result<()> {
    Git::new().commit_and_push(dir, filename, message, refspec)
}

/// Create an orphan branch using `git` from `PATH`
pub fn create_orphan_branch(dir: &Path, branch: &str) -> Result<()> {
    Git::new().create_orphan_branch(dir, branch)
}

/// Strip credentials from a repository URL so it can be logged.
///
/// Inputs that are not absolute URLs (local paths, scp-style remotes) are
/// returned unchanged.
pub fn redact_url(repo: &str) -> String {
    match url::Url::parse(repo) {
        Ok(mut url) if !url.username().is_empty() || url.password().is_some() => {
            // Only fails for cannot-be-a-base URLs, which carry no credentials
            let _ = url.set_username("");
            let _ = url.set_password(None);
            url.to_string()
        }
        _ => repo.to_string(),
    }
}
