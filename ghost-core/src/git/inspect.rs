//! Read-only inspection of ghost working trees
//!
//! Repository operations discard git's stdout, so anything a caller needs to
//! read back (HEAD commit, branch name) comes from here.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// A checked-out working tree opened for inspection
pub struct WorkingTree {
    repo: Repository,
    root: PathBuf,
}

impl std::fmt::Debug for WorkingTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingTree")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl WorkingTree {
    /// Open the working tree rooted at `path`.
    ///
    /// Unlike discovery this does not search parent directories, so a
    /// subdirectory of a checkout is rejected, and so is its `.git`
    /// directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Git(format!("Not a git working tree: {}", path.display()))
            } else {
                Error::Git(format!("Git error: {}", e))
            }
        })?;

        let root = repo
            .workdir()
            .ok_or_else(|| Error::Git(format!("Bare repository at {}", path.display())))?
            .to_path_buf();

        // `Repository::open` also accepts the `.git` directory itself
        if root.canonicalize()? != path.canonicalize()? {
            return Err(Error::Git(format!(
                "Not a working tree root: {} (root is {})",
                path.display(),
                root.display()
            )));
        }

        Ok(Self { repo, root })
    }

    /// Check if `path` is the root of a working tree
    pub fn is_working_tree(path: impl AsRef<Path>) -> bool {
        Self::open(path).is_ok()
    }

    /// Get the working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the checked-out branch name.
    ///
    /// An unborn branch (for example a fresh orphan) still reports its name.
    /// Returns `None` on a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| Error::Git(format!("Failed to read HEAD: {}", e)))?;

        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(|name| name.to_string()))
    }

    /// Get the commit SHA at HEAD, or `None` while the branch is unborn
    pub fn head_commit(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) => {
                let commit = head
                    .peel_to_commit()
                    .map_err(|e| Error::Git(format!("Failed to resolve HEAD: {}", e)))?;
                Ok(Some(commit.id().to_string()))
            }
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(Error::Git(format!("Failed to get HEAD: {}", e))),
        }
    }

    /// Count the commits reachable from HEAD (0 while unborn)
    pub fn history_len(&self) -> Result<usize> {
        if self.head_commit()?.is_none() {
            return Ok(0);
        }

        let mut walk = self
            .repo
            .revwalk()
            .map_err(|e| Error::Git(format!("Failed to walk history: {}", e)))?;
        walk.push_head()
            .map_err(|e| Error::Git(format!("Failed to walk history: {}", e)))?;

        let mut count = 0;
        for oid in walk {
            oid.map_err(|e| Error::Git(format!("Failed to walk history: {}", e)))?;
            count += 1;
        }
        Ok(count)
    }
}
