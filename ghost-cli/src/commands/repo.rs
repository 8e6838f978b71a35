//! Repository commands - clone, commit, push, pull and orphan branches

use std::path::PathBuf;

use clap::Args;
use ghost_core::git::preflight;
use ghost_core::{Config, Git, GitValidator, WorkingTree};

fn ready(config: &Config) -> anyhow::Result<Git> {
    preflight(&GitValidator::from_config(&config.git), None)?;
    Ok(Git::from_config(&config.git))
}

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository URL or path
    pub repo: String,

    /// Branch to check out (defaults to the remote HEAD)
    #[arg(short, long, default_value = "")]
    pub branch: String,
}

impl CloneArgs {
    /// Execute the clone command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let git = ready(config)?;
        let dir = git.create_temp_git_dir(&config.git.scratch_dir(), &self.repo, &self.branch)?;

        let branch = WorkingTree::open(&dir)?.current_branch()?;

        println!("Cloned into:");
        println!("  Path:   {}", dir.display());
        println!("  Branch: {}", branch.as_deref().unwrap_or("(detached)"));
        println!();
        println!("Remove the directory when done.");

        Ok(())
    }
}

/// Arguments for the commit command
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Working tree containing the file
    pub dir: PathBuf,

    /// File to stage and commit, relative to the working tree
    pub file: String,

    /// Commit message
    #[arg(short, long)]
    pub message: String,

    /// Push this refspec to origin after committing
    #[arg(long)]
    pub push: Option<String>,
}

impl CommitArgs {
    /// Execute the commit command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let git = ready(config)?;

        match self.push {
            Some(ref refspec) => {
                git.commit_and_push(&self.dir, &self.file, &self.message, refspec)?;
                println!("Committed {} and pushed {}", self.file, refspec);
            }
            None => {
                git.commit_file(&self.dir, &self.file, &self.message)?;
                println!("Committed {}", self.file);
            }
        }

        if let Some(commit) = WorkingTree::open(&self.dir)?.head_commit()? {
            println!("  HEAD: {}", commit);
        }

        Ok(())
    }
}

/// Arguments shared by the push and pull commands
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Working tree to sync
    pub dir: PathBuf,

    /// Refspec to transfer
    pub refspec: String,
}

impl SyncArgs {
    /// Push the refspec to origin
    pub fn push(&self, config: &Config) -> anyhow::Result<()> {
        ready(config)?.push(&self.dir, &self.refspec)?;
        println!("Pushed {}", self.refspec);
        Ok(())
    }

    /// Pull the refspec from origin
    pub fn pull(&self, config: &Config) -> anyhow::Result<()> {
        ready(config)?.pull(&self.dir, &self.refspec)?;
        println!("Pulled {}", self.refspec);
        Ok(())
    }
}

/// Arguments for the orphan command
#[derive(Args, Debug)]
pub struct OrphanArgs {
    /// Working tree to switch
    pub dir: PathBuf,

    /// Name of the new branch
    pub branch: String,
}

impl OrphanArgs {
    /// Execute the orphan command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        ready(config)?.create_orphan_branch(&self.dir, &self.branch)?;
        println!("Switched to orphan branch {}", self.branch);
        Ok(())
    }
}
