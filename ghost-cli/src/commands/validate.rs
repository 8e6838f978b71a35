//! Validate command - check the git environment

use std::path::PathBuf;

use clap::Args;
use ghost_core::git::preflight;
use ghost_core::{Config, GitValidator};

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Commit-ish that must exist (hash, branch or tag)
    pub commitish: Option<String>,

    /// Repository to resolve the commit-ish in (defaults to current directory)
    #[arg(short = 'd', long)]
    pub dir: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut validator = GitValidator::from_config(&config.git);
        if let Some(ref dir) = self.dir {
            validator = validator.with_workdir(dir);
        }

        preflight(&validator, self.commitish.as_deref())?;

        match self.commitish {
            Some(ref commitish) => println!("git OK, {} exists", commitish),
            None => println!("git OK"),
        }
        Ok(())
    }
}
