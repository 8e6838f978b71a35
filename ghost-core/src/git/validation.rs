//! Environment checks run before trusting repository operations
//!
//! Callers take a `&dyn Validator` so their tests can substitute stand-ins
//! instead of invoking the real git executable.

use std::ffi::OsString;
use std::path::PathBuf;

use super::runner::{ProcessRunner, Runner};
use crate::config::GitConfig;
use crate::Result;

/// Checks that git is usable and that objects exist
pub trait Validator: Send + Sync {
    /// Succeeds iff the git executable can be run
    fn validate_git(&self) -> Result<()>;

    /// Succeeds iff `commitish` resolves to an existing object
    fn validate_commitish(&self, commitish: &str) -> Result<()>;
}

/// Validator backed by real git invocations
#[derive(Debug, Clone, Default)]
pub struct GitValidator {
    program: Option<String>,
    workdir: Option<PathBuf>,
}

impl GitValidator {
    /// Validate `git` from `PATH` against the process working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate with the configured executable
    pub fn from_config(config: &GitConfig) -> Self {
        Self::new().with_program(&config.program)
    }

    /// Substitute the executable name
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Resolve commit-ishes in the repository at `dir`
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    fn runner(&self) -> ProcessRunner {
        let mut runner = ProcessRunner::new();
        if let Some(ref program) = self.program {
            runner = runner.with_program(program);
        }
        if let Some(ref dir) = self.workdir {
            runner = runner.with_current_dir(dir);
        }
        runner
    }
}

impl Validator for GitValidator {
    fn validate_git(&self) -> Result<()> {
        self.runner().run(&[OsString::from("version")])
    }

    fn validate_commitish(&self, commitish: &str) -> Result<()> {
        let args = ["cat-file", "-e", commitish].map(OsString::from);
        self.runner().run(&args)
    }
}

/// Check that `git` from `PATH` is installed
pub fn validate_git() -> Result<()> {
    GitValidator::new().validate_git()
}

/// Check that `commitish` exists in the repository of the current directory
pub fn validate_commitish(commitish: &str) -> Result<()> {
    GitValidator::new().validate_commitish(commitish)
}

/// Run the git check and, when given, the commit-ish check.
///
/// Stops at the first failure.
pub fn preflight(validator: &dyn Validator, commitish: Option<&str>) -> Result<()> {
    validator.validate_git()?;
    if let Some(commitish) = commitish {
        validator.validate_commitish(commitish)?;
    }
    Ok(())
}
