//! Process execution seam for git invocations

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Runs one git invocation to completion.
///
/// Implementations must treat a non-zero exit as an error. Stdout is never
/// returned to the caller.
pub trait Runner: Send + Sync {
    /// Run the program with the given arguments and wait for it to exit
    fn run(&self, args: &[OsString]) -> Result<()>;
}

/// Runner that spawns the real git executable
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    current_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create a runner invoking `git` from `PATH`
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            current_dir: None,
        }
    }

    /// Use a different executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run every invocation from `dir` instead of the process working directory
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The executable this runner invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the command for an invocation.
    ///
    /// Stdin and stdout go to the null device and only stderr is captured.
    /// Terminal prompts are disabled so missing credentials fail fast.
    pub fn build_command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for ProcessRunner {
    fn run(&self, args: &[OsString]) -> Result<()> {
        // Arguments can carry credentials (clone URLs), so only the
        // subcommand and target directory are logged
        let (subcommand, pinned) = summarize(args);
        let dir = pinned.or(self.current_dir.as_deref().map(Path::as_os_str));
        tracing::debug!(
            program = %self.program,
            subcommand = ?subcommand,
            dir = ?dir,
            "running git"
        );

        let output = self
            .build_command(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.is_empty() {
            Err(Error::Status {
                program: self.program.clone(),
                status: output.status,
            })
        } else {
            Err(Error::Git(stderr.into_owned()))
        }
    }
}

/// Split off a leading `-C <dir>` and return the subcommand and that dir
fn summarize(args: &[OsString]) -> (Option<&OsStr>, Option<&OsStr>) {
    match args {
        [flag, dir, rest @ ..] if flag == "-C" => {
            (rest.first().map(|a| a.as_os_str()), Some(dir.as_os_str()))
        }
        _ => (args.first().map(|a| a.as_os_str()), None),
    }
}
