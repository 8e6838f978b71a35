//! Error types for git-ghost

use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for git-ghost operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for git-ghost operations
#[derive(Error, Debug)]
pub enum Error {
    /// The git executable could not be started at all
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Git ran and exited non-zero; carries its stderr verbatim
    #[error("{0}")]
    Git(String),

    /// The tool exited non-zero without writing anything to stderr
    #[error("{program} failed ({status})")]
    Status { program: String, status: ExitStatus },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True if the tool could not be started, as opposed to reporting a failure
    pub fn is_spawn(&self) -> bool {
        matches!(self, Error::Spawn { .. })
    }
}
