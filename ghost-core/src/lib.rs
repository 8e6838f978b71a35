//! Ghost Core - git automation for the git-ghost artifact store
//!
//! This crate lets the ghost store persist generated artifacts into a
//! git-backed repository without its callers invoking git directly.

pub mod config;
pub mod error;
pub mod git;

pub use config::{Config, GitConfig, Overrides};
pub use error::{Error, Result};
pub use git::{Git, GitValidator, Validator, WorkingTree};
