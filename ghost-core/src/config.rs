//! Layered settings for the ghost git tooling
//!
//! A value set later wins: built-in defaults, then the TOML file at
//! `~/.config/git-ghost/config.toml`, then `GHOST_*` environment variables,
//! then command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming the git executable
pub const ENV_GIT_PATH: &str = "GHOST_GIT_PATH";

/// Environment variable naming the parent directory for scratch clones
pub const ENV_SCRATCH_DIR: &str = "GHOST_SCRATCH_DIR";

/// How git is invoked and where scratch clones go
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitConfig {
    /// Executable run for every git invocation
    pub program: String,

    /// Parent for `git-ghost-*` clone directories
    pub scratch_dir: Option<PathBuf>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            scratch_dir: None,
        }
    }
}

impl GitConfig {
    /// Resolved parent for scratch clones, the system temp dir when unset
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Settings file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// `[git]` table
    pub git: GitConfig,
}

/// Values that replace whatever the config file said
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub git_path: Option<String>,
    pub scratch_dir: Option<PathBuf>,
}

impl Overrides {
    /// Read `GHOST_GIT_PATH` and `GHOST_SCRATCH_DIR` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            git_path: lookup(ENV_GIT_PATH),
            scratch_dir: lookup(ENV_SCRATCH_DIR).map(PathBuf::from),
        }
    }
}

impl Config {
    /// Where the settings file lives, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("git-ghost").join("config.toml"))
    }

    /// Parse a settings file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Read the settings file at its default location; a missing file is not an error
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Layer `overrides` on top of this config
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(program) = overrides.git_path {
            self.git.program = program;
        }
        if let Some(dir) = overrides.scratch_dir {
            self.git.scratch_dir = Some(dir);
        }
        self
    }

    /// Render as the TOML a settings file would contain
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Full resolution: file, then environment, then `flags`
    pub fn resolve(flags: Overrides) -> Result<Self> {
        Ok(Self::load()?.apply(Overrides::from_env()).apply(flags))
    }
}
