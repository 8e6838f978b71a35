//! `ghost` - drive the git-ghost store from a shell
//!
//! Every subcommand is a thin wrapper over `ghost_core::git`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ghost_core::{Config, Overrides};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CloneArgs, CommitArgs, OrphanArgs, SyncArgs, ValidateArgs};

/// Persist generated artifacts into a git-backed store
#[derive(Parser, Debug)]
#[command(name = "ghost")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log resolved settings at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// git executable to run (beats GHOST_GIT_PATH and the config file)
    #[arg(long, global = true)]
    git_path: Option<String>,

    /// Where scratch clones are created (beats GHOST_SCRATCH_DIR and the config file)
    #[arg(long, global = true)]
    scratch_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ghost version
    Version,

    /// Clone a repository into a fresh scratch directory
    Clone(CloneArgs),

    /// Commit one file, optionally pushing afterwards
    #[command(visible_alias = "ci")]
    Commit(CommitArgs),

    /// Push a refspec to origin
    Push(SyncArgs),

    /// Pull a refspec from origin
    Pull(SyncArgs),

    /// Start a history-less branch in a working tree
    Orphan(OrphanArgs),

    /// Check git, and optionally a commit-ish, before relying on them
    Validate(ValidateArgs),

    /// Print the resolved settings as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::resolve(Overrides {
        git_path: cli.git_path,
        scratch_dir: cli.scratch_dir,
    })?;

    if cli.verbose {
        tracing::info!(
            program = %config.git.program,
            scratch_dir = %config.git.scratch_dir().display(),
            "settings resolved"
        );
    }

    match cli.command {
        Commands::Version => println!("ghost {}", env!("CARGO_PKG_VERSION")),
        Commands::Clone(args) => args.execute(&config)?,
        Commands::Commit(args) => args.execute(&config)?,
        Commands::Push(args) => args.push(&config)?,
        Commands::Pull(args) => args.pull(&config)?,
        Commands::Orphan(args) => args.execute(&config)?,
        Commands::Validate(args) => args.execute(&config)?,
        Commands::Config => {
            match Config::default_config_path() {
                Some(path) if path.is_file() => println!("# loaded from {}", path.display()),
                Some(path) => println!("# {} absent, built-in defaults", path.display()),
                None => println!("# no config directory on this platform"),
            }
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
