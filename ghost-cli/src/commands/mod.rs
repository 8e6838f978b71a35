//! CLI command implementations

pub mod repo;
pub mod validate;

pub use repo::{CloneArgs, CommitArgs, OrphanArgs, SyncArgs};
pub use validate::ValidateArgs;
