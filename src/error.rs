use std::path::PathBuf;
use thiserror::Error;

/// An external command that exited non-zero or failed to spawn.
#[derive(Error, Debug)]
#[error("command `{command}` failed: {reason}")]
pub struct CommandError {
    pub command: String,
    pub reason: String,
}

/// Failure taxonomy of the sniffer toggle protocol.
///
/// A no-op toggle (`AlreadyInDesiredState`) is an outcome, not an error,
/// and is deliberately absent here.
#[derive(Error, Debug)]
pub enum ToggleError {
    /// The remote fragment could not be established or copied into
    /// staging. Nothing has been mutated yet.
    #[error("failed to fetch supervisor config from container: {0}")]
    Fetch(CommandError),

    /// The local staging copy could not be read or rewritten. The remote
    /// fragment has not been published.
    #[error("failed to edit staging copy at {path}: {source}")]
    Mutation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The copy back to the container failed. The remote fragment keeps
    /// its pre-publish content; no retry is attempted.
    #[error("failed to publish supervisor config to container: {0}")]
    Publish(CommandError),

    /// The dependent service failed to restart. The published
    /// configuration stands; the system runs with the old config until a
    /// manual restart succeeds.
    #[error("configuration applied, but service restart failed: {0}")]
    Restart(CommandError),
}
