//! The sniffer toggle state machine.
//!
//! One invocation runs the fixed sequence fetch → locate → decide →
//! mutate → publish → restart, strictly in that order, fully synchronous.
//! The desired state is never cached: it is re-derived from the fragment
//! content on every invocation. The staging copy is removed on every exit
//! path, including errors after fetch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ToggleError;
use crate::services::fragment::{ConfigFragment, EnvDirective, MatchMode};
use crate::services::store::RemoteConfigStore;

/// One toggle invocation: the directive key, the target state, and (when
/// enabling) the directive to write.
#[derive(Clone, Debug)]
pub enum ToggleRequest {
    Enable {
        key: String,
        directive: EnvDirective,
        match_mode: MatchMode,
    },
    Disable {
        key: String,
        match_mode: MatchMode,
    },
}

/// Result of a toggle invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Fragment mutated, published, and the dependent service restarted.
    Applied,
    /// Fragment already matched the request; remote untouched, no restart.
    AlreadyInDesiredState,
}

/// Scoped owner of the staging copy. Dropping it removes the file, so the
/// scratch path is clean whether the toggle applied, no-opped, or failed.
struct StagingArtifact {
    path: PathBuf,
}

impl StagingArtifact {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingArtifact {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            // A fetch failure may abort before the file ever exists.
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove staging copy");
            }
        }
    }
}

/// Coordinates the toggle protocol against an injected
/// [`RemoteConfigStore`].
pub struct ToggleOrchestrator<'a, S: RemoteConfigStore> {
    store: &'a S,
    staging_path: PathBuf,
}

impl<'a, S: RemoteConfigStore> ToggleOrchestrator<'a, S> {
    /// The caller chooses where the staging copy lives; the orchestrator
    /// owns it for the duration of each toggle.
    pub fn with_staging_path(store: &'a S, staging_path: PathBuf) -> Self {
        Self {
            store,
            staging_path,
        }
    }

    pub fn toggle(&self, request: &ToggleRequest) -> Result<ToggleOutcome, ToggleError> {
        let staging = StagingArtifact::new(self.staging_path.clone());
        self.store.fetch(staging.path())?;

        let content = fs::read_to_string(staging.path()).map_err(|source| {
            ToggleError::Mutation {
                path: staging.path().to_path_buf(),
                source,
            }
        })?;
        let mut fragment = ConfigFragment::parse(&content);

        match request {
            ToggleRequest::Enable {
                key,
                directive,
                match_mode,
            } => {
                if fragment.locate(key, *match_mode).is_some() {
                    info!(%key, "sniffer already enabled, nothing to do");
                    return Ok(ToggleOutcome::AlreadyInDesiredState);
                }
                fragment.append(&directive.to_string());
            }
            ToggleRequest::Disable { key, match_mode } => {
                // The located line is removed by exact equality, so an
                // owned copy is taken before mutating.
                match fragment.locate(key, *match_mode).map(str::to_string) {
                    Some(line) => fragment.remove(&line),
                    None => {
                        info!(%key, "sniffer already disabled, nothing to do");
                        return Ok(ToggleOutcome::AlreadyInDesiredState);
                    }
                }
            }
        }

        fs::write(staging.path(), fragment.render()).map_err(|source| ToggleError::Mutation {
            path: staging.path().to_path_buf(),
            source,
        })?;
        debug!(path = %staging.path().display(), "staging copy updated");

        self.store.publish(staging.path())?;
        self.store.restart()?;
        Ok(ToggleOutcome::Applied)
    }
}
