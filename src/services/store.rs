//! Access to the remote supervisor fragment and its dependent service.
//!
//! The fragment lives inside the syncd container and is shared mutable
//! state with no lock: two concurrent toggles can interleave fetch,
//! publish and restart non-deterministically. Accepted limitation; do not
//! run this tool concurrently against the same switch.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::domain::constants::{CONTAINER_NAME, RESTART_COMMAND, SNIFFER_CONF_FILE};
use crate::error::{CommandError, ToggleError};

/// Capability over the remote configuration fragment. The production
/// implementation shells out to docker/systemctl; tests substitute an
/// in-memory fake.
pub trait RemoteConfigStore {
    /// Ensure the remote fragment exists, then copy it into `staging`.
    fn fetch(&self, staging: &Path) -> Result<(), ToggleError>;

    /// Copy the mutated staging content back over the remote fragment.
    fn publish(&self, staging: &Path) -> Result<(), ToggleError>;

    /// Restart the service consuming the fragment.
    fn restart(&self) -> Result<(), ToggleError>;
}

/// [`RemoteConfigStore`] backed by the syncd container and systemd.
pub struct DockerConfigStore;

impl DockerConfigStore {
    fn conf_in_container() -> String {
        format!("{CONTAINER_NAME}:{SNIFFER_CONF_FILE}")
    }
}

impl RemoteConfigStore for DockerConfigStore {
    fn fetch(&self, staging: &Path) -> Result<(), ToggleError> {
        run_command(
            "docker",
            &[
                "exec",
                CONTAINER_NAME,
                "bash",
                "-c",
                &format!("touch {SNIFFER_CONF_FILE}"),
            ],
        )
        .map_err(ToggleError::Fetch)?;
        let staging = staging.to_string_lossy();
        run_command("docker", &["cp", &Self::conf_in_container(), &staging])
            .map_err(ToggleError::Fetch)
    }

    fn publish(&self, staging: &Path) -> Result<(), ToggleError> {
        let staging = staging.to_string_lossy();
        run_command("docker", &["cp", &staging, &Self::conf_in_container()])
            .map_err(ToggleError::Publish)
    }

    fn restart(&self) -> Result<(), ToggleError> {
        run_command(RESTART_COMMAND[0], &RESTART_COMMAND[1..]).map_err(ToggleError::Restart)
    }
}

/// Run an external command to completion, treating a spawn failure or any
/// non-zero exit as an error. Blocks with no timeout.
pub fn run_command(program: &str, args: &[&str]) -> Result<(), CommandError> {
    let rendered = format!("{program} {}", args.join(" "));
    debug!(command = %rendered, "running external command");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|err| CommandError {
            command: rendered.clone(),
            reason: err.to_string(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(CommandError {
            command: rendered,
            reason: format!("{}: {}", output.status, stderr.trim()),
        })
    }
}
