use std::path::PathBuf;

use dialoguer::Confirm;
use tracing::error;

use crate::cli::SdkCommands;
use crate::domain::constants::{
    ENV_SX_SNIFFER_ENABLE, ENV_SX_SNIFFER_TARGET, SDK_SNIFFER_FILENAME_EXT,
    SDK_SNIFFER_FILENAME_PREFIX, SDK_SNIFFER_TARGET_DIR, STAGING_CONF_FILE,
};
use crate::error::ToggleError;
use crate::services::capture::build_capture_path;
use crate::services::fragment::{EnvDirective, MatchMode};
use crate::services::store::DockerConfigStore;
use crate::services::toggle::{ToggleOrchestrator, ToggleOutcome, ToggleRequest};

pub fn handle_sdk_commands(command: SdkCommands) -> anyhow::Result<()> {
    match command {
        SdkCommands::Enable {
            yes,
            legacy_substring_match,
        } => sdk_enable(yes, match_mode(legacy_substring_match)),
        SdkCommands::Disable {
            yes,
            legacy_substring_match,
        } => sdk_disable(yes, match_mode(legacy_substring_match)),
    }
}

fn match_mode(legacy_substring_match: bool) -> MatchMode {
    if legacy_substring_match {
        MatchMode::Substring
    } else {
        MatchMode::ExactKey
    }
}

/// Capture directory, overridable via `MLNXCTL_CAPTURE_DIR` (test seam).
fn capture_dir() -> PathBuf {
    match std::env::var_os("MLNXCTL_CAPTURE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(SDK_SNIFFER_TARGET_DIR),
    }
}

/// Staging path, overridable via `MLNXCTL_STAGING_FILE` (test seam).
fn staging_path() -> PathBuf {
    match std::env::var_os("MLNXCTL_STAGING_FILE") {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(STAGING_CONF_FILE),
    }
}

fn sdk_enable(yes: bool, match_mode: MatchMode) -> anyhow::Result<()> {
    if !confirm_restart(yes)? {
        return Ok(());
    }
    println!("Enabling SDK sniffer");

    let target = build_capture_path(
        &capture_dir(),
        SDK_SNIFFER_FILENAME_PREFIX,
        SDK_SNIFFER_FILENAME_EXT,
    )?;
    let mut directive = EnvDirective::new();
    directive.push(ENV_SX_SNIFFER_ENABLE, "1");
    directive.push(ENV_SX_SNIFFER_TARGET, target.to_string_lossy());

    let store = DockerConfigStore;
    let orchestrator = ToggleOrchestrator::with_staging_path(&store, staging_path());
    let outcome = orchestrator.toggle(&ToggleRequest::Enable {
        key: ENV_SX_SNIFFER_ENABLE.to_string(),
        directive,
        match_mode,
    });

    match outcome {
        Ok(ToggleOutcome::Applied) => {
            println!(
                "SDK sniffer is Enabled, recording file is {}.",
                target.display()
            );
            println!(
                "Note: the sniffer file may exhaust the space on /var/log, \
                 please disable it when you are done with this sniffering."
            );
            Ok(())
        }
        Ok(ToggleOutcome::AlreadyInDesiredState) => {
            println!("sniffer is already enabled, do nothing");
            Ok(())
        }
        Err(err) => Err(report_toggle_error(err)),
    }
}

fn sdk_disable(yes: bool, match_mode: MatchMode) -> anyhow::Result<()> {
    if !confirm_restart(yes)? {
        return Ok(());
    }
    println!("Disabling SDK sniffer");

    let store = DockerConfigStore;
    let orchestrator = ToggleOrchestrator::with_staging_path(&store, staging_path());
    let outcome = orchestrator.toggle(&ToggleRequest::Disable {
        key: ENV_SX_SNIFFER_ENABLE.to_string(),
        match_mode,
    });

    match outcome {
        Ok(ToggleOutcome::Applied) => {
            println!("SDK sniffer is Disabled.");
            Ok(())
        }
        Ok(ToggleOutcome::AlreadyInDesiredState) => {
            println!("sniffer is already disabled, do nothing");
            Ok(())
        }
        Err(err) => Err(report_toggle_error(err)),
    }
}

/// Restart failure deserves an operator-visible log line: the config has
/// already been published and the service is now out of sync with it.
fn report_toggle_error(err: ToggleError) -> anyhow::Error {
    if let ToggleError::Restart(cause) = &err {
        error!(%cause, "not able to restart swss service");
    }
    err.into()
}

fn confirm_restart(yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    let proceed = Confirm::new()
        .with_prompt("Swss service will be restarted, continue?")
        .default(false)
        .interact()?;
    if !proceed {
        println!("Aborted.");
    }
    Ok(proceed)
}
