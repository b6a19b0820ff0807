//! Module host management (independent module) mode.
//!
//! Same staging-free edit pattern as the sniffer toggle, but purely local:
//! a profile line in `sai.profile` plus three settings files in the hwsku
//! directory, and no service restart.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::debug;

use crate::domain::constants::{
    DEFAULT_PLATFORM_DIR, DEFAULT_REFERENCE_DEVICE_DIR, REFERENCE_SKUS,
    SAI_INDEPENDENT_MODULE_MODE_KEY,
};
use crate::domain::models::PmonDaemonControl;

const SAI_PROFILE_FILE: &str = "sai.profile";
const PMON_DAEMON_CONTROL_FILE: &str = "pmon_daemon_control.json";
const SETTINGS_FILES: [&str; 2] = ["media_settings.json", "optics_si_settings.json"];

/// Platform and hwsku directories of the running switch.
///
/// Resolution order: `MLNXCTL_PLATFORM_DIR`/`MLNXCTL_HWSKU_DIR` env
/// overrides, then the image-maintained platform symlink with the hwsku
/// named by the platform's `default_sku` file.
pub struct DevicePaths {
    pub platform_dir: PathBuf,
    pub hwsku_dir: PathBuf,
}

impl DevicePaths {
    pub fn resolve() -> anyhow::Result<Self> {
        let platform_dir = match std::env::var_os("MLNXCTL_PLATFORM_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(DEFAULT_PLATFORM_DIR),
        };
        let hwsku_dir = match std::env::var_os("MLNXCTL_HWSKU_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let default_sku_path = platform_dir.join("default_sku");
                let default_sku = fs::read_to_string(&default_sku_path).with_context(|| {
                    format!("reading {}", default_sku_path.display())
                })?;
                let sku = default_sku
                    .split_whitespace()
                    .next()
                    .with_context(|| format!("{} is empty", default_sku_path.display()))?;
                platform_dir.join(sku)
            }
        };
        Ok(Self {
            platform_dir,
            hwsku_dir,
        })
    }

    fn sai_profile(&self) -> PathBuf {
        self.hwsku_dir.join(SAI_PROFILE_FILE)
    }
}

/// Device directory holding the reference SKUs for settings files.
pub fn reference_device_dir() -> PathBuf {
    match std::env::var_os("MLNXCTL_REFERENCE_DEVICE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(DEFAULT_REFERENCE_DEVICE_DIR),
    }
}

/// Whether module host management mode is currently on, derived from the
/// sai.profile content (no cached state).
pub fn is_enabled(paths: &DevicePaths) -> anyhow::Result<bool> {
    let profile = paths.sai_profile();
    if !profile.exists() {
        return Ok(false);
    }
    let content =
        fs::read_to_string(&profile).with_context(|| format!("reading {}", profile.display()))?;
    Ok(content.lines().any(is_mode_line))
}

fn is_mode_line(line: &str) -> bool {
    line.split_once('=')
        .is_some_and(|(key, _)| key.trim() == SAI_INDEPENDENT_MODULE_MODE_KEY)
}

/// Turn the mode on: append the profile line, rewrite the pmon daemon
/// control flags into the hwsku dir, and copy the reference settings
/// files.
pub fn enable(paths: &DevicePaths, reference_dir: &Path) -> anyhow::Result<()> {
    let profile = paths.sai_profile();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&profile)
        .with_context(|| format!("opening {}", profile.display()))?;
    writeln!(file, "{SAI_INDEPENDENT_MODULE_MODE_KEY}=1")
        .with_context(|| format!("appending to {}", profile.display()))?;

    let src = paths.platform_dir.join(PMON_DAEMON_CONTROL_FILE);
    let raw =
        fs::read_to_string(&src).with_context(|| format!("reading {}", src.display()))?;
    let mut control: PmonDaemonControl =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", src.display()))?;
    control.skip_xcvrd_cmis_mgr = false;
    control.enable_xcvrd_sff_mgr = true;

    let dst = paths.hwsku_dir.join(PMON_DAEMON_CONTROL_FILE);
    fs::write(&dst, serde_json::to_string(&control)?)
        .with_context(|| format!("writing {}", dst.display()))?;

    for name in SETTINGS_FILES {
        let src = locate_reference_file(reference_dir, name)?;
        let dst = paths.hwsku_dir.join(name);
        debug!(src = %src.display(), dst = %dst.display(), "copying settings file");
        fs::copy(&src, &dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    }
    Ok(())
}

/// Turn the mode off: drop the profile line and delete the three settings
/// files from the hwsku dir. Missing files are tolerated.
pub fn disable(paths: &DevicePaths) -> anyhow::Result<()> {
    let profile = paths.sai_profile();
    let content =
        fs::read_to_string(&profile).with_context(|| format!("reading {}", profile.display()))?;
    let kept: Vec<&str> = content.lines().filter(|line| !is_mode_line(line)).collect();
    let mut rewritten = kept.join("\n");
    if !rewritten.is_empty() {
        rewritten.push('\n');
    }
    fs::write(&profile, rewritten)
        .with_context(|| format!("rewriting {}", profile.display()))?;

    for name in [PMON_DAEMON_CONTROL_FILE, SETTINGS_FILES[0], SETTINGS_FILES[1]] {
        let path = paths.hwsku_dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed settings file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("removing {}", path.display()))
            }
        }
    }
    Ok(())
}

/// Probe the reference SKUs in order for a settings file.
fn locate_reference_file(reference_dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    for sku in REFERENCE_SKUS {
        let candidate = reference_dir.join(sku).join(name);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    bail!(
        "no reference SKU under {} provides {name}",
        reference_dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, DevicePaths, PathBuf) {
        let tmp = TempDir::new().expect("temp dir");
        let platform_dir = tmp.path().join("platform");
        let hwsku_dir = platform_dir.join("ACS-MSN4700");
        let reference = tmp.path().join("device");
        fs::create_dir_all(&hwsku_dir).expect("hwsku dir");
        fs::create_dir_all(reference.join(REFERENCE_SKUS[1])).expect("reference dir");

        fs::write(hwsku_dir.join("sai.profile"), "SAI_KEY=value\n").expect("sai.profile");
        fs::write(
            platform_dir.join("pmon_daemon_control.json"),
            r#"{"skip_ledd": true, "skip_xcvrd_cmis_mgr": true}"#,
        )
        .expect("pmon control");
        for name in SETTINGS_FILES {
            fs::write(reference.join(REFERENCE_SKUS[1]).join(name), "{}").expect("settings");
        }

        (
            tmp,
            DevicePaths {
                platform_dir,
                hwsku_dir,
            },
            reference,
        )
    }

    #[test]
    fn enable_appends_profile_line_and_materializes_files() {
        let (_tmp, paths, reference) = fixture();
        assert!(!is_enabled(&paths).expect("detect"));

        enable(&paths, &reference).expect("enable");

        assert!(is_enabled(&paths).expect("detect"));
        let profile = fs::read_to_string(paths.hwsku_dir.join("sai.profile")).expect("profile");
        assert_eq!(profile, "SAI_KEY=value\nSAI_INDEPENDENT_MODULE_MODE=1\n");

        let control = fs::read_to_string(paths.hwsku_dir.join("pmon_daemon_control.json"))
            .expect("control");
        let control: serde_json::Value = serde_json::from_str(&control).expect("json");
        assert_eq!(control["skip_xcvrd_cmis_mgr"], false);
        assert_eq!(control["enable_xcvrd_sff_mgr"], true);
        // Unrelated keys survive the rewrite.
        assert_eq!(control["skip_ledd"], true);

        for name in SETTINGS_FILES {
            assert!(paths.hwsku_dir.join(name).exists());
        }
    }

    #[test]
    fn disable_removes_line_and_files() {
        let (_tmp, paths, reference) = fixture();
        enable(&paths, &reference).expect("enable");

        disable(&paths).expect("disable");

        assert!(!is_enabled(&paths).expect("detect"));
        let profile = fs::read_to_string(paths.hwsku_dir.join("sai.profile")).expect("profile");
        assert_eq!(profile, "SAI_KEY=value\n");
        assert!(!paths.hwsku_dir.join("pmon_daemon_control.json").exists());
        for name in SETTINGS_FILES {
            assert!(!paths.hwsku_dir.join(name).exists());
        }
    }

    #[test]
    fn disable_tolerates_missing_settings_files() {
        let (_tmp, paths, _reference) = fixture();
        fs::write(
            paths.hwsku_dir.join("sai.profile"),
            "SAI_KEY=value\nSAI_INDEPENDENT_MODULE_MODE=1\n",
        )
        .expect("profile");

        disable(&paths).expect("disable");
        assert!(!is_enabled(&paths).expect("detect"));
    }
}
