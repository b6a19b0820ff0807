use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub platform_dir: PathBuf,
    pub hwsku_dir: PathBuf,
    pub capture_dir: PathBuf,
    pub staging_file: PathBuf,
    reference_dir: PathBuf,
    config_db: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let platform_dir = tmp.path().join("platform");
        let hwsku_dir = platform_dir.join("ACS-MSN4700");
        let reference_dir = tmp.path().join("device");
        let reference_sku = reference_dir.join("Mellanox-SN4700-O8C48");
        fs::create_dir_all(&hwsku_dir).expect("create hwsku dir");
        fs::create_dir_all(&reference_sku).expect("create reference sku dir");

        fs::write(hwsku_dir.join("sai.profile"), "SAI_INIT_CONFIG_FILE=/usr/share/sai.xml\n")
            .expect("write sai.profile");
        fs::write(
            platform_dir.join("pmon_daemon_control.json"),
            serde_json::json!({
                "skip_ledd": true,
                "skip_xcvrd_cmis_mgr": true
            })
            .to_string(),
        )
        .expect("write pmon daemon control");
        fs::write(reference_sku.join("media_settings.json"), "{}").expect("write media settings");
        fs::write(reference_sku.join("optics_si_settings.json"), "{}")
            .expect("write optics settings");

        let config_db = tmp.path().join("config_db.json");
        let db = serde_json::json!({
            "SYSLOG_SERVER": {
                "10.0.0.10": {"port": "514"},
                "10.0.0.2": {"source": "10.0.0.1", "vrf": "mgmt"}
            },
            "SYSLOG_CONFIG": {
                "GLOBAL": {"rate_limit_interval": "300", "rate_limit_burst": "20000"}
            },
            "SYSLOG_CONFIG_FEATURE": {
                "bgp": {"rate_limit_interval": "60", "rate_limit_burst": "100"}
            },
            "FEATURE": {
                "bgp": {"state": "enabled", "support_syslog_rate_limit": "true"},
                "pmon": {"state": "disabled", "support_syslog_rate_limit": "true"},
                "swss": {"state": "enabled", "support_syslog_rate_limit": "false"}
            }
        });
        fs::write(&config_db, serde_json::to_string_pretty(&db).expect("serialize config_db"))
            .expect("write config_db");

        // Left uncreated on purpose: the enable path must create it.
        let capture_dir = tmp.path().join("captures");
        let staging_file = tmp.path().join("staging.conf");

        Self {
            _tmp: tmp,
            platform_dir,
            hwsku_dir,
            capture_dir,
            staging_file,
            reference_dir,
            config_db,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("mlnxctl");
        cmd.env("MLNXCTL_PLATFORM_DIR", &self.platform_dir)
            .env("MLNXCTL_HWSKU_DIR", &self.hwsku_dir)
            .env("MLNXCTL_REFERENCE_DEVICE_DIR", &self.reference_dir)
            .env("MLNXCTL_CONFIG_DB", &self.config_db)
            .env("MLNXCTL_CAPTURE_DIR", &self.capture_dir)
            .env("MLNXCTL_STAGING_FILE", &self.staging_file);
        cmd
    }
}
