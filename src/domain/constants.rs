//! Stable platform constants.
//!
//! These mirror the fixed paths and names baked into the switch image.
//! Changing any of them changes what the tool touches on a live system.

/// Managed container hosting the SDK.
pub const CONTAINER_NAME: &str = "syncd";

/// Supervisor fragment controlling the syncd program inside the container.
pub const SNIFFER_CONF_FILE: &str = "/etc/supervisor/conf.d/mlnx_sniffer.conf";

/// Section header written when the fragment is created from scratch.
pub const PROGRAM_SECTION_HEADER: &str = "[program:syncd]";

/// Fixed local scratch copy of the fragment, removed after every toggle.
pub const STAGING_CONF_FILE: &str = "/tmp/mlnx_sniffer_tmp.conf";

/// Environment key that switches the SDK sniffer on.
pub const ENV_SX_SNIFFER_ENABLE: &str = "SX_SNIFFER_ENABLE";

/// Environment key naming the sniffer recording file.
pub const ENV_SX_SNIFFER_TARGET: &str = "SX_SNIFFER_TARGET";

/// Where sniffer recordings land.
pub const SDK_SNIFFER_TARGET_DIR: &str = "/var/log/sdk_dbg/";
pub const SDK_SNIFFER_FILENAME_PREFIX: &str = "sx_sdk_sniffer_";
pub const SDK_SNIFFER_FILENAME_EXT: &str = ".pcap";

/// Restart command for the service consuming the published configuration.
pub const RESTART_COMMAND: [&str; 3] = ["systemctl", "restart", "swss.service"];

/// sai.profile key controlling module host management mode.
pub const SAI_INDEPENDENT_MODULE_MODE_KEY: &str = "SAI_INDEPENDENT_MODULE_MODE";

/// Default platform directory; a symlink maintained by the NOS image.
pub const DEFAULT_PLATFORM_DIR: &str = "/usr/share/sonic/platform";

/// Device directory carrying the reference SKUs for module host
/// management settings files.
pub const DEFAULT_REFERENCE_DEVICE_DIR: &str = "/usr/share/sonic/device/x86_64-mlnx_msn4700-r0";

/// Reference SKUs probed, in order, for media/optics settings.
pub const REFERENCE_SKUS: [&str; 2] = ["Mellanox-SN4700-O8C48", "Mellanox-SN4700-O8V48"];

/// Default CONFIG_DB snapshot read by the show commands.
pub const DEFAULT_CONFIG_DB_PATH: &str = "/etc/sonic/config_db.json";

// CONFIG_DB table names.
pub const FEATURE_TABLE: &str = "FEATURE";
pub const SYSLOG_TABLE: &str = "SYSLOG_SERVER";
pub const SYSLOG_CONFIG_TABLE: &str = "SYSLOG_CONFIG";
pub const SYSLOG_CONFIG_FEATURE_TABLE: &str = "SYSLOG_CONFIG_FEATURE";

/// Key of the global entry in `SYSLOG_CONFIG`.
pub const SYSLOG_CONFIG_GLOBAL_KEY: &str = "GLOBAL";
