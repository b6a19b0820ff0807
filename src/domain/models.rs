use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `pmon_daemon_control.json` as edited for module host management mode.
///
/// Only the two transceiver-daemon flags are interpreted; every other key
/// is carried through unchanged via `rest`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PmonDaemonControl {
    #[serde(default)]
    pub skip_xcvrd_cmis_mgr: bool,
    #[serde(default)]
    pub enable_xcvrd_sff_mgr: bool,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}
