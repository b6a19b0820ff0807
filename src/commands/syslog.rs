use anyhow::bail;
use serde_json::Value;

use crate::cli::SyslogCommands;
use crate::domain::constants::{
    FEATURE_TABLE, SYSLOG_CONFIG_FEATURE_TABLE, SYSLOG_CONFIG_GLOBAL_KEY, SYSLOG_CONFIG_TABLE,
    SYSLOG_TABLE,
};
use crate::services::configdb::{field, natural_cmp, ConfigDb};
use crate::services::output::{add_row, new_table};

pub fn handle_syslog_commands(command: Option<SyslogCommands>) -> anyhow::Result<()> {
    let db = ConfigDb::load_default()?;
    match command {
        None => show_servers(&db),
        Some(SyslogCommands::RateLimitHost) => show_rate_limit_host(&db),
        Some(SyslogCommands::RateLimitContainer { service }) => {
            show_rate_limit_container(&db, service.as_deref())
        }
    }
}

fn show_servers(db: &ConfigDb) -> anyhow::Result<()> {
    let mut table = new_table(&["SERVER IP", "SOURCE IP", "PORT", "VRF"]);
    for (server, entry) in db.table(SYSLOG_TABLE) {
        add_row(
            &mut table,
            vec![
                server.to_string(),
                field(entry, "source"),
                field(entry, "port"),
                field(entry, "vrf"),
            ],
        );
    }
    println!("{table}");
    Ok(())
}

fn show_rate_limit_host(db: &ConfigDb) -> anyhow::Result<()> {
    let mut table = new_table(&["INTERVAL", "BURST"]);
    if let Some(entry) = db.entry(SYSLOG_CONFIG_TABLE, SYSLOG_CONFIG_GLOBAL_KEY) {
        add_row(
            &mut table,
            vec![
                field(entry, "rate_limit_interval"),
                field(entry, "rate_limit_burst"),
            ],
        );
    }
    println!("{table}");
    Ok(())
}

fn show_rate_limit_container(db: &ConfigDb, service: Option<&str>) -> anyhow::Result<()> {
    let features = db.table(FEATURE_TABLE);

    let mut services: Vec<&str> = match service {
        Some(name) => {
            let Some((_, entry)) = features.iter().find(|(key, _)| *key == name) else {
                let known: Vec<&str> = features.iter().map(|(key, _)| *key).collect();
                bail!(
                    "Invalid service name {name}, please choose from: {}",
                    known.join(",")
                );
            };
            if is_disabled(entry) {
                bail!("Service {name} is disabled, please enable it first");
            }
            if !supports_rate_limit(entry) {
                bail!("Service {name} does not support syslog rate limit");
            }
            vec![name]
        }
        None => features
            .iter()
            .filter(|(_, entry)| supports_rate_limit(entry) && !is_disabled(entry))
            .map(|(key, _)| *key)
            .collect(),
    };
    services.sort_by(|a, b| natural_cmp(a, b));

    let mut table = new_table(&["SERVICE", "INTERVAL", "BURST"]);
    for name in services {
        let (interval, burst) = match db.entry(SYSLOG_CONFIG_FEATURE_TABLE, name) {
            Some(entry) => (
                field(entry, "rate_limit_interval"),
                field(entry, "rate_limit_burst"),
            ),
            None => ("N/A".to_string(), "N/A".to_string()),
        };
        add_row(&mut table, vec![name.to_string(), interval, burst]);
    }
    println!("{table}");
    Ok(())
}

fn is_disabled(entry: &serde_json::Map<String, Value>) -> bool {
    matches!(
        entry.get("state").and_then(Value::as_str),
        Some("disabled") | Some("always_disabled")
    )
}

fn supports_rate_limit(entry: &serde_json::Map<String, Value>) -> bool {
    entry
        .get("support_syslog_rate_limit")
        .and_then(Value::as_str)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
