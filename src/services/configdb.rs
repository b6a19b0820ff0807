//! Read-only access to the CONFIG_DB JSON snapshot.
//!
//! The show commands only need table lookups; writes go through the
//! platform's own config pipeline, never through this tool.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

use crate::domain::constants::DEFAULT_CONFIG_DB_PATH;

pub struct ConfigDb {
    tables: Map<String, Value>,
}

impl ConfigDb {
    /// Load from `MLNXCTL_CONFIG_DB` if set, else the fixed snapshot path.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = match std::env::var_os("MLNXCTL_CONFIG_DB") {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_DB_PATH),
        };
        Self::load(&path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        let tables = match value {
            Value::Object(tables) => tables,
            _ => anyhow::bail!("{} is not a JSON object", path.display()),
        };
        Ok(Self { tables })
    }

    /// Entries of a table, naturally sorted by key. A missing table is an
    /// empty list.
    pub fn table(&self, name: &str) -> Vec<(&str, &Map<String, Value>)> {
        let mut entries: Vec<(&str, &Map<String, Value>)> = self
            .tables
            .get(name)
            .and_then(Value::as_object)
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(key, entry)| entry.as_object().map(|e| (key.as_str(), e)))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
        entries
    }

    /// Single entry lookup, no sorting.
    pub fn entry(&self, table: &str, key: &str) -> Option<&Map<String, Value>> {
        self.tables
            .get(table)
            .and_then(Value::as_object)
            .and_then(|t| t.get(key))
            .and_then(Value::as_object)
    }
}

/// A table field rendered for display; absent fields show as `N/A`.
pub fn field(entry: &Map<String, Value>, key: &str) -> String {
    match entry.get(key) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Compare keys the way an operator reads them: runs of digits compare
/// numerically, everything else byte-wise.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.as_bytes();
    let mut right = b.as_bytes();
    loop {
        match (left.first(), right.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&l), Some(&r)) => {
                if l.is_ascii_digit() && r.is_ascii_digit() {
                    let (lnum, lrest) = split_digits(left);
                    let (rnum, rrest) = split_digits(right);
                    // Digit runs of any length order numerically when the
                    // stripped runs compare by length first, then bytes.
                    let ltrim = trim_leading_zeros(lnum);
                    let rtrim = trim_leading_zeros(rnum);
                    match ltrim.len().cmp(&rtrim.len()).then_with(|| ltrim.cmp(rtrim)) {
                        Ordering::Equal => {
                            left = lrest;
                            right = rrest;
                        }
                        other => return other,
                    }
                } else {
                    match l.cmp(&r) {
                        Ordering::Equal => {
                            left = &left[1..];
                            right = &right[1..];
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn split_digits(bytes: &[u8]) -> (&[u8], &[u8]) {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    bytes.split_at(end)
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b'0')
        .unwrap_or(bytes.len());
    &bytes[start..]
}
