//! Line-level operations on a supervisor program stanza.
//!
//! The fragment is a plain ordered list of text lines: a `[program:...]`
//! header followed by directives. At most one line carries a given
//! environment key; mutation never reorders unrelated lines.

use std::fmt;

use crate::domain::constants::PROGRAM_SECTION_HEADER;

/// How [`ConfigFragment::locate`] matches a line against a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Match only `environment=` directives whose pair list carries the
    /// key exactly.
    ExactKey,
    /// Match any line containing the key anywhere. Mirrors the historical
    /// lookup; with keys sharing a prefix it can locate the wrong line.
    Substring,
}

/// Ordered lines of a supervisor program stanza.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigFragment {
    lines: Vec<String>,
}

impl ConfigFragment {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// First line matching `key`, scanning top to bottom.
    pub fn locate(&self, key: &str, mode: MatchMode) -> Option<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .find(|line| match mode {
                MatchMode::Substring => line.contains(key),
                MatchMode::ExactKey => environment_keys(line).any(|k| k == key),
            })
    }

    /// Append a directive line, writing the section header first when the
    /// fragment is empty.
    pub fn append(&mut self, line: &str) {
        if self.lines.is_empty() {
            self.lines.push(PROGRAM_SECTION_HEADER.to_string());
        }
        self.lines.push(line.to_string());
    }

    /// Drop every line exactly equal to `exact_line`, keeping the order of
    /// the rest.
    pub fn remove(&mut self, exact_line: &str) {
        self.lines.retain(|line| line != exact_line);
    }

    /// Serialize back to file content. Non-empty fragments end with a
    /// newline; an empty fragment renders as an empty string.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            format!("{}\n", self.lines.join("\n"))
        }
    }
}

/// Keys of an `environment=K=V[,K=V...]` directive; empty for other lines.
fn environment_keys(line: &str) -> impl Iterator<Item = &str> {
    line.trim()
        .strip_prefix("environment=")
        .into_iter()
        .flat_map(|payload| payload.split(','))
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, _)| key)
}

/// A supervisor `environment=` directive built from ordered key/value
/// pairs. Insertion order determines the rendered layout.
#[derive(Clone, Debug, Default)]
pub struct EnvDirective {
    pairs: Vec<(String, String)>,
}

impl EnvDirective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }
}

impl fmt::Display for EnvDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "environment=")?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_exact_key_ignores_prefix_collisions() {
        let fragment = ConfigFragment::parse(
            "[program:syncd]\nenvironment=SX_SNIFFER_TARGET=/var/log/x.pcap\n",
        );
        assert_eq!(fragment.locate("SX_SNIFFER_ENABLE", MatchMode::ExactKey), None);
        assert_eq!(fragment.locate("SX_SNIFFER", MatchMode::ExactKey), None);
        assert!(fragment
            .locate("SX_SNIFFER_TARGET", MatchMode::ExactKey)
            .is_some());
    }

    #[test]
    fn locate_substring_matches_anywhere() {
        let fragment = ConfigFragment::parse(
            "[program:syncd]\nenvironment=SX_SNIFFER_TARGET=/var/log/x.pcap\n",
        );
        assert_eq!(
            fragment.locate("SX_SNIFFER", MatchMode::Substring),
            Some("environment=SX_SNIFFER_TARGET=/var/log/x.pcap")
        );
    }

    #[test]
    fn locate_on_empty_fragment_is_none() {
        let fragment = ConfigFragment::parse("");
        assert_eq!(fragment.locate("ANY", MatchMode::ExactKey), None);
        assert_eq!(fragment.locate("ANY", MatchMode::Substring), None);
    }

    #[test]
    fn append_writes_header_on_empty_fragment() {
        let mut fragment = ConfigFragment::parse("");
        fragment.append("environment=A=1");
        assert_eq!(fragment.render(), "[program:syncd]\nenvironment=A=1\n");
    }

    #[test]
    fn append_keeps_existing_header() {
        let mut fragment = ConfigFragment::parse("[program:syncd]\nfoo=bar\n");
        fragment.append("environment=A=1");
        assert_eq!(
            fragment.render(),
            "[program:syncd]\nfoo=bar\nenvironment=A=1\n"
        );
    }

    #[test]
    fn remove_keeps_order_of_unrelated_lines() {
        let mut fragment =
            ConfigFragment::parse("[program:syncd]\nfoo=bar\nenvironment=A=1\nbaz=qux\n");
        fragment.remove("environment=A=1");
        assert_eq!(fragment.render(), "[program:syncd]\nfoo=bar\nbaz=qux\n");
    }

    #[test]
    fn env_directive_renders_pairs_in_insertion_order() {
        let mut directive = EnvDirective::new();
        directive.push("SX_SNIFFER_ENABLE", "1");
        directive.push("SX_SNIFFER_TARGET", "/var/log/sdk_dbg/x.pcap");
        assert_eq!(
            directive.to_string(),
            "environment=SX_SNIFFER_ENABLE=1,SX_SNIFFER_TARGET=/var/log/sdk_dbg/x.pcap"
        );
    }
}
