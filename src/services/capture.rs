use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

/// Build the capture target path `<dir><prefix><timestamp><ext>`, creating
/// `dir` (with parents) first. The timestamp is second-resolution local
/// time and sorts lexicographically.
pub fn build_capture_path(dir: &Path, prefix: &str, ext: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating capture directory {}", dir.display()))?;
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    Ok(dir.join(format!("{prefix}{stamp}{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory_and_shapes_filename() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let dir = tmp.path().join("captures/sdk");
        let path = build_capture_path(&dir, "sx_sdk_sniffer_", ".pcap").expect("build path");

        assert!(dir.is_dir());
        let name = path.file_name().and_then(|n| n.to_str()).expect("utf8 name");
        let stamp = name
            .strip_prefix("sx_sdk_sniffer_")
            .and_then(|rest| rest.strip_suffix(".pcap"))
            .expect("prefix and extension");
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
