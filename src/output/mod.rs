//! Output formatting
//!
//! Byte-size humanization plus the summary records the CLI reports, with
//! human and JSON renderers.

pub mod human;
pub mod json;

use serde::Serialize;

/// Human-readable byte size: `0B`, `512.0B`, `1.5KB`, `2.0MB`, ...
pub fn format_bytes(size: u64) -> String {
    if size == 0 {
        return "0B".to_string();
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let exponent = ((size as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = size as f64 / 1024f64.powi(exponent as i32);
    format!("{:.1}{}", scaled, UNITS[exponent])
}

/// What one combine run did
#[derive(Debug, Serialize)]
pub struct CombineSummary {
    /// Files included in the document
    pub files: usize,
    /// Total content bytes across preserved files
    pub total_size: u64,
    /// `total_size`, humanized
    pub total_size_human: String,
    /// Files whose content was omitted
    pub omitted: usize,
    /// Entries the walker skipped itself (binary, filtered, self-output)
    pub skipped: usize,
    /// Output path, absent on dry runs
    pub output: Option<String>,
    /// Line count of the assembled document, absent on dry runs
    pub total_lines: Option<usize>,
    pub dry_run: bool,
}

/// What one recreate run did
#[derive(Debug, Serialize)]
pub struct RecreateSummary {
    /// (path, byte size) per reconstructible file
    pub files: Vec<(String, u64)>,
    /// Total bytes across reconstructible files
    pub total_size: u64,
    /// `total_size`, humanized
    pub total_size_human: String,
    /// Targets left untouched because they existed without --overwrite
    pub skipped_existing: Vec<String>,
    /// Directory files were (or would be) written under
    pub output_dir: String,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(512), "512.0B");
        assert_eq!(format_bytes(1024), "1.0KB");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.0MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0GB");
    }
}
