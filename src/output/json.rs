//! JSON summaries

use serde::Serialize;

/// Format a summary as pretty JSON
pub fn format<T: Serialize>(summary: &T) -> String {
    serde_json::to_string_pretty(summary)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize summary: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CombineSummary;

    #[test]
    fn test_combine_summary_serializes() {
        let summary = CombineSummary {
            files: 2,
            total_size: 100,
            total_size_human: "100.0B".to_string(),
            omitted: 0,
            skipped: 1,
            output: Some("codemerge.txt".to_string()),
            total_lines: Some(42),
            dry_run: false,
        };
        let text = format(&summary);
        assert!(text.contains("\"files\": 2"));
        assert!(text.contains("\"total_lines\": 42"));
    }
}
