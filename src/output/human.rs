//! Human-readable summaries

use super::{CombineSummary, RecreateSummary};

/// Format a combine summary for the terminal
pub fn format_combine(summary: &CombineSummary) -> String {
    let mut output = String::new();

    output.push_str("\nSummary:\n");
    output.push_str(&format!(
        "  Included: {} files ({})\n",
        summary.files, summary.total_size_human
    ));
    if summary.omitted > 0 {
        output.push_str(&format!("  Content omitted: {} files\n", summary.omitted));
    }
    if summary.skipped > 0 {
        output.push_str(&format!("  Skipped: {} files\n", summary.skipped));
    }
    match (&summary.output, summary.total_lines) {
        (Some(path), Some(lines)) => {
            output.push_str(&format!("  Output: {} (~{} lines)\n", path, lines));
        }
        _ => output.push_str("  Dry run, nothing written\n"),
    }

    output
}

/// Format a recreate summary for the terminal
pub fn format_recreate(summary: &RecreateSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nOutput directory: {}\n\n", summary.output_dir));
    for (path, size) in &summary.files {
        output.push_str(&format!("  {} ({})\n", path, super::format_bytes(*size)));
    }

    output.push_str("\nSummary:\n");
    let label = if summary.dry_run {
        "Files to recreate"
    } else {
        "Files recreated"
    };
    output.push_str(&format!("  {}: {}\n", label, summary.files.len()));
    output.push_str(&format!("  Total size: {}\n", summary.total_size_human));
    if !summary.skipped_existing.is_empty() {
        output.push_str(&format!(
            "  Skipped (exists): {}\n",
            summary.skipped_existing.join(", ")
        ));
    }

    output
}
