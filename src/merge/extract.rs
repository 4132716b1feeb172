//! Round-trip Extractor
//!
//! Parses a merged document back into discrete files. Matches the current
//! `# FILE:` header with four-backtick fences first, then falls back to the
//! legacy `### **FILE:**` header with triple-backtick fences for documents
//! produced by older versions. Omitted bodies are skipped: their content was
//! never in the document.
//!
//! The assembler forces a newline before every closing fence; extraction
//! restores it, so a merge-then-extract round trip reproduces
//! newline-terminated files byte for byte.
//!
//! @module merge/extract

use crate::core::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Current FileBlock pattern: `# FILE: path [...]` + four-backtick fences
static FILE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"# FILE:\s*(.+?)\s*\[.*?\]\n````\n((?s:.*?))\n````").unwrap());

/// Legacy FileBlock pattern: `### **FILE:** `path`` + triple-backtick fences
static LEGACY_FILE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"### \*\*FILE:\*\*\s*`(.+?)`\n```\n((?s:.*?))\n```").unwrap());

/// A file recovered from a merged document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Relative path from the FileBlock header
    pub path: String,
    /// Verbatim content between the fences, newline-terminated
    pub content: String,
}

/// Extract all reconstructible files from a merged document.
///
/// Errors with [`Error::NoFilesInDocument`] when neither the current nor the
/// legacy pattern matches anything.
pub fn extract(document: &str) -> Result<Vec<ExtractedFile>> {
    let mut files = collect(&FILE_BLOCK, document);

    if files.is_empty() {
        files = collect(&LEGACY_FILE_BLOCK, document);
        if !files.is_empty() {
            debug!(count = files.len(), "matched legacy document format");
        }
    }

    if files.is_empty() {
        return Err(Error::NoFilesInDocument);
    }

    Ok(files)
}

fn collect(pattern: &Regex, document: &str) -> Vec<ExtractedFile> {
    let mut files = Vec::new();

    for caps in pattern.captures_iter(document) {
        let path = caps[1].trim().to_string();
        let body = &caps[2];

        // Omitted bodies are lossy; nothing to reconstruct.
        if body.trim_start().starts_with("(Content omitted") {
            debug!(path, "skipping omitted file");
            continue;
        }

        files.push(ExtractedFile {
            path,
            content: format!("{}\n", body),
        });
    }

    files
}

/// What a recreate run did (or would do, for dry runs).
#[derive(Debug, Default)]
pub struct RecreateOutcome {
    /// (path, byte size) of every reconstructible file
    pub files: Vec<(String, u64)>,
    /// Paths left untouched because the target existed without overwrite
    pub skipped_existing: Vec<String>,
    /// Total bytes across reconstructible files
    pub total_size: u64,
}

/// Write extracted files under `output_dir`, creating parent directories.
///
/// A pre-existing target without `overwrite` is a reported skip, not an
/// error; remaining files still get written. Dry runs only tally.
pub fn write_files(
    files: &[ExtractedFile],
    output_dir: &Path,
    dry_run: bool,
    overwrite: bool,
) -> Result<RecreateOutcome> {
    let mut outcome = RecreateOutcome::default();

    for file in files {
        let size = file.content.len() as u64;
        outcome.total_size += size;
        outcome.files.push((file.path.clone(), size));

        if dry_run {
            continue;
        }

        let target = output_dir.join(&file.path);
        if target.exists() && !overwrite {
            warn!(path = %file.path, "target exists, skipping (use --overwrite)");
            outcome.skipped_existing.push(file.path.clone());
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &file.content)?;
    }

    Ok(outcome)
}
