//! Merge Pipeline Data Structures
//!
//! A [`SourceFile`] is created fresh per invocation from the walker's file
//! list, carries its scanned element forest, and picks up its merged-line
//! span from the resolver. Nothing here is persisted.
//!
//! @module merge/types

use crate::scan::CodeElement;

/// A file participating in one merge invocation.
///
/// The relative path (forward slashes) is the unique key. `content` is
/// `None` when the file's body is omitted from the document; the file still
/// appears in the tree and index.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Relative path with forward slashes, unique within the run
    pub rel_path: String,
    /// Raw content; `None` means content-omitted
    pub content: Option<String>,
    /// Size on disk in bytes
    pub size: u64,
    /// Human-formatted size, computed once by the walker
    pub formatted_size: String,
    /// Content line count; 0 for omitted files
    pub line_count: usize,
    /// Nested code elements (empty when parsing is disabled)
    pub elements: Vec<CodeElement>,
    /// First merged-document line of the body (set by the resolver)
    pub ml_start: usize,
    /// Last merged-document line of the body (set by the resolver)
    pub ml_end: usize,
}

impl SourceFile {
    /// File whose content is carried verbatim.
    pub fn with_content(
        rel_path: String,
        content: String,
        size: u64,
        formatted_size: String,
    ) -> Self {
        let line_count = count_lines(&content);
        Self {
            rel_path,
            content: Some(content),
            size,
            formatted_size,
            line_count,
            elements: Vec::new(),
            ml_start: 0,
            ml_end: 0,
        }
    }

    /// File listed in the tree with its body replaced by a size placeholder.
    pub fn omitted(rel_path: String, size: u64, formatted_size: String) -> Self {
        Self {
            rel_path,
            content: None,
            size,
            formatted_size,
            line_count: 0,
            elements: Vec::new(),
            ml_start: 0,
            ml_end: 0,
        }
    }

    /// File that failed to read; its body becomes an inline error marker so
    /// the rest of the run continues.
    pub fn unreadable(
        rel_path: String,
        error: &std::io::Error,
        size: u64,
        formatted_size: String,
    ) -> Self {
        Self::with_content(
            rel_path,
            format!("... (error reading file: {}) ...", error),
            size,
            formatted_size,
        )
    }

    /// Whether the body is omitted from the merged document
    pub fn is_omitted(&self) -> bool {
        self.content.is_none()
    }
}

/// Count content lines: a trailing newline does not open a final empty line.
pub fn count_lines(content: &str) -> usize {
    let newlines = content.matches('\n').count();
    if content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Split content into the line array the scanner sees. The empty slice after
/// a terminal newline is dropped so indices match `count_lines`.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Knobs for one merge invocation, resolved by the caller from flags and
/// configuration before the pipeline runs.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Prompt text placed before the code index
    pub prompt: String,
    /// Emit the prompt and code index
    pub header: bool,
    /// Code structure was scanned (controls element lines in the index)
    pub parse: bool,
    /// Project root directory name, shown as the tree root
    pub root_name: String,
}

/// The assembled document plus the numbers the summary reports.
#[derive(Debug)]
pub struct MergedDocument {
    /// Full document text
    pub text: String,
    /// The code-index section body (also used by dry runs)
    pub code_index: String,
    /// Total line count of the document
    pub total_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines("a\nb\nc"), 3);
        assert_eq!(count_lines("a\nb\nc\n"), 3);
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("\n"), 1);
    }

    #[test]
    fn test_split_lines_matches_count() {
        for content in ["a\nb\nc", "a\nb\nc\n", "", "\n", "one line"] {
            assert_eq!(split_lines(content).len(), count_lines(content), "{:?}", content);
        }
    }

    #[test]
    fn test_unreadable_is_single_line() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let file = SourceFile::unreadable("a.txt".into(), &err, 10, "10.0B".into());
        assert_eq!(file.line_count, 1);
        assert!(file.content.unwrap().starts_with("... (error reading file:"));
    }

    #[test]
    fn test_omitted_has_zero_lines() {
        let file = SourceFile::omitted("big.bin".into(), 4096, "4.0KB".into());
        assert!(file.is_omitted());
        assert_eq!(file.line_count, 0);
    }
}
