//! Document Assembler
//!
//! Renders the merged document from resolved offsets. Deterministic and
//! side-effect-free: same files, index, and options give byte-identical
//! output.
//!
//! The content fence is exactly four backticks so triple-backtick fences
//! inside embedded source cannot terminate a block early.
//!
//! @module merge/assemble

use super::resolver::line_count;
use super::types::{MergeOptions, MergedDocument, SourceFile};

/// Sentinel tags bounding the document sections
pub const CODE_INDEX_OPEN: &str = "<code_index>";
pub const CODE_INDEX_CLOSE: &str = "</code_index>";
pub const MERGED_CODE_OPEN: &str = "<merged_code>";
pub const MERGED_CODE_CLOSE: &str = "</merged_code>";

/// The four-backtick content fence
pub const FENCE: &str = "````";

/// Assemble the final document text.
pub fn assemble(files: &[SourceFile], code_index: &str, opts: &MergeOptions) -> MergedDocument {
    let mut text = String::new();
    let mut total_lines = 0;

    if opts.header {
        text.push_str(&opts.prompt);
        text.push_str("\n\n");
        total_lines += opts.prompt.matches('\n').count() + 2;

        text.push_str(CODE_INDEX_OPEN);
        text.push('\n');
        text.push_str(code_index);
        text.push_str(CODE_INDEX_CLOSE);
        text.push_str("\n\n");
        total_lines += line_count(code_index) + 3;
    }

    text.push_str(MERGED_CODE_OPEN);
    text.push('\n');
    total_lines += 1;

    for file in files {
        text.push_str(&format!(
            "# FILE: {} [OL: 1-{} | ML: {}-{} | {}]\n",
            file.rel_path, file.line_count, file.ml_start, file.ml_end, file.formatted_size
        ));
        text.push_str(FENCE);
        text.push('\n');
        total_lines += 2;

        match &file.content {
            None => {
                text.push_str(&format!(
                    "(Content omitted - file size: {})\n",
                    file.formatted_size
                ));
                total_lines += 1;
            }
            Some(content) => {
                text.push_str(content);
                if !content.ends_with('\n') {
                    text.push('\n');
                }
                total_lines += file.line_count;
            }
        }

        text.push_str(FENCE);
        text.push_str("\n\n");
        total_lines += 2;
    }

    text.push_str(MERGED_CODE_CLOSE);
    text.push('\n');
    total_lines += 1;

    MergedDocument {
        text,
        code_index: code_index.to_string(),
        total_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::resolver::resolve;

    fn file(rel: &str, content: &str) -> SourceFile {
        SourceFile::with_content(
            rel.to_string(),
            content.to_string(),
            content.len() as u64,
            "10.0B".to_string(),
        )
    }

    fn opts(header: bool) -> MergeOptions {
        MergeOptions {
            prompt: "prompt".to_string(),
            header,
            parse: false,
            root_name: "proj".to_string(),
        }
    }

    #[test]
    fn test_file_block_layout() {
        let mut files = vec![file("a.py", "x = 1\ny = 2\nz = 3\n"), file("b.js", "a;\nb;\n")];
        let o = opts(false);
        let index = resolve(&mut files, &o);
        let doc = assemble(&files, &index, &o);

        let lines: Vec<&str> = doc.text.lines().collect();
        assert_eq!(lines[0], "<merged_code>");
        assert_eq!(lines[1], "# FILE: a.py [OL: 1-3 | ML: 4-6 | 10.0B]");
        assert_eq!(lines[2], "````");
        assert_eq!(lines[3], "x = 1");
        assert_eq!(lines[6], "````");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "# FILE: b.js [OL: 1-2 | ML: 11-12 | 10.0B]");
        assert_eq!(*lines.last().unwrap(), "</merged_code>");

        // ML coordinates point at real document lines (1-indexed)
        assert_eq!(lines[files[0].ml_start - 1], "x = 1");
        assert_eq!(lines[files[0].ml_end - 1], "z = 3");
        assert_eq!(lines[files[1].ml_start - 1], "a;");
        // The line right before each body is the fence
        assert_eq!(lines[files[0].ml_start - 2], "````");
        assert_eq!(lines[files[1].ml_start - 2], "````");
    }

    #[test]
    fn test_header_sections_in_order() {
        let mut files = vec![file("a.py", "x = 1\n")];
        let o = opts(true);
        let index = resolve(&mut files, &o);
        let doc = assemble(&files, &index, &o);

        let lines: Vec<&str> = doc.text.lines().collect();
        assert_eq!(lines[0], "prompt");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "<code_index>");
        assert_eq!(lines[3], "proj/");
        assert!(doc.text.contains("</code_index>\n\n<merged_code>\n"));
        assert_eq!(lines[files[0].ml_start - 1], "x = 1");
    }

    #[test]
    fn test_missing_trailing_newline_is_forced() {
        let mut files = vec![file("a.txt", "no newline")];
        let o = opts(false);
        let index = resolve(&mut files, &o);
        let doc = assemble(&files, &index, &o);
        assert!(doc.text.contains("no newline\n````\n"));
    }

    #[test]
    fn test_omitted_body_is_placeholder() {
        let mut files = vec![SourceFile::omitted("big.bin".to_string(), 9000, "8.8KB".to_string())];
        let o = opts(false);
        let index = resolve(&mut files, &o);
        let doc = assemble(&files, &index, &o);

        let lines: Vec<&str> = doc.text.lines().collect();
        assert_eq!(lines[1], "# FILE: big.bin [OL: 1-0 | ML: 4-4 | 8.8KB]");
        assert_eq!(lines[3], "(Content omitted - file size: 8.8KB)");
    }

    #[test]
    fn test_total_lines_matches_text() {
        let mut files = vec![file("a.py", "x = 1\ny = 2\n"), file("b.py", "no newline")];
        let o = opts(true);
        let index = resolve(&mut files, &o);
        let doc = assemble(&files, &index, &o);
        assert_eq!(doc.total_lines, doc.text.matches('\n').count());
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let mut files = vec![file("a.py", "x = 1\n")];
        let o = opts(true);
        let index = resolve(&mut files, &o);
        let a = assemble(&files, &index, &o);
        let b = assemble(&files, &index, &o);
        assert_eq!(a.text, b.text);
    }
}
