//! Merge Pipeline
//!
//! Everything between the walker's file list and the final document: offset
//! resolution, code-index rendering, document assembly, and the inverse
//! extraction path. One invocation allocates fresh structures and drops them
//! when the document (or the extracted file list) is produced.
//!
//! @module merge

pub mod assemble;
pub mod extract;
pub mod index;
pub mod resolver;
pub mod types;

pub use assemble::{assemble, FENCE};
pub use extract::{extract, write_files, ExtractedFile, RecreateOutcome};
pub use index::render_code_index;
pub use resolver::resolve;
pub use types::{count_lines, split_lines, MergeOptions, MergedDocument, SourceFile};

/// Resolve offsets and assemble the document in one step.
pub fn build_document(files: &mut [SourceFile], opts: &MergeOptions) -> MergedDocument {
    let code_index = resolve(files, opts);
    assemble(files, &code_index, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(rel: &str, content: &str) -> SourceFile {
        SourceFile::with_content(
            rel.to_string(),
            content.to_string(),
            content.len() as u64,
            "1.0KB".to_string(),
        )
    }

    #[test]
    fn test_round_trip_is_exact() {
        let inputs = vec![
            ("src/app.py", "class App:\n    def run(self):\n        pass\n"),
            ("src/lib/util.js", "function id(x) {\n  return x;\n}\n"),
            ("README.md", "# Title\n\n```\nsample\n```\n"),
        ];

        let mut files: Vec<SourceFile> =
            inputs.iter().map(|(p, c)| file(p, c)).collect();
        let opts = MergeOptions {
            prompt: "p".to_string(),
            header: true,
            parse: true,
            root_name: "proj".to_string(),
        };

        let doc = build_document(&mut files, &opts);
        let extracted = extract(&doc.text).unwrap();

        assert_eq!(extracted.len(), inputs.len());
        for (extracted, (path, content)) in extracted.iter().zip(&inputs) {
            assert_eq!(extracted.path, *path);
            assert_eq!(extracted.content, *content);
        }
    }

    #[test]
    fn test_round_trip_skips_omitted() {
        let mut files = vec![
            file("a.py", "x = 1\n"),
            SourceFile::omitted("secrets.env".to_string(), 64, "64.0B".to_string()),
        ];
        let opts = MergeOptions {
            prompt: String::new(),
            header: false,
            parse: false,
            root_name: "proj".to_string(),
        };

        let doc = build_document(&mut files, &opts);
        let extracted = extract(&doc.text).unwrap();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].path, "a.py");
    }
}
