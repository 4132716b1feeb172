//! Code-Index Tree Renderer
//!
//! Renders the `<code_index>` section: the directory tree with one line per
//! file carrying its `[OL | ML | size]` annotation, nested element lines
//! below each parsed file, and a placeholder child line for omitted bodies.
//!
//! A key property the resolver leans on: substituting different numbers into
//! the OL/ML fields changes line text but never the number of rendered
//! lines.
//!
//! @module merge/index

use super::types::{MergeOptions, SourceFile};
use crate::output::format_bytes;
use crate::scan::CodeElement;
use std::collections::BTreeMap;

/// Tree connectors (4-character cells, 4-space terminal indent)
const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const INDENT: &str = "    ";

/// One level of the directory tree, keyed by entry name in sorted order.
enum Node<'a> {
    Dir(BTreeMap<String, Node<'a>>),
    File(&'a SourceFile),
}

/// Render the code-index tree. Always ends with a newline.
pub fn render_code_index(files: &[SourceFile], opts: &MergeOptions) -> String {
    let mut root: BTreeMap<String, Node> = BTreeMap::new();

    for file in files {
        let parts: Vec<&str> = file.rel_path.split('/').collect();
        let mut level = &mut root;
        for (idx, part) in parts.iter().enumerate() {
            if idx == parts.len() - 1 {
                level.insert(part.to_string(), Node::File(file));
            } else {
                let entry = level
                    .entry(part.to_string())
                    .or_insert_with(|| Node::Dir(BTreeMap::new()));
                // A file and a directory cannot share a path on a real
                // filesystem; treat a collision as a directory anyway.
                if matches!(entry, Node::File(_)) {
                    *entry = Node::Dir(BTreeMap::new());
                }
                level = match entry {
                    Node::Dir(children) => children,
                    Node::File(_) => unreachable!(),
                };
            }
        }
    }

    let mut out = String::new();
    out.push_str(&opts.root_name);
    out.push_str("/\n");
    render_level(&root, "", opts, &mut out);
    out
}

fn render_level(level: &BTreeMap<String, Node>, prefix: &str, opts: &MergeOptions, out: &mut String) {
    let last_idx = level.len().saturating_sub(1);

    for (idx, (name, node)) in level.iter().enumerate() {
        let is_last = idx == last_idx;
        let connector = if is_last { ELBOW } else { TEE };
        let child_prefix = format!("{}{}", prefix, if is_last { INDENT } else { PIPE });

        match node {
            Node::File(file) => {
                out.push_str(&format!(
                    "{}{}{} [OL: 1-{} | ML: {}-{} | {}]\n",
                    prefix, connector, name, file.line_count, file.ml_start, file.ml_end,
                    file.formatted_size
                ));

                if file.is_omitted() {
                    out.push_str(&format!(
                        "{}(Content omitted - file size: {})\n",
                        child_prefix, file.formatted_size
                    ));
                } else if opts.parse && !file.elements.is_empty() {
                    render_elements(&file.elements, &child_prefix, file.ml_start, out);
                }
            }
            Node::Dir(children) => {
                out.push_str(&format!("{}{}{}/\n", prefix, connector, name));
                render_level(children, &child_prefix, opts, out);
            }
        }
    }
}

fn render_elements(elements: &[CodeElement], prefix: &str, ml_offset: usize, out: &mut String) {
    let last_idx = elements.len().saturating_sub(1);

    for (idx, element) in elements.iter().enumerate() {
        let is_last = idx == last_idx;
        let connector = if is_last { ELBOW } else { TEE };
        let child_prefix = format!("{}{}", prefix, if is_last { INDENT } else { PIPE });

        let ml_start = ml_offset + element.start_line - 1;
        let ml_end = ml_offset + element.end_line - 1;
        out.push_str(&format!(
            "{}{}{} [OL: {}-{} | ML: {}-{} | {}]\n",
            prefix, connector, element.label, element.start_line, element.end_line, ml_start,
            ml_end,
            format_bytes(element.size)
        ));

        if !element.children.is_empty() {
            render_elements(&element.children, &child_prefix, ml_offset, out);
        }
    }
}
