//! Line-Offset Resolver
//!
//! Assigns every file its merged-line (ML) span. Circular dependency: the
//! code index embeds ML values, the MLs depend on how many lines the index
//! occupies. Resolved as an iterative fixed point: render the index from
//! provisional spans, measure it, recompute spans from the true header size,
//! re-render, and stop once the rendered index stops changing. The loop is
//! capped rather than hard-coded at two passes so a format change that makes
//! the index line count content-sensitive still converges.
//!
//! @module merge/resolver

use super::index::render_code_index;
use super::types::{MergeOptions, SourceFile};
use tracing::debug;

/// Upper bound on recompute/re-render passes.
pub const MAX_RESOLVE_PASSES: usize = 3;

/// Per-file framing inside the merged-code body: header line + opening
/// fence before the content, closing fence + blank separator after.
const FRAME_BEFORE: usize = 2;
const FRAME_AFTER: usize = 2;

/// Resolve ML spans for every file and return the final code-index text.
///
/// `mlEnd - mlStart == olEnd - olStart` holds for every preserved file;
/// omitted files get the single placeholder line.
pub fn resolve(files: &mut [SourceFile], opts: &MergeOptions) -> String {
    assign_spans(files, 1);
    let mut index = render_code_index(files, opts);

    for pass in 1..=MAX_RESOLVE_PASSES {
        let header_lines = header_line_count(&index, opts);
        assign_spans(files, header_lines + 1);
        let rendered = render_code_index(files, opts);
        let stable = rendered == index;
        debug!(pass, header_lines, stable, "resolver pass");
        index = rendered;
        if stable {
            break;
        }
    }

    index
}

/// Walk the file list once, assigning ML spans from a running line cursor.
/// `first_line` is the document line the first file's header occupies.
fn assign_spans(files: &mut [SourceFile], first_line: usize) {
    let mut cursor = first_line;

    for file in files {
        file.ml_start = cursor + FRAME_BEFORE;
        if file.is_omitted() {
            file.ml_end = file.ml_start;
            cursor += FRAME_BEFORE + 1 + FRAME_AFTER;
        } else {
            file.ml_end = file.ml_start + file.line_count - 1;
            cursor += FRAME_BEFORE + file.line_count + FRAME_AFTER;
        }
    }
}

/// Number of document lines before the first file header.
fn header_line_count(index: &str, opts: &MergeOptions) -> usize {
    if !opts.header {
        return 1; // <merged_code>
    }

    let prompt_lines = opts.prompt.matches('\n').count() + 1 + 1; // text + blank
    let index_lines = line_count(index);
    // prompt block, <code_index>, index body, </code_index>, blank, <merged_code>
    prompt_lines + 1 + index_lines + 1 + 1 + 1
}

pub(crate) fn line_count(text: &str) -> usize {
    let newlines = text.matches('\n').count();
    if text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}
