//! Block-Termination Strategies
//!
//! Three ways to find where a scanned block ends, shared by the language
//! scanners. All take 0-indexed line offsets and return the 0-indexed last
//! line of the block.
//!
//! The brace counter does not special-case string or comment literals that
//! contain brace characters; a stray `{` inside a string shifts the depth.
//! This is a known limitation of the lexical approach and test fixtures
//! encode it.
//!
//! @module scan/blocks

use once_cell::sync::Lazy;
use regex::Regex;

/// `do`/`end`-style openers for Ruby
static RUBY_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(class|module|def|do|if|unless|case|while|until|for|begin)\b").unwrap()
});

/// Block closer shared by the keyword-pair counters
static KEYWORD_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^end\b").unwrap());

/// Block openers for Lua, matched anywhere in the line
static LUA_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(function|if|for|while|repeat)\b").unwrap());

/// Brace counting: the block ends on the line where depth returns to zero
/// after at least one `{` was seen. Falls back to the last line.
pub fn brace_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;
    let mut found_open = false;

    for (i, line) in lines.iter().enumerate().skip(start) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    found_open = true;
                }
                '}' => {
                    depth -= 1;
                    if found_open && depth == 0 {
                        return i;
                    }
                }
                _ => {}
            }
        }
    }

    lines.len().saturating_sub(1)
}

/// Indent counting: the block ends on the last line before a non-blank line
/// indented no deeper than the defining line.
pub fn indent_block_end(lines: &[&str], start: usize) -> usize {
    if start >= lines.len() {
        return start;
    }

    let base_indent = leading_whitespace(lines[start]);
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if leading_whitespace(line) <= base_indent {
            return i - 1;
        }
    }

    lines.len() - 1
}

/// Keyword-pair counting for Ruby: openers at line start bump the depth,
/// a leading `end` closes one level.
pub fn ruby_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;

    for (i, line) in lines.iter().enumerate().skip(start) {
        let trimmed = line.trim();
        if RUBY_OPENER.is_match(trimmed) {
            depth += 1;
        }
        if KEYWORD_END.is_match(trimmed) {
            depth -= 1;
            if depth == 0 {
                return i;
            }
        }
    }

    lines.len().saturating_sub(1)
}

/// Keyword-pair counting for Lua. Openers count anywhere in the line.
pub fn lua_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;

    for (i, line) in lines.iter().enumerate().skip(start) {
        let trimmed = line.trim();
        if LUA_OPENER.is_match(trimmed) {
            depth += 1;
        }
        if KEYWORD_END.is_match(trimmed) || trimmed == "end" {
            depth -= 1;
            if depth == 0 {
                return i;
            }
        }
    }

    lines.len().saturating_sub(1)
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
