//! Code Element Data Structures
//!
//! A code element is a structural unit (class, function, loop, ...) detected
//! by the lightweight lexical scanner. Line numbers are 1-indexed and
//! inclusive, in the coordinates of the original file.
//!
//! @module scan/types

// =============================================================================
// ELEMENT KIND
// =============================================================================

/// Classification of scanned code elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Container declaration (class, struct, interface, enum, trait, ...)
    Class,
    /// Plain function or method
    Fn,
    /// Function declared async/suspend
    Async,
    /// Constructor-like function
    Ctor,
    /// Loop construct spanning enough lines to matter
    Loop,
    /// Rust impl block
    Impl,
    /// Test function
    Test,
    /// Test-framework suite call
    Describe,
}

impl ElementKind {
    /// Short label used in element labels and the code index
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Fn => "fn",
            Self::Async => "async",
            Self::Ctor => "ctor",
            Self::Loop => "loop",
            Self::Impl => "impl",
            Self::Test => "test",
            Self::Describe => "describe",
        }
    }
}

/// Names that mark a function as a constructor, across languages
const CTOR_NAMES: &[&str] = &["__init__", "constructor", "initialize", "__construct", "init"];

/// Classify a function-like element from its name and async modifier.
///
/// Precedence: constructor name > test prefix > async modifier > plain fn.
pub fn classify(name: &str, is_async: bool) -> ElementKind {
    if CTOR_NAMES.contains(&name) {
        ElementKind::Ctor
    } else if name.starts_with("test") || name.starts_with("Test") {
        ElementKind::Test
    } else if is_async {
        ElementKind::Async
    } else {
        ElementKind::Fn
    }
}

// =============================================================================
// CODE ELEMENT
// =============================================================================

/// A scanned code element with its original-line span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeElement {
    /// Element kind
    pub kind: ElementKind,
    /// Display label, e.g. `class Server` or `ctor __init__(self, host)`
    pub label: String,
    /// First line of the element (1-indexed, inclusive)
    pub start_line: usize,
    /// Last line of the element (1-indexed, inclusive)
    pub end_line: usize,
    /// UTF-8 byte size of the spanned lines, one newline byte per line
    pub size: u64,
    /// Nested elements, ordered by start line
    pub children: Vec<CodeElement>,
}

impl CodeElement {
    /// Build an element spanning `lines[start..=end]` (0-indexed bounds).
    pub fn spanning(
        kind: ElementKind,
        label: String,
        start: usize,
        end: usize,
        lines: &[&str],
    ) -> Self {
        Self {
            kind,
            label,
            start_line: start + 1,
            end_line: end + 1,
            size: byte_size_of(lines, start, end),
            children: Vec::new(),
        }
    }

    /// Number of lines the element spans
    pub fn span(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Whether `other`'s span is fully contained in this element's span
    pub fn contains(&self, other: &CodeElement) -> bool {
        other.start_line >= self.start_line && other.end_line <= self.end_line
    }
}

/// UTF-8 byte size of `lines[start..=end]`, counting one newline byte per line
pub fn byte_size_of(lines: &[&str], start: usize, end: usize) -> u64 {
    let stop = (end + 1).min(lines.len());
    lines[start..stop]
        .iter()
        .map(|line| line.len() as u64 + 1)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify("__init__", true), ElementKind::Ctor);
        assert_eq!(classify("constructor", false), ElementKind::Ctor);
        assert_eq!(classify("test_roundtrip", false), ElementKind::Test);
        assert_eq!(classify("TestServer", false), ElementKind::Test);
        assert_eq!(classify("fetch_data", true), ElementKind::Async);
        assert_eq!(classify("fetch_data", false), ElementKind::Fn);
    }

    #[test]
    fn test_byte_size_counts_newlines() {
        let lines = ["ab", "c", ""];
        assert_eq!(byte_size_of(&lines, 0, 2), 3 + 2 + 1);
        // end clamped to the slice
        assert_eq!(byte_size_of(&lines, 1, 10), 2 + 1);
    }

    #[test]
    fn test_spanning_is_one_indexed() {
        let lines = ["class A:", "    pass"];
        let el = CodeElement::spanning(ElementKind::Class, "class A".into(), 0, 1, &lines);
        assert_eq!(el.start_line, 1);
        assert_eq!(el.end_line, 2);
        assert_eq!(el.size, 9 + 9);
    }
}
