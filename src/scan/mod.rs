//! Structural Scanner
//!
//! Heuristic, per-language detection of code elements (classes, functions,
//! loops, ...) from a file's line array. Dispatch is a fixed extension table;
//! unknown extensions scan to an empty list, never an error. Scanning is
//! lexical on purpose: no AST, no symbol resolution, just enough structure
//! for a navigation map.

pub mod blocks;
pub mod languages;
pub mod nest;
pub mod types;

pub use languages::LOOP_SPAN_THRESHOLD;
pub use nest::nest;
pub use types::{CodeElement, ElementKind};

use std::path::Path;
use tracing::trace;

/// Languages with a scanning strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    Java,
    C,
    CSharp,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    Lua,
    Perl,
    Bash,
}

impl Language {
    /// Resolve the scanning strategy for a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        match ext.to_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "go" => Some(Self::Go),
            "rs" => Some(Self::Rust),
            "java" => Some(Self::Java),
            "c" | "h" | "cpp" | "hpp" | "cc" | "cxx" => Some(Self::C),
            "cs" => Some(Self::CSharp),
            "php" => Some(Self::Php),
            "rb" => Some(Self::Ruby),
            "swift" => Some(Self::Swift),
            "kt" | "kts" => Some(Self::Kotlin),
            "scala" | "sc" => Some(Self::Scala),
            "lua" => Some(Self::Lua),
            "pl" | "pm" => Some(Self::Perl),
            "sh" | "bash" | "zsh" => Some(Self::Bash),
            _ => None,
        }
    }
}

/// Scan a file's lines into a flat element list.
///
/// Returns an empty list for extensions without a strategy.
pub fn scan(path: &Path, lines: &[&str]) -> Vec<CodeElement> {
    match Language::from_path(path) {
        Some(lang) => {
            let elements = languages::scan_lines(lang, lines);
            trace!(path = %path.display(), language = ?lang, count = elements.len(), "scanned");
            elements
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_path(Path::new("a/b.py")), Some(Language::Python));
        assert_eq!(Language::from_path(Path::new("x.TSX")), Some(Language::TypeScript));
        assert_eq!(Language::from_path(Path::new("mod.rs")), Some(Language::Rust));
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_scan_unknown_extension_is_empty() {
        let lines = ["class Foo:", "    pass"];
        assert!(scan(Path::new("README.md"), &lines).is_empty());
    }

    #[test]
    fn test_scan_dispatches_by_extension() {
        let lines = ["def hello(name):", "    return name"];
        let elements = scan(Path::new("pkg/api.py"), &lines);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].label, "fn hello(name)");
    }
}
