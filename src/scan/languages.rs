//! Per-Language Line Scanners
//!
//! Lightweight lexical scanning over trimmed lines, one strategy per
//! language. Each scanner walks the file top to bottom and emits a flat
//! element list; the first pattern that matches a line wins. Block ends come
//! from the shared strategies in [`super::blocks`].
//!
//! These are heuristics, not parsers: brace counting is blind to braces
//! inside string and comment literals, and signature extraction stops at the
//! first closing parenthesis. Good enough for a navigation map.
//!
//! @module scan/languages

use super::blocks::{brace_block_end, indent_block_end, lua_block_end, ruby_block_end};
use super::types::{classify, CodeElement, ElementKind};
use super::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Loop elements spanning this many lines or fewer are dropped as noise.
pub const LOOP_SPAN_THRESHOLD: usize = 5;

// =============================================================================
// PYTHON PATTERNS
// =============================================================================

static PY_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^class\s+(\w+)(\(.*?\))?\s*:").unwrap());
static PY_ASYNC_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^async\s+def\s+(\w+)\s*\((.*?)\)(\s*->.*?)?\s*:").unwrap());
static PY_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^def\s+(\w+)\s*\((.*?)\)(\s*->.*?)?\s*:").unwrap());
static PY_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s+(.+):\s*$").unwrap());

// =============================================================================
// JAVASCRIPT / TYPESCRIPT PATTERNS
// =============================================================================

static JS_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(export\s+)?(default\s+)?class\s+(\w+)").unwrap());
static TS_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(export\s+)?(default\s+)?interface\s+(\w+)").unwrap());
static TS_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(export\s+)?(default\s+)?(abstract\s+)?class\s+(\w+)").unwrap());
static JS_DESCRIBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^describe\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap());
static JS_TEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(it|test)\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap());
static JS_ASYNC_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(export\s+)?(default\s+)?async\s+function\s+(\w+)\s*\((.*?)\)").unwrap()
});
static JS_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(export\s+)?(default\s+)?function\s+(\w+)\s*\((.*?)\)").unwrap()
});
static JS_ARROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(export\s+)?(const|let|var)\s+(\w+)\s*=\s*(async\s+)?\(?(.*?)\)?\s*=>").unwrap()
});
static JS_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s*\((.+)\)\s*\{?").unwrap());

// =============================================================================
// GO PATTERNS
// =============================================================================

static GO_STRUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^type\s+(\w+)\s+struct\b").unwrap());
static GO_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+(\w+)\s+interface\b").unwrap());
static GO_FUNC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^func\s+(\(.*?\)\s*)?(\w+)\s*\((.*?)\)").unwrap());
static GO_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^for\s+(.+)\s*\{").unwrap());

// =============================================================================
// RUST PATTERNS
// =============================================================================

static RS_STRUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(pub\s+)?struct\s+(\w+)").unwrap());
static RS_ENUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(pub\s+)?enum\s+(\w+)").unwrap());
static RS_TRAIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(pub\s+)?trait\s+(\w+)").unwrap());
static RS_IMPL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^impl\s+(.+?)\s*\{").unwrap());
static RS_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(pub\s+)?(async\s+)?fn\s+(\w+)\s*\((.*?)\)").unwrap());
static RS_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while|loop)\b(.*)?\{").unwrap());

// =============================================================================
// JAVA PATTERNS
// =============================================================================

static JAVA_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+)?(static\s+)?(abstract\s+)?(final\s+)?class\s+(\w+)")
        .unwrap()
});
static JAVA_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(public\s+|private\s+|protected\s+)?interface\s+(\w+)").unwrap());
static JAVA_ENUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(public\s+|private\s+|protected\s+)?enum\s+(\w+)").unwrap());
static JAVA_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+)?(static\s+)?(abstract\s+)?(final\s+)?(synchronized\s+)?(\w+\s+)?(\w+)\s*\((.*?)\)\s*(\{|throws)")
        .unwrap()
});

// =============================================================================
// C / C++ PATTERNS
// =============================================================================

static C_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^class\s+(\w+)").unwrap());
static C_STRUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(typedef\s+)?struct\s+(\w+)").unwrap());
static C_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w[\w\s*&]+?)\s+(\w+)\s*\(([^)]*)\)\s*(\{|$)").unwrap());

// =============================================================================
// C# PATTERNS
// =============================================================================

static CS_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+|internal\s+)?(static\s+)?(abstract\s+|sealed\s+)?(partial\s+)?(class|struct|interface|enum|record)\s+(\w+)")
        .unwrap()
});
static CS_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+|internal\s+)?(static\s+)?(async\s+)?(virtual\s+|override\s+|abstract\s+)?(\w[\w<>\[\],\s]*?)\s+(\w+)\s*\((.*?)\)\s*\{?")
        .unwrap()
});
static CS_LOOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(for|foreach|while)\s*\((.+)\)\s*\{?").unwrap());

// =============================================================================
// PHP PATTERNS
// =============================================================================

static PHP_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(abstract\s+)?(final\s+)?(class|interface|trait)\s+(\w+)").unwrap()
});
static PHP_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+)?(static\s+)?function\s+(\w+)\s*\((.*?)\)")
        .unwrap()
});

// =============================================================================
// RUBY PATTERNS
// =============================================================================

static RB_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^class\s+(\w+)").unwrap());
static RB_MODULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^module\s+(\w+)").unwrap());
static RB_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^def\s+(self\.)?(\w+[?!=]?)\s*(\(.*?\))?").unwrap());

// =============================================================================
// SWIFT PATTERNS
// =============================================================================

static SWIFT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|internal\s+|open\s+|fileprivate\s+)?(final\s+)?(class|struct|enum|protocol)\s+(\w+)")
        .unwrap()
});
static SWIFT_FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|internal\s+|open\s+)?(static\s+|class\s+)?(override\s+)?func\s+(\w+)\s*\((.*?)\)")
        .unwrap()
});
static SWIFT_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s+(.+)\s*\{").unwrap());

// =============================================================================
// KOTLIN PATTERNS
// =============================================================================

static KT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(open\s+|abstract\s+|data\s+|sealed\s+)?(class|interface|object)\s+(\w+)")
        .unwrap()
});
static KT_FUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(public\s+|private\s+|protected\s+|internal\s+)?(override\s+)?(suspend\s+)?fun\s+(\w+)\s*\((.*?)\)")
        .unwrap()
});
static KT_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s*\((.+)\)\s*\{?").unwrap());

// =============================================================================
// SCALA PATTERNS
// =============================================================================

static SCALA_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(case\s+)?(class|object|trait)\s+(\w+)").unwrap());
static SCALA_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(override\s+)?def\s+(\w+)\s*(\(.*?\))?").unwrap());

// =============================================================================
// LUA PATTERNS
// =============================================================================

static LUA_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(local\s+)?function\s+([\w.:]+)\s*\((.*?)\)").unwrap());
static LUA_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s+(.+)\s+do").unwrap());

// =============================================================================
// PERL PATTERNS
// =============================================================================

static PL_PACKAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^package\s+([\w:]+)").unwrap());
static PL_SUB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^sub\s+(\w+)").unwrap());

// =============================================================================
// BASH PATTERNS
// =============================================================================

static SH_FUNCTION_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^function\s+(\w+)").unwrap());
static SH_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s*\(\s*\)\s*\{?").unwrap());
static SH_LOOP_DO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s+(.+?);\s*do").unwrap());
static SH_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(for|while)\s+(.+)").unwrap());

// =============================================================================
// DISPATCH
// =============================================================================

/// Scan `lines` with the strategy for `lang`, returning a flat element list.
pub(crate) fn scan_lines(lang: Language, lines: &[&str]) -> Vec<CodeElement> {
    match lang {
        Language::Python => scan_python(lines),
        Language::JavaScript => scan_javascript(lines),
        Language::TypeScript => scan_typescript(lines),
        Language::Go => scan_go(lines),
        Language::Rust => scan_rust(lines),
        Language::Java => scan_java(lines),
        Language::C => scan_c_cpp(lines),
        Language::CSharp => scan_csharp(lines),
        Language::Php => scan_php(lines),
        Language::Ruby => scan_ruby(lines),
        Language::Swift => scan_swift(lines),
        Language::Kotlin => scan_kotlin(lines),
        Language::Scala => scan_scala(lines),
        Language::Lua => scan_lua(lines),
        Language::Perl => scan_perl(lines),
        Language::Bash => scan_bash(lines),
    }
}

/// Emit a loop element unless its span is at or below the threshold.
fn push_loop(
    elements: &mut Vec<CodeElement>,
    label: String,
    start: usize,
    end: usize,
    lines: &[&str],
) {
    if end - start + 1 > LOOP_SPAN_THRESHOLD {
        elements.push(CodeElement::spanning(
            ElementKind::Loop,
            label,
            start,
            end,
            lines,
        ));
    }
}

fn group<'t>(caps: &regex::Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map(|m| m.as_str()).unwrap_or("")
}

// =============================================================================
// LANGUAGE SCANNERS
// =============================================================================

fn scan_python(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = PY_CLASS.captures(trimmed) {
            let end = indent_block_end(lines, i);
            let label = format!("class {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = PY_ASYNC_DEF.captures(trimmed) {
            let end = indent_block_end(lines, i);
            let name = group(&caps, 1);
            let sig = format!("{}({}){}", name, group(&caps, 2), group(&caps, 3));
            let kind = classify(name, true);
            let label = format!("{} {}", kind.as_str(), sig);
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = PY_DEF.captures(trimmed) {
            let end = indent_block_end(lines, i);
            let name = group(&caps, 1);
            let sig = format!("{}({}){}", name, group(&caps, 2), group(&caps, 3));
            let kind = classify(name, false);
            let label = format!("{} {}", kind.as_str(), sig);
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = PY_LOOP.captures(trimmed) {
            let end = indent_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_javascript(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = JS_CLASS.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("class {}", group(&caps, 3));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if scan_js_common(&mut elements, lines, i, trimmed) {
            continue;
        }

        if let Some(caps) = JS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_typescript(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = TS_INTERFACE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("interface {}", group(&caps, 3));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = TS_CLASS.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("class {}", group(&caps, 4));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if scan_js_common(&mut elements, lines, i, trimmed) {
            continue;
        }

        if let Some(caps) = JS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

/// Patterns shared verbatim between the JavaScript and TypeScript scanners.
/// Returns true when the line produced (or was consumed by) a match.
fn scan_js_common(
    elements: &mut Vec<CodeElement>,
    lines: &[&str],
    i: usize,
    trimmed: &str,
) -> bool {
    if let Some(caps) = JS_DESCRIBE.captures(trimmed) {
        let end = brace_block_end(lines, i);
        let label = format!("describe {}", group(&caps, 1));
        elements.push(CodeElement::spanning(ElementKind::Describe, label, i, end, lines));
        return true;
    }

    if let Some(caps) = JS_TEST.captures(trimmed) {
        let end = brace_block_end(lines, i);
        let label = format!("test {}", group(&caps, 2));
        elements.push(CodeElement::spanning(ElementKind::Test, label, i, end, lines));
        return true;
    }

    if let Some(caps) = JS_ASYNC_FUNCTION.captures(trimmed) {
        let end = brace_block_end(lines, i);
        let name = group(&caps, 3);
        let kind = classify(name, true);
        let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 4));
        elements.push(CodeElement::spanning(kind, label, i, end, lines));
        return true;
    }

    if let Some(caps) = JS_FUNCTION.captures(trimmed) {
        let end = brace_block_end(lines, i);
        let name = group(&caps, 3);
        let kind = classify(name, false);
        let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 4));
        elements.push(CodeElement::spanning(kind, label, i, end, lines));
        return true;
    }

    if let Some(caps) = JS_ARROW.captures(trimmed) {
        if trimmed.contains('{') {
            let end = brace_block_end(lines, i);
            if end > i {
                let name = group(&caps, 3);
                let kind = classify(name, caps.get(4).is_some());
                let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 5));
                elements.push(CodeElement::spanning(kind, label, i, end, lines));
            }
            return true;
        }
    }

    false
}

fn scan_go(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = GO_STRUCT.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("struct {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = GO_INTERFACE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("interface {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = GO_FUNC.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let receiver = group(&caps, 1).trim();
            let receiver = if receiver.is_empty() {
                String::new()
            } else {
                format!("{} ", receiver)
            };
            let name = group(&caps, 2);
            let kind = classify(name, false);
            let label = format!("{} {}{}({})", kind.as_str(), receiver, name, group(&caps, 3));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = GO_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop for {}", group(&caps, 1));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_rust(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = RS_STRUCT.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("struct {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RS_ENUM.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("enum {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RS_TRAIT.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("trait {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RS_IMPL.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("impl {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Impl, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RS_FN.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 3);
            let kind = classify(name, caps.get(2).is_some());
            let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 4));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let rest = group(&caps, 2).trim();
            let label = if rest.is_empty() {
                format!("loop {}", group(&caps, 1))
            } else {
                format!("loop {} {}", group(&caps, 1), rest)
            };
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_java(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = JAVA_CLASS.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("class {}", group(&caps, 5));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = JAVA_INTERFACE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("interface {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = JAVA_ENUM.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("enum {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = JAVA_METHOD.captures(trimmed) {
            let name = group(&caps, 7);
            if !matches!(name, "if" | "for" | "while" | "switch" | "catch" | "return") {
                let end = brace_block_end(lines, i);
                // A declaration without a return type is a constructor.
                let has_return_type = !group(&caps, 6).trim().is_empty();
                let kind = if has_return_type {
                    classify(name, false)
                } else {
                    ElementKind::Ctor
                };
                let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 8));
                elements.push(CodeElement::spanning(kind, label, i, end, lines));
                continue;
            }
        }

        if let Some(caps) = JS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_c_cpp(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = C_CLASS.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("class {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = C_STRUCT.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("struct {}", group(&caps, 2));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = C_FN.captures(trimmed) {
            let name = group(&caps, 2);
            if !matches!(
                name,
                "if" | "for" | "while" | "switch" | "return" | "typedef" | "struct" | "class"
                    | "enum"
            ) {
                let end = brace_block_end(lines, i);
                let kind = classify(name, false);
                let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 3));
                elements.push(CodeElement::spanning(kind, label, i, end, lines));
                continue;
            }
        }

        if let Some(caps) = JS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_csharp(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = CS_TYPE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("{} {}", group(&caps, 5), group(&caps, 6));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = CS_METHOD.captures(trimmed) {
            let name = group(&caps, 6);
            if !matches!(
                name,
                "if" | "for" | "while" | "switch" | "catch" | "return" | "class" | "struct"
                    | "interface" | "enum"
            ) {
                let end = brace_block_end(lines, i);
                let kind = classify(name, caps.get(3).is_some());
                let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 7));
                elements.push(CodeElement::spanning(kind, label, i, end, lines));
                continue;
            }
        }

        if let Some(caps) = CS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_php(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = PHP_TYPE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("{} {}", group(&caps, 3), group(&caps, 4));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = PHP_FUNCTION.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 3);
            let kind = classify(name, false);
            let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 4));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = CS_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_ruby(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = RB_CLASS.captures(trimmed) {
            let end = ruby_block_end(lines, i);
            let label = format!("class {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RB_MODULE.captures(trimmed) {
            let end = ruby_block_end(lines, i);
            let label = format!("module {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = RB_DEF.captures(trimmed) {
            let end = ruby_block_end(lines, i);
            let name = group(&caps, 2);
            let kind = classify(name, false);
            let label = format!(
                "{} {}{}{}",
                kind.as_str(),
                group(&caps, 1),
                name,
                group(&caps, 3)
            );
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
        }
    }

    elements
}

fn scan_swift(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = SWIFT_TYPE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("{} {}", group(&caps, 3), group(&caps, 4));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = SWIFT_FUNC.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 4);
            let kind = classify(name, false);
            let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 5));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = SWIFT_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_kotlin(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = KT_TYPE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("{} {}", group(&caps, 2), group(&caps, 3));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = KT_FUN.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 4);
            let kind = classify(name, caps.get(3).is_some());
            let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 5));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = KT_LOOP.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_scala(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = SCALA_TYPE.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let label = format!(
                "{}{} {}",
                group(&caps, 1),
                group(&caps, 2),
                group(&caps, 3)
            );
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, end, lines));
            continue;
        }

        if let Some(caps) = SCALA_DEF.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 2);
            let kind = classify(name, false);
            let label = format!("{} {}{}", kind.as_str(), name, group(&caps, 3));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
        }
    }

    elements
}

fn scan_lua(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = LUA_FUNCTION.captures(trimmed) {
            let end = lua_block_end(lines, i);
            let name = group(&caps, 2);
            let kind = classify(name, false);
            let label = format!("{} {}({})", kind.as_str(), name, group(&caps, 3));
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if let Some(caps) = LUA_LOOP.captures(trimmed) {
            let end = lua_block_end(lines, i);
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

fn scan_perl(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = PL_PACKAGE.captures(trimmed) {
            // Packages have no delimited body; index the declaration line.
            let label = format!("package {}", group(&caps, 1));
            elements.push(CodeElement::spanning(ElementKind::Class, label, i, i, lines));
            continue;
        }

        if let Some(caps) = PL_SUB.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 1);
            let kind = classify(name, false);
            let label = format!("{} {}", kind.as_str(), name);
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
        }
    }

    elements
}

fn scan_bash(lines: &[&str]) -> Vec<CodeElement> {
    let mut elements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = SH_FUNCTION_KW.captures(trimmed) {
            let end = brace_block_end(lines, i);
            let name = group(&caps, 1);
            let kind = classify(name, false);
            let label = format!("{} {}", kind.as_str(), name);
            elements.push(CodeElement::spanning(kind, label, i, end, lines));
            continue;
        }

        if trimmed.contains("()") {
            if let Some(caps) = SH_FUNCTION.captures(trimmed) {
                let end = brace_block_end(lines, i);
                let name = group(&caps, 1);
                let kind = classify(name, false);
                let label = format!("{} {}", kind.as_str(), name);
                elements.push(CodeElement::spanning(kind, label, i, end, lines));
                continue;
            }
        }

        let caps = SH_LOOP_DO
            .captures(trimmed)
            .or_else(|| SH_LOOP.captures(trimmed));
        if let Some(caps) = caps {
            let mut end = i;
            for (j, later) in lines.iter().enumerate().skip(i + 1) {
                if later.trim() == "done" {
                    end = j;
                    break;
                }
            }
            let label = format!("loop {} {}", group(&caps, 1), group(&caps, 2));
            push_loop(&mut elements, label, i, end, lines);
        }
    }

    elements
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(elements: &[CodeElement]) -> Vec<ElementKind> {
        elements.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_python_class_with_ctor() {
        let lines = [
            "class Server:",
            "    def __init__(self, host, port):",
            "        self.host = host",
            "        self.port = port",
        ];
        let elements = scan_python(&lines);
        assert_eq!(elements.len(), 2);

        assert_eq!(elements[0].kind, ElementKind::Class);
        assert_eq!(elements[0].label, "class Server");
        assert_eq!(elements[0].start_line, 1);
        assert_eq!(elements[0].end_line, 4);

        assert_eq!(elements[1].kind, ElementKind::Ctor);
        assert_eq!(elements[1].label, "ctor __init__(self, host, port)");
        assert_eq!(elements[1].start_line, 2);
        assert_eq!(elements[1].end_line, 4);
    }

    #[test]
    fn test_python_return_annotation_kept_in_label() {
        let lines = ["def parse(text: str) -> int:", "    return 0"];
        let elements = scan_python(&lines);
        assert_eq!(elements[0].label, "fn parse(text: str) -> int");
    }

    #[test]
    fn test_python_short_loop_dropped() {
        let lines = ["for x in xs:", "    print(x)", "print('done')"];
        let elements = scan_python(&lines);
        assert!(elements.is_empty());
    }

    #[test]
    fn test_python_long_loop_kept() {
        let lines = [
            "for x in xs:",
            "    a(x)",
            "    b(x)",
            "    c(x)",
            "    d(x)",
            "    e(x)",
            "print('done')",
        ];
        let elements = scan_python(&lines);
        assert_eq!(kinds(&elements), vec![ElementKind::Loop]);
        assert_eq!(elements[0].label, "loop for x in xs");
        assert_eq!(elements[0].span(), 6);
    }

    #[test]
    fn test_javascript_suite_and_arrow() {
        let lines = [
            "describe('auth', () => {",
            "  it('logs in', () => {",
            "    expect(1).toBe(1);",
            "  });",
            "});",
            "const add = (a, b) => {",
            "  return a + b;",
            "};",
        ];
        let elements = scan_javascript(&lines);
        assert_eq!(
            kinds(&elements),
            vec![ElementKind::Describe, ElementKind::Test, ElementKind::Fn]
        );
        assert_eq!(elements[0].label, "describe auth");
        assert_eq!(elements[1].label, "test logs in");
        assert_eq!(elements[2].label, "fn add(a, b)");
    }

    #[test]
    fn test_javascript_single_line_arrow_skipped() {
        let lines = ["const inc = (x) => x + 1;"];
        assert!(scan_javascript(&lines).is_empty());
    }

    #[test]
    fn test_typescript_interface() {
        let lines = ["export interface Shape {", "  area(): number;", "}"];
        let elements = scan_typescript(&lines);
        assert_eq!(elements[0].kind, ElementKind::Class);
        assert_eq!(elements[0].label, "interface Shape");
    }

    #[test]
    fn test_go_receiver_and_test_func() {
        let lines = [
            "func (s *Server) Start(addr string) {",
            "}",
            "func TestStart(t *testing.T) {",
            "}",
        ];
        let elements = scan_go(&lines);
        assert_eq!(elements[0].label, "fn (s *Server) Start(addr string)");
        assert_eq!(elements[1].kind, ElementKind::Test);
    }

    #[test]
    fn test_rust_impl_and_async_fn() {
        let lines = [
            "pub struct Pool {",
            "    size: usize,",
            "}",
            "impl Pool {",
            "    pub async fn acquire(&self) -> Conn {",
            "        todo!()",
            "    }",
            "}",
        ];
        let elements = scan_rust(&lines);
        assert_eq!(
            kinds(&elements),
            vec![ElementKind::Class, ElementKind::Impl, ElementKind::Async]
        );
        assert_eq!(elements[1].label, "impl Pool");
        assert_eq!(elements[1].start_line, 4);
        assert_eq!(elements[1].end_line, 8);
    }

    #[test]
    fn test_java_ctor_by_missing_return_type() {
        let lines = [
            "public class Account {",
            "    public Account(String owner) {",
            "    }",
            "    public int balance() {",
            "        return 0;",
            "    }",
            "}",
        ];
        let elements = scan_java(&lines);
        assert_eq!(elements[0].kind, ElementKind::Class);
        assert_eq!(elements[1].kind, ElementKind::Ctor);
        assert_eq!(elements[2].kind, ElementKind::Fn);
    }

    #[test]
    fn test_ruby_initialize_is_ctor() {
        let lines = [
            "class Greeter",
            "  def initialize(name)",
            "    @name = name",
            "  end",
            "end",
        ];
        let elements = scan_ruby(&lines);
        assert_eq!(elements[0].label, "class Greeter");
        assert_eq!(elements[1].kind, ElementKind::Ctor);
        assert_eq!(elements[1].label, "ctor initialize(name)");
    }

    #[test]
    fn test_bash_function_and_loop() {
        let lines = [
            "deploy() {",
            "  echo hi",
            "}",
            "for f in *.txt; do",
            "  one",
            "  two",
            "  three",
            "  four",
            "done",
        ];
        let elements = scan_bash(&lines);
        assert_eq!(elements[0].label, "fn deploy");
        assert_eq!(elements[1].kind, ElementKind::Loop);
        assert_eq!(elements[1].end_line, 9);
    }

    #[test]
    fn test_perl_package_is_single_line() {
        let lines = ["package Foo::Bar;", "sub greet {", "}"];
        let elements = scan_perl(&lines);
        assert_eq!(elements[0].label, "package Foo::Bar");
        assert_eq!(elements[0].start_line, elements[0].end_line);
        assert_eq!(elements[1].label, "fn greet");
    }

    #[test]
    fn test_swift_init_is_ctor() {
        let lines = [
            "class Point {",
            "    init(x: Int, y: Int) {",
            "    }",
            "}",
        ];
        let elements = scan_swift(&lines);
        assert_eq!(elements[1].kind, ElementKind::Ctor);
    }

    #[test]
    fn test_kotlin_suspend_is_async() {
        let lines = ["suspend fun fetch(url: String): String {", "}"];
        let elements = scan_kotlin(&lines);
        assert_eq!(elements[0].kind, ElementKind::Async);
        assert_eq!(elements[0].label, "async fetch(url: String)");
    }
}
