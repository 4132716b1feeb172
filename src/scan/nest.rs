//! Containment Forest Builder
//!
//! Turns the scanner's flat element list into a forest where a child's line
//! span is fully contained in its parent's, siblings never overlap, and
//! children are ordered by start line.
//!
//! @module scan/nest

use super::types::CodeElement;

/// Nest a flat element list into a containment forest.
///
/// Elements are stable-sorted by start line, ties broken toward the larger
/// span so a parent starting on the same line is processed before its child.
/// A containment stack then attaches each element to the innermost enclosing
/// span still open.
pub fn nest(mut elements: Vec<CodeElement>) -> Vec<CodeElement> {
    if elements.is_empty() {
        return elements;
    }

    elements.sort_by(|a, b| {
        a.start_line
            .cmp(&b.start_line)
            .then_with(|| b.span().cmp(&a.span()))
    });

    let mut roots: Vec<CodeElement> = Vec::new();
    let mut stack: Vec<CodeElement> = Vec::new();

    for element in elements {
        while stack.last().is_some_and(|top| !top.contains(&element)) {
            if let Some(closed) = stack.pop() {
                attach(&mut stack, &mut roots, closed);
            }
        }
        stack.push(element);
    }

    while let Some(closed) = stack.pop() {
        attach(&mut stack, &mut roots, closed);
    }

    roots
}

fn attach(stack: &mut [CodeElement], roots: &mut Vec<CodeElement>, element: CodeElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::types::ElementKind;

    fn el(label: &str, start: usize, end: usize) -> CodeElement {
        CodeElement {
            kind: ElementKind::Fn,
            label: label.to_string(),
            start_line: start,
            end_line: end,
            size: 0,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_nest_empty() {
        assert!(nest(Vec::new()).is_empty());
    }

    #[test]
    fn test_nest_child_inside_parent() {
        let forest = nest(vec![el("outer", 1, 10), el("inner", 2, 5)]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].label, "outer");
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].label, "inner");
    }

    #[test]
    fn test_nest_siblings_stay_ordered() {
        let forest = nest(vec![
            el("parent", 1, 20),
            el("second", 10, 15),
            el("first", 2, 5),
        ]);
        assert_eq!(forest.len(), 1);
        let labels: Vec<_> = forest[0]
            .children
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn test_nest_same_start_prefers_larger_span_as_parent() {
        let forest = nest(vec![el("small", 3, 4), el("big", 3, 9)]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].label, "big");
        assert_eq!(forest[0].children[0].label, "small");
    }

    #[test]
    fn test_nest_deep_chain_pops_back_to_root() {
        let forest = nest(vec![
            el("a", 1, 30),
            el("b", 2, 10),
            el("c", 3, 6),
            el("d", 15, 20),
        ]);
        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].label, "b");
        assert_eq!(a.children[0].children[0].label, "c");
        assert_eq!(a.children[1].label, "d");
    }

    #[test]
    fn test_nest_two_roots() {
        let forest = nest(vec![el("one", 1, 5), el("two", 6, 9)]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].label, "one");
        assert_eq!(forest[1].label, "two");
    }

    #[test]
    fn test_nest_containment_invariant_holds() {
        let forest = nest(vec![
            el("a", 1, 100),
            el("b", 5, 50),
            el("c", 6, 10),
            el("d", 20, 40),
            el("e", 60, 90),
        ]);

        fn check(parent: &CodeElement) {
            for child in &parent.children {
                assert!(parent.contains(child));
                check(child);
            }
            for pair in parent.children.windows(2) {
                assert!(pair[0].end_line < pair[1].start_line);
            }
        }
        for root in &forest {
            check(root);
        }
    }
}
