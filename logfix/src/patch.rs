//! Patches: old call expression to new call expression
//!
//! Every strategy returns a single patch whose span is exactly the original
//! call. Text inside the call that is not rewritten is copied unchanged, so
//! patches on disjoint calls compose without knowing about each other.

use logfix_parser::{parse_expression, CstNode, ParseResult, Span};
use serde::Serialize;
use tracing::warn;

/// Replacement of one call expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub span: Span,
    pub original: String,
    pub replacement: String,
}

impl Patch {
    pub fn new(span: Span, original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            original: original.into(),
            replacement: replacement.into(),
        }
    }

    /// Parse the replacement text as an expression
    pub fn replacement_node(&self) -> ParseResult<CstNode> {
        parse_expression(&self.replacement)
    }

    pub fn overlaps(&self, other: &Patch) -> bool {
        self.span.overlaps(&other.span)
    }
}

/// Insertion or replacement inside a call, in absolute offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self::new(span.start, span.end, text)
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }
}

/// Apply `edits` to the text of `span`, returning the rewritten text.
///
/// Edits must lie within `span` and must not overlap; an insertion and a
/// replacement starting at the same offset apply insertion first.
pub(crate) fn splice(source: &str, span: Span, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|e| (e.start, e.end));

    let mut out = String::with_capacity(span.len() + edits.iter().map(|e| e.text.len()).sum::<usize>());
    let mut cursor = span.start;
    for edit in edits {
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..span.end]);
    out
}

/// Result of applying a batch of patches to one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchOutcome {
    pub text: String,
    pub applied: Vec<Patch>,
    pub skipped: Vec<Patch>,
}

/// Apply non-overlapping patches to `source`.
///
/// Patches are accepted in the given order; one overlapping an already
/// accepted patch is skipped. Accepted patches are spliced in source order.
pub fn apply_patches(source: &str, patches: Vec<Patch>) -> PatchOutcome {
    let mut applied: Vec<Patch> = Vec::new();
    let mut skipped = Vec::new();

    for patch in patches {
        match applied.iter().find(|accepted| accepted.overlaps(&patch)) {
            Some(accepted) => {
                warn!(
                    line = patch.span.start_line,
                    column = patch.span.start_column,
                    kept_line = accepted.span.start_line,
                    "dropping patch that overlaps an earlier fix"
                );
                skipped.push(patch);
            }
            None => applied.push(patch),
        }
    }
    applied.sort_by_key(|p| p.span.start);

    let mut text = String::with_capacity(source.len());
    let mut cursor = 0;
    for patch in &applied {
        text.push_str(&source[cursor..patch.span.start]);
        text.push_str(&patch.replacement);
        cursor = patch.span.end;
    }
    text.push_str(&source[cursor..]);

    PatchOutcome {
        text,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfix_parser::SourceMap;

    fn patch(source: &str, original: &str, replacement: &str) -> Patch {
        let start = source.find(original).unwrap();
        let span = SourceMap::new(source).span(start, start + original.len());
        Patch::new(span, original, replacement)
    }

    #[test]
    fn test_splice_orders_edits() {
        let source = "log(a, b)";
        let span = SourceMap::new(source).span(0, source.len());
        let edits = vec![
            TextEdit::insert(8, ", c"),
            TextEdit::replace(SourceMap::new(source).span(4, 5), "\"A\""),
            TextEdit::insert(4, "ex, "),
        ];

        assert_eq!(splice(source, span, edits), "log(ex, \"A\", b, c)");
    }

    #[test]
    fn test_splice_within_sub_span() {
        let source = "x; log(a); y;";
        let span = SourceMap::new(source).span(3, 9);
        assert_eq!(
            splice(source, span, vec![TextEdit::insert(8, ", b")]),
            "log(a, b)"
        );
    }

    #[test]
    fn test_apply_disjoint_patches() {
        let source = "f(a); g(b);";
        let patches = vec![patch(source, "g(b)", "g(B)"), patch(source, "f(a)", "f(A)")];

        let outcome = apply_patches(source, patches);
        assert_eq!(outcome.text, "f(A); g(B);");
        assert_eq!(outcome.applied.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_overlapping_patch_is_skipped() {
        let source = "f(a);";
        let patches = vec![patch(source, "f(a)", "f(A)"), patch(source, "f(a)", "f(x)")];

        let outcome = apply_patches(source, patches);
        assert_eq!(outcome.text, "f(A);");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].replacement, "f(x)");
    }

    #[test]
    fn test_replacement_node() {
        let source = "f(a)";
        let p = patch(source, "f(a)", "f(\"{A}\", a)");
        assert!(p.replacement_node().is_ok());

        let broken = patch(source, "f(a)", "f(\"{A}\", a");
        assert!(broken.replacement_node().is_err());
    }
}
