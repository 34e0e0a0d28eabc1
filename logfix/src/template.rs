//! Template assembly
//!
//! Joins literal text and resolved fragments back into a message template.
//! Literal text is copied byte for byte. Whether the result stays an
//! interpolated string is decided once, after every fragment is known:
//! if any fragment was retained the template keeps its `$` prefix and
//! generated placeholders are written with doubled braces, otherwise it
//! collapses into a plain string with single-brace placeholders.

use logfix_parser::CstNode;

use crate::fragment::{Resolution, ResolvedFragment};

/// A resolved hole together with what is needed to write it back
#[derive(Debug, Clone)]
pub struct FragmentSlot<'a> {
    pub resolved: ResolvedFragment<'a>,
    /// Source text of the whole hole, braces included
    pub original: &'a str,
    /// Alignment and format clauses carried into the placeholder, e.g. `,5:D2`
    pub suffix: String,
}

#[derive(Debug, Clone)]
pub enum TemplatePiece<'a> {
    Literal(&'a str),
    Fragment(FragmentSlot<'a>),
}

/// Ordered template pieces of one interpolated string
#[derive(Debug, Clone)]
pub struct TemplateSpec<'a> {
    /// Opening prefix as written: `$"`, `$@"` or `@$"`
    opener: &'a str,
    pieces: Vec<TemplatePiece<'a>>,
    still_dynamic: bool,
}

impl<'a> TemplateSpec<'a> {
    pub fn new(opener: &'a str) -> Self {
        Self {
            opener,
            pieces: Vec::new(),
            still_dynamic: false,
        }
    }

    pub fn push_literal(&mut self, text: &'a str) {
        self.pieces.push(TemplatePiece::Literal(text));
    }

    pub fn push_fragment(&mut self, slot: FragmentSlot<'a>) {
        if slot.resolved.is_retained() {
            self.still_dynamic = true;
        }
        self.pieces.push(TemplatePiece::Fragment(slot));
    }

    /// True when at least one hole must stay interpolated
    pub fn still_dynamic(&self) -> bool {
        self.still_dynamic
    }

    pub fn is_verbatim(&self) -> bool {
        self.opener.contains('@')
    }

    pub fn pieces(&self) -> &[TemplatePiece<'a>] {
        &self.pieces
    }
}

/// Final template text and the values it references
#[derive(Debug, Clone)]
pub struct AssembledTemplate<'a> {
    /// Complete string literal, quotes and prefix included
    pub text: String,
    /// New arguments in placeholder order
    pub arguments: Vec<&'a CstNode>,
    /// Error candidates in left-to-right fragment order
    pub error_candidates: Vec<&'a CstNode>,
    /// Whether the template is still an interpolated string
    pub dynamic: bool,
}

/// Assemble `spec` into template text plus its argument list
pub fn assemble<'a>(spec: &TemplateSpec<'a>) -> AssembledTemplate<'a> {
    let dynamic = spec.still_dynamic;
    let mut text = String::new();
    if dynamic {
        text.push_str(spec.opener);
    } else if spec.is_verbatim() {
        text.push_str("@\"");
    } else {
        text.push('"');
    }

    let mut arguments = Vec::new();
    let mut error_candidates = Vec::new();

    for piece in &spec.pieces {
        match piece {
            TemplatePiece::Literal(literal) => text.push_str(literal),
            TemplatePiece::Fragment(slot) => {
                match &slot.resolved.resolution {
                    Resolution::Placeholder { name } => {
                        let (open, close) = if dynamic { ("{{", "}}") } else { ("{", "}") };
                        text.push_str(open);
                        text.push_str(name);
                        text.push_str(&slot.suffix);
                        text.push_str(close);
                    }
                    Resolution::Inline { text: inline } => text.push_str(inline),
                    Resolution::Retained => text.push_str(slot.original),
                }
                arguments.extend(slot.resolved.new_arguments.iter().copied());
                error_candidates.extend(slot.resolved.error_candidate);
            }
        }
    }
    text.push('"');

    AssembledTemplate {
        text,
        arguments,
        error_candidates,
        dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(resolved: ResolvedFragment<'static>, original: &'static str) -> FragmentSlot<'static> {
        FragmentSlot {
            resolved,
            original,
            suffix: String::new(),
        }
    }

    fn named(name: &str) -> ResolvedFragment<'static> {
        ResolvedFragment::placeholder(name.to_string(), Vec::new(), None)
    }

    #[test]
    fn test_collapses_without_retained_holes() {
        let mut spec = TemplateSpec::new("$\"");
        spec.push_literal("Value: ");
        spec.push_fragment(slot(named("TypeName"), "{type.Name}"));
        spec.push_literal("\\r\\n");

        let assembled = assemble(&spec);
        assert!(!assembled.dynamic);
        assert_eq!(assembled.text, "\"Value: {TypeName}\\r\\n\"");
    }

    #[test]
    fn test_retained_hole_keeps_interpolation() {
        let mut spec = TemplateSpec::new("$\"");
        spec.push_literal("Value: ");
        spec.push_fragment(slot(ResolvedFragment::retained(), "{nameof(Exception)}"));
        spec.push_literal(" - ");
        spec.push_fragment(slot(named("Logger"), "{_logger}"));
        spec.push_literal(" ");
        spec.push_fragment(slot(ResolvedFragment::inline("1"), "{1}"));

        let assembled = assemble(&spec);
        assert!(assembled.dynamic);
        assert_eq!(
            assembled.text,
            "$\"Value: {nameof(Exception)} - {{Logger}} 1\""
        );
    }

    #[test]
    fn test_suffix_is_carried() {
        let mut spec = TemplateSpec::new("$\"");
        spec.push_fragment(FragmentSlot {
            resolved: named("Elapsed"),
            original: "{elapsed,8:F2}",
            suffix: ",8:F2".to_string(),
        });

        assert_eq!(assemble(&spec).text, "\"{Elapsed,8:F2}\"");
    }

    #[test]
    fn test_verbatim_prefixes() {
        let mut spec = TemplateSpec::new("@$\"");
        spec.push_literal("C:\\logs\\");
        spec.push_fragment(slot(named("Name"), "{name}"));
        assert_eq!(assemble(&spec).text, "@\"C:\\logs\\{Name}\"");

        spec.push_fragment(slot(ResolvedFragment::retained(), "{a + b}"));
        assert_eq!(assemble(&spec).text, "@$\"C:\\logs\\{{Name}}{a + b}\"");
    }

    #[test]
    fn test_empty_template_collapses() {
        let spec = TemplateSpec::new("$\"");
        let assembled = assemble(&spec);
        assert_eq!(assembled.text, "\"\"");
        assert!(assembled.arguments.is_empty());
    }
}
