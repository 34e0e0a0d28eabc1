//! Rewrite strategies, one per rule
//!
//! Each strategy inspects one located call site and either produces a
//! [`Patch`] for the whole call or declines. Declining is not an error:
//! the call is left exactly as written and the reason is logged at debug
//! level.

mod casing;
mod interpolation;
mod positional;

pub use casing::normalize_casing;
pub use interpolation::structured_from_interpolation;
pub use positional::named_from_positional;

use logfix_parser::{CstNode, NodeKind};
use tracing::debug;

use crate::config::FixOptions;
use crate::document::{argument_value, CallSite};
use crate::fragment::FragmentClassifier;
use crate::hoist::ErrorHoister;
use crate::patch::{splice, Patch, TextEdit};
use crate::rules::RuleId;
use crate::types::TypeOracle;

/// Everything a strategy needs besides the call site itself
#[derive(Clone, Copy)]
pub struct RewriteContext<'a> {
    pub source: &'a str,
    pub options: &'a FixOptions,
    pub oracle: &'a dyn TypeOracle,
}

impl std::fmt::Debug for RewriteContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteContext")
            .field("options", self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> RewriteContext<'a> {
    pub fn new(source: &'a str, options: &'a FixOptions, oracle: &'a dyn TypeOracle) -> Self {
        Self {
            source,
            options,
            oracle,
        }
    }

    pub fn classifier(&self) -> FragmentClassifier<'a> {
        FragmentClassifier::new(self.source, self.options, self.oracle)
    }

    pub fn hoister(&self) -> ErrorHoister<'a> {
        ErrorHoister::new(self.source, self.oracle, &self.options.error_base_type)
    }
}

/// Run the strategy for `rule` on `site`
pub fn rewrite<'a>(rule: RuleId, ctx: &RewriteContext<'a>, site: &CallSite<'a>) -> Option<Patch> {
    match rule {
        RuleId::PlaceholderCasing => normalize_casing(ctx, site),
        RuleId::NumericPlaceholder => named_from_positional(ctx, site),
        RuleId::StructuredTemplate => structured_from_interpolation(ctx, site),
    }
}

/// Splice `edits` into the call and wrap the result as a patch.
///
/// A rewrite that leaves the call text unchanged is declined.
fn finish(
    ctx: &RewriteContext<'_>,
    site: &CallSite<'_>,
    edits: Vec<TextEdit>,
    rule: RuleId,
) -> Option<Patch> {
    let span = site.invocation.span;
    let original = site.text(ctx.source);
    let replacement = splice(ctx.source, span, edits);
    if replacement == original {
        debug!(rule = %rule, line = span.start_line, "rewrite leaves call unchanged");
        return None;
    }
    Some(Patch::new(span, original, replacement))
}

/// The string literal argument holding the message template.
///
/// Prefers the argument the diagnostic points into; otherwise the first
/// plain string literal argument.
fn template_literal<'a>(site: &CallSite<'a>) -> Option<(usize, &'a CstNode)> {
    let is_literal = |node: &CstNode| node.kind == NodeKind::StringLiteral;
    match site.argument_index {
        Some(index) => site
            .argument_value(index)
            .filter(|value| is_literal(value))
            .map(|value| (index, value)),
        None => site
            .arguments()
            .iter()
            .map(argument_value)
            .enumerate()
            .find(|(_, value)| is_literal(value)),
    }
}

/// True when the `{` at `at` is escaped by an odd run of `{` before it
fn is_escaped(text: &str, at: usize) -> bool {
    let run = text[..at].bytes().rev().take_while(|&b| b == b'{').count();
    run % 2 == 1
}

/// Log and decline
fn decline(rule: RuleId, site: &CallSite<'_>, reason: &'static str) -> Option<Patch> {
    debug!(
        rule = %rule,
        line = site.invocation.span.start_line,
        column = site.invocation.span.start_column,
        reason,
        "declining fix"
    );
    None
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_is_escaped() {
        let text = "{{Name}} {Value} {{{Count}}}";
        assert!(is_escaped(text, 1));
        assert!(!is_escaped(text, 9));
        assert!(!is_escaped(text, 19));
    }

    #[test]
    fn test_template_literal_prefers_diagnosed_argument() {
        let source = r#"_logger.LogError(ex, "first {a}", "second {b}");"#;
        let document = Document::parse(source);

        let site = document.enclosing_invocation(source.find("second").unwrap()).unwrap();
        let (index, _) = template_literal(&site).unwrap();
        assert_eq!(index, 2);

        let site = document.enclosing_invocation(source.find("LogError").unwrap()).unwrap();
        let (index, value) = template_literal(&site).unwrap();
        assert_eq!(index, 1);
        assert_eq!(value.text_from_source(source), r#""first {a}""#);

        let site = document.enclosing_invocation(source.find("ex,").unwrap()).unwrap();
        assert!(template_literal(&site).is_none());
    }
}
