//! Numbered placeholders to named placeholders

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{argument_value, CallSite};
use crate::fragment::Resolution;
use crate::patch::{Patch, TextEdit};
use crate::rules::RuleId;

use super::{decline, finish, is_escaped, template_literal, RewriteContext};

const RULE: RuleId = RuleId::NumericPlaceholder;

static NUMERIC_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\d ]+\}").expect("valid numeric placeholder pattern"));

/// Rename `{0}`-style markers after the arguments they bind to.
///
/// Markers are paired with the arguments following the template in the
/// order they appear in the text. The argument list itself is unchanged.
/// Markers without an argument, or whose argument yields no name, stay
/// as written.
pub fn named_from_positional<'a>(ctx: &RewriteContext<'a>, site: &CallSite<'a>) -> Option<Patch> {
    let Some((template_index, template)) = template_literal(site) else {
        return decline(RULE, site, "no string literal template");
    };

    let mut trailing = site.arguments()[template_index + 1..].iter().map(argument_value);
    let classifier = ctx.classifier();
    let text = template.text_from_source(ctx.source);
    let mut edits = Vec::new();

    for marker in NUMERIC_PLACEHOLDER.find_iter(text) {
        if is_escaped(text, marker.start()) {
            continue;
        }
        let Some(argument) = trailing.next() else {
            break;
        };
        if let Resolution::Placeholder { name } = classifier.resolve_positional(argument).resolution
        {
            let start = template.span.start + marker.start();
            edits.push(TextEdit::new(start, start + marker.len(), format!("{{{}}}", name)));
        }
    }

    finish(ctx, site, edits, RULE)
}

#[cfg(test)]
mod tests {
    use super::super::testing::rewrite_at;
    use super::*;
    use pretty_assertions::assert_eq;

    fn fix(source: &str) -> Option<String> {
        rewrite_at(RULE, source, "\"")
    }

    #[test]
    fn test_conditional_member_chain() {
        assert_eq!(
            fix("_logger.LogInformation(\"\\r\\nValue: {1}\", type?.Name);").as_deref(),
            Some("_logger.LogInformation(\"\\r\\nValue: {TypeName}\", type?.Name)")
        );
        assert_eq!(
            fix("_logger.LogInformation(\"Value: {1}\", type?.Assembly?.EntryPoint?.Name);")
                .as_deref(),
            Some(
                "_logger.LogInformation(\"Value: {TypeAssemblyEntryPointName}\", type?.Assembly?.EntryPoint?.Name)"
            )
        );
    }

    #[test]
    fn test_markers_bind_in_text_order() {
        assert_eq!(
            fix("_logger.LogInformation(\"Value: {1}\\r\\n{2}\", type?.Name, type);").as_deref(),
            Some("_logger.LogInformation(\"Value: {TypeName}\\r\\n{Type}\", type?.Name, type)")
        );
    }

    #[test]
    fn test_mixed_arguments() {
        assert_eq!(
            fix("_logger.LogInformation(\"Value: {1} {2} {3} {4}\", nameof(ex), type.Assembly?.EntryPoint.Name, ex.GetType().GetProperties()?.GetHashCode(), type);").as_deref(),
            Some("_logger.LogInformation(\"Value: {Ex} {TypeAssemblyEntryPointName} {ExGetTypeGetPropertiesGetHashCode} {Type}\", nameof(ex), type.Assembly?.EntryPoint.Name, ex.GetType().GetProperties()?.GetHashCode(), type)")
        );
    }

    #[test]
    fn test_error_argument_before_template() {
        assert_eq!(
            fix("_logger.LogError(ex, \"Failed {0}\", ex?.GetType());").as_deref(),
            Some("_logger.LogError(ex, \"Failed {ExGetType}\", ex?.GetType())")
        );
    }

    #[test]
    fn test_literal_argument_named_after_type() {
        assert_eq!(
            fix("_logger.LogInformation(\"Count: {0}\", 42);").as_deref(),
            Some("_logger.LogInformation(\"Count: {Int32}\", 42)")
        );
    }

    #[test]
    fn test_extra_markers_stay() {
        assert_eq!(
            fix("_logger.LogInformation(\"{0} {1}\", name);").as_deref(),
            Some("_logger.LogInformation(\"{Name} {1}\", name)")
        );
    }

    #[test]
    fn test_escaped_marker_is_not_a_placeholder() {
        assert_eq!(
            fix("_logger.LogInformation(\"{{0}} {0}\", name);").as_deref(),
            Some("_logger.LogInformation(\"{{0}} {Name}\", name)")
        );
    }

    #[test]
    fn test_declines() {
        assert_eq!(fix("_logger.LogInformation(\"{0}\", a + b);"), None);
        assert_eq!(fix("_logger.LogInformation(\"Nothing here\", name);"), None);
        assert_eq!(rewrite_at(RULE, "_logger.LogInformation(message, name);", "Log"), None);
    }
}
