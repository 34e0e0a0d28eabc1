//! Placeholder casing

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::document::CallSite;
use crate::normalizer::normalize;
use crate::patch::{Patch, TextEdit};
use crate::rules::RuleId;

use super::{decline, finish, is_escaped, template_literal, RewriteContext};

const RULE: RuleId = RuleId::PlaceholderCasing;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid placeholder pattern"));

/// Rewrite every placeholder name in the template to PascalCase.
///
/// Alignment and format clauses (`,5`, `:D2`) are kept as written.
pub fn normalize_casing<'a>(ctx: &RewriteContext<'a>, site: &CallSite<'a>) -> Option<Patch> {
    let Some((_, template)) = template_literal(site) else {
        return decline(RULE, site, "no string literal template");
    };

    let text = template.text_from_source(ctx.source);
    let mut edits = Vec::new();

    for captures in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if is_escaped(text, whole.start()) {
            continue;
        }

        let inner_text = inner.as_str();
        let name_len = inner_text.find([',', ':']).unwrap_or(inner_text.len());
        let name = &inner_text[..name_len];
        match normalize(name) {
            Ok(normalized) if normalized != name.trim() => {
                let start = template.span.start + inner.start();
                edits.push(TextEdit::new(start, start + name_len, normalized));
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "keeping placeholder unchanged"),
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
    fn test_pascal_case_every_placeholder() {
        assert_eq!(
            fix("_logger.LogInformation(\"Value: {ex} {typeAssemblyEntryPointName} {exGetTypeGetPropertiesGetHashCode} {type}\", ex, a, b, type);").as_deref(),
            Some("_logger.LogInformation(\"Value: {Ex} {TypeAssemblyEntryPointName} {ExGetTypeGetPropertiesGetHashCode} {Type}\", ex, a, b, type)")
        );
    }

    #[test]
    fn test_format_clauses_kept() {
        assert_eq!(
            fix("_logger.LogInformation(\"{elapsed,8:F2} {_user.name}\", elapsed, user);").as_deref(),
            Some("_logger.LogInformation(\"{Elapsed,8:F2} {UserName}\", elapsed, user)")
        );
    }

    #[test]
    fn test_escaped_braces_untouched() {
        assert_eq!(
            fix("_logger.LogInformation(\"{{json}} {value}\", value);").as_deref(),
            Some("_logger.LogInformation(\"{{json}} {Value}\", value)")
        );
    }

    #[test]
    fn test_already_pascal_case_declines() {
        assert_eq!(fix("_logger.LogInformation(\"{Value} {0}\", value, other);"), None);
        assert_eq!(fix("_logger.LogInformation(\"{ }\", value);"), None);
    }
}
