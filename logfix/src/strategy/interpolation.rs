//! Interpolated message to structured template

use logfix_parser::{CstNode, NodeKind};

use crate::document::{argument_value, CallSite};
use crate::fragment::FragmentClassifier;
use crate::patch::{Patch, TextEdit};
use crate::rules::RuleId;
use crate::template::{assemble, FragmentSlot, TemplateSpec};

use super::{decline, finish, RewriteContext};

const RULE: RuleId = RuleId::StructuredTemplate;

/// Rewrite every interpolated-string argument of the call into a message
/// template, appending the values it referenced to the argument list.
///
/// Only calls whose leading arguments are all plain identifiers or
/// interpolated strings are touched. An error value found in the first
/// argument's holes is inserted as the new first argument.
pub fn structured_from_interpolation<'a>(
    ctx: &RewriteContext<'a>,
    site: &CallSite<'a>,
) -> Option<Patch> {
    let arguments = site.arguments();
    let Some(last) = arguments.last() else {
        return decline(RULE, site, "call has no arguments");
    };

    let leading_ok = arguments
        .iter()
        .take(ctx.options.max_checked_arguments)
        .map(argument_value)
        .all(|arg| matches!(arg.kind, NodeKind::Identifier | NodeKind::InterpolatedString));
    if !leading_ok {
        return decline(RULE, site, "leading arguments are not identifiers or interpolations");
    }

    let classifier = ctx.classifier();
    let mut edits = Vec::new();
    let mut appended: Vec<&'a CstNode> = Vec::new();

    for (index, argument) in arguments.iter().enumerate() {
        let value = argument_value(argument);
        if value.kind != NodeKind::InterpolatedString {
            continue;
        }

        let spec = decompose(ctx, &classifier, value);
        let assembled = assemble(&spec);
        edits.push(TextEdit::replace(value.span, assembled.text));

        if index == 0 {
            if let Some(error) = ctx.hoister().find(&assembled.error_candidates) {
                let hoisted = format!("{}, ", error.text_from_source(ctx.source));
                edits.push(TextEdit::insert(argument.span.start, hoisted));
            }
        }
        appended.extend(assembled.arguments);
    }

    if !appended.is_empty() {
        let tail: String = appended
            .iter()
            .map(|arg| format!(", {}", arg.text_from_source(ctx.source)))
            .collect();
        edits.push(TextEdit::insert(last.span.end, tail));
    }

    finish(ctx, site, edits, RULE)
}

/// Split an interpolated string into literal runs and resolved holes
fn decompose<'a>(
    ctx: &RewriteContext<'a>,
    classifier: &FragmentClassifier<'a>,
    string: &'a CstNode,
) -> TemplateSpec<'a> {
    let opener = string.text_str().unwrap_or("$\"");
    let mut spec = TemplateSpec::new(opener);
    let verbatim = spec.is_verbatim();

    for part in &string.children {
        match part.kind {
            NodeKind::InterpolatedText => spec.push_literal(part.text_from_source(ctx.source)),
            NodeKind::Interpolation => {
                let Some(expression) = part.child_by_field("expression") else {
                    continue;
                };
                let suffix = ["alignment", "format"]
                    .into_iter()
                    .filter_map(|field| part.child_by_field(field))
                    .map(|clause| clause.text_from_source(ctx.source))
                    .collect();
                spec.push_fragment(FragmentSlot {
                    resolved: classifier.resolve_hole(expression, verbatim),
                    original: part.text_from_source(ctx.source),
                    suffix,
                });
            }
            _ => {}
        }
    }
    spec
}
