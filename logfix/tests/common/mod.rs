//! Shared fixtures for the code-fix scenarios
//!
//! Each scenario is a method body wrapped in a small logging class. The
//! diagnostic location is marked inline as `{|#0:...|}`.

#![allow(dead_code)]

use logfix::{Diagnostic, Document, FixAllOutcome, LoggingFixProvider, RuleId};

pub const PREFIX: &str = "
using System;
using Microsoft.Extensions.Logging;
using Microsoft.Extensions.Logging.Abstractions;

namespace TestNamespace;
class TestClass
{
    private ILogger _logger = NullLogger.Instance;

    public TestClass()
    {
";

pub const POSTFIX: &str = "
    }
}";

/// Wrap a method body in the test class
pub fn wrap(body: &str) -> String {
    format!("{PREFIX}{body}{POSTFIX}")
}

/// Remove `{|#N:` and `|}` markers, returning the clean text and the
/// offset of each marked location in order
pub fn strip_markers(marked: &str) -> (String, Vec<usize>) {
    let mut text = String::with_capacity(marked.len());
    let mut locations = Vec::new();
    let mut rest = marked;

    while let Some(open) = rest.find("{|#") {
        text.push_str(&rest[..open]);
        let after = &rest[open + 3..];
        let colon = after.find(':').expect("marker has a colon");
        locations.push(text.len());
        rest = &after[colon + 1..];

        let close = rest.find("|}").expect("marker is closed");
        text.push_str(&rest[..close]);
        rest = &rest[close + 2..];
    }
    text.push_str(rest);
    (text, locations)
}

/// Run the batch fixer on a marked body, reporting `rule` once per marker
/// and `repeat` times at each
pub fn fix_marked(rule: RuleId, marked_body: &str, repeat: usize) -> FixAllOutcome {
    let (source, locations) = strip_markers(&wrap(marked_body));
    assert!(!locations.is_empty(), "no diagnostic marker in {marked_body:?}");

    let diagnostics: Vec<Diagnostic> = locations
        .iter()
        .flat_map(|&offset| std::iter::repeat(Diagnostic::new(rule, offset)).take(repeat))
        .collect();

    let document = Document::parse(source);
    LoggingFixProvider::default().fix_all(&document, &diagnostics)
}

/// Assert that fixing `marked_body` yields `fixed_body`
pub fn verify_fix(rule: RuleId, marked_body: &str, fixed_body: &str) {
    verify_fix_repeated(rule, marked_body, 1, fixed_body);
}

pub fn verify_fix_repeated(rule: RuleId, marked_body: &str, repeat: usize, fixed_body: &str) {
    let outcome = fix_marked(rule, marked_body, repeat);
    pretty_assertions::assert_eq!(outcome.text, wrap(fixed_body));
    assert_eq!(outcome.applied.len(), 1, "exactly one call should be rewritten");
}

/// Assert that no fix is offered for `marked_body`
pub fn verify_no_fix(rule: RuleId, marked_body: &str) {
    let outcome = fix_marked(rule, marked_body, 1);
    let (unmarked, _) = strip_markers(&wrap(marked_body));
    pretty_assertions::assert_eq!(outcome.text, unmarked);
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.declined.len(), 1);
}
