//! Fix provider: code actions for diagnosed logging calls

use serde::Serialize;
use tracing::{debug, info};

use crate::config::FixOptions;
use crate::document::Document;
use crate::oracle::DeclarationOracle;
use crate::patch::{apply_patches, Patch};
use crate::rules::{CodeAction, Diagnostic, RuleId};
use crate::strategy::{rewrite, RewriteContext};
use crate::types::TypeOracle;

/// A code action together with the patch it would apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredFix {
    pub action: CodeAction,
    pub patch: Patch,
}

/// Result of fixing a batch of diagnostics in one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixAllOutcome {
    /// The rewritten document
    pub text: String,
    /// Accepted patches, in source order
    pub applied: Vec<Patch>,
    /// Patches dropped for overlapping an earlier fix
    pub skipped: Vec<Patch>,
    /// Diagnostics for which no fix was available
    pub declined: Vec<Diagnostic>,
}

impl FixAllOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Offers and applies fixes for the three logging rules
#[derive(Debug, Clone, Default)]
pub struct LoggingFixProvider {
    options: FixOptions,
}

impl LoggingFixProvider {
    pub const FIXABLE_DIAGNOSTIC_IDS: [&'static str; 3] = ["CA1727", "CA2253", "CA2254"];

    pub fn new(options: FixOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FixOptions {
        &self.options
    }

    /// True when `id` names a diagnostic this provider can fix
    pub fn can_fix(id: &str) -> bool {
        id.parse::<RuleId>().is_ok()
    }

    /// Type oracle built from the declarations in `document`
    pub fn oracle_for(&self, document: &Document) -> DeclarationOracle {
        DeclarationOracle::from_source(document.source(), &self.options)
    }

    /// The fix offered for `diagnostic`, if its call site qualifies
    pub fn register_fixes(&self, document: &Document, diagnostic: &Diagnostic) -> Option<RegisteredFix> {
        let oracle = self.oracle_for(document);
        self.register_fixes_with(document, diagnostic, &oracle)
    }

    /// Like [`register_fixes`](Self::register_fixes) with a host-supplied type oracle
    pub fn register_fixes_with(
        &self,
        document: &Document,
        diagnostic: &Diagnostic,
        oracle: &dyn TypeOracle,
    ) -> Option<RegisteredFix> {
        let Some(site) = document.enclosing_invocation(diagnostic.offset) else {
            let (line, column) = document.line_col(diagnostic.offset);
            debug!(rule = %diagnostic.rule, line, column, "no call expression at diagnostic");
            return None;
        };

        let ctx = RewriteContext::new(document.source(), &self.options, oracle);
        let patch = rewrite(diagnostic.rule, &ctx, &site)?;
        Some(RegisteredFix {
            action: diagnostic.rule.action(),
            patch,
        })
    }

    /// Fix every diagnostic against the same snapshot of `document`
    pub fn fix_all(&self, document: &Document, diagnostics: &[Diagnostic]) -> FixAllOutcome {
        let oracle = self.oracle_for(document);
        self.fix_all_with(document, diagnostics, &oracle)
    }

    /// Like [`fix_all`](Self::fix_all) with a host-supplied type oracle
    pub fn fix_all_with(
        &self,
        document: &Document,
        diagnostics: &[Diagnostic],
        oracle: &dyn TypeOracle,
    ) -> FixAllOutcome {
        let mut patches = Vec::new();
        let mut declined = Vec::new();

        for diagnostic in diagnostics {
            match self.register_fixes_with(document, diagnostic, oracle) {
                Some(fix) => patches.push(fix.patch),
                None => declined.push(*diagnostic),
            }
        }

        let outcome = apply_patches(document.source(), patches);
        info!(
            diagnostics = diagnostics.len(),
            applied = outcome.applied.len(),
            skipped = outcome.skipped.len(),
            declined = declined.len(),
            "fixed logging call sites"
        );

        FixAllOutcome {
            text: outcome.text,
            applied: outcome.applied,
            skipped: outcome.skipped,
            declined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "\
try { } catch (Exception ex) {
    _logger.LogError($\"Failed {ex.Message}\");
    _logger.LogWarning(\"{0} of {1}\", done, total);
}
";

    fn diagnostic(rule: RuleId, marker: &str) -> Diagnostic {
        Diagnostic::new(rule, SOURCE.find(marker).unwrap())
    }

    #[test]
    fn test_fixable_ids_parse() {
        for id in LoggingFixProvider::FIXABLE_DIAGNOSTIC_IDS {
            assert!(LoggingFixProvider::can_fix(id));
        }
        assert!(!LoggingFixProvider::can_fix("CA1000"));
    }

    #[test]
    fn test_register_fix() {
        let document = Document::parse(SOURCE);
        let provider = LoggingFixProvider::default();
        let fix = provider
            .register_fixes(&document, &diagnostic(RuleId::StructuredTemplate, "$\""))
            .unwrap();

        assert_eq!(fix.action.equivalence_key, "FixAsStructuredLogging");
        assert_eq!(
            fix.patch.replacement,
            "_logger.LogError(ex, \"Failed {ExMessage}\", ex.Message)"
        );
        assert!(fix.patch.replacement_node().is_ok());
    }

    #[test]
    fn test_no_fix_offered() {
        let document = Document::parse(SOURCE);
        let provider = LoggingFixProvider::default();

        // the positional rule does not apply to an interpolated template
        assert!(provider
            .register_fixes(&document, &diagnostic(RuleId::NumericPlaceholder, "$\""))
            .is_none());
        assert!(provider
            .register_fixes(&document, &Diagnostic::new(RuleId::PlaceholderCasing, 0))
            .is_none());
    }

    #[test]
    fn test_fix_all() {
        let document = Document::parse(SOURCE);
        let provider = LoggingFixProvider::default();
        let outcome = provider.fix_all(
            &document,
            &[
                diagnostic(RuleId::NumericPlaceholder, "\"{0}"),
                diagnostic(RuleId::StructuredTemplate, "$\""),
                diagnostic(RuleId::PlaceholderCasing, "\"{0}"),
            ],
        );

        assert_eq!(
            outcome.text,
            "\
try { } catch (Exception ex) {
    _logger.LogError(ex, \"Failed {ExMessage}\", ex.Message);
    _logger.LogWarning(\"{Done} of {Total}\", done, total);
}
"
        );
        assert_eq!(outcome.applied.len(), 2);
        assert!(outcome.skipped.is_empty());
        // casing finds nothing to change in `{0}`
        assert_eq!(outcome.declined, vec![diagnostic(RuleId::PlaceholderCasing, "\"{0}")]);
    }

    #[test]
    fn test_overlapping_fixes_first_wins() {
        let source = "_logger.LogWarning(\"{0} {user}\", count, user);";
        let document = Document::parse(source);
        let offset = source.find('"').unwrap();
        let outcome = LoggingFixProvider::default().fix_all(
            &document,
            &[
                Diagnostic::new(RuleId::NumericPlaceholder, offset),
                Diagnostic::new(RuleId::PlaceholderCasing, offset),
            ],
        );

        assert_eq!(outcome.text, "_logger.LogWarning(\"{Count} {user}\", count, user);");
        assert_eq!(outcome.skipped.len(), 1);
    }
}
