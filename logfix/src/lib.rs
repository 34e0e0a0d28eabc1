//! logfix
//!
//! Rewrites logging calls into structured message templates: interpolated
//! messages become templates with named placeholders, numbered placeholders
//! are named after their arguments, and placeholder names are PascalCased.
//!
//! # Example
//!
//! ```
//! use logfix::{Diagnostic, Document, LoggingFixProvider, RuleId};
//!
//! let source = "_logger.LogInformation($\"Loaded {items.Count} items\");";
//! let document = Document::parse(source);
//! let diagnostic = Diagnostic::new(RuleId::StructuredTemplate, source.find('$').unwrap());
//!
//! let outcome = LoggingFixProvider::default().fix_all(&document, &[diagnostic]);
//! assert_eq!(
//!     outcome.text,
//!     "_logger.LogInformation(\"Loaded {ItemsCount} items\", items.Count);"
//! );
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fragment;
pub mod hoist;
pub mod logging;
pub mod normalizer;
pub mod oracle;
pub mod patch;
pub mod provider;
pub mod rules;
pub mod strategy;
pub mod template;
pub mod types;

// Re-exports
pub use config::{ConfigError, FixOptions, CONFIG_FILE_NAME};
pub use document::{CallSite, Document};
pub use error::{FixError, FixResult, NormalizeError};
pub use normalizer::normalize;
pub use oracle::DeclarationOracle;
pub use patch::{apply_patches, Patch, PatchOutcome};
pub use provider::{FixAllOutcome, LoggingFixProvider, RegisteredFix};
pub use rules::{CodeAction, Diagnostic, DiagnosticSpec, RuleId};
pub use types::{TypeInfo, TypeOracle};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
