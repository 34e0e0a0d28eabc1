//! logfix_parser
//!
//! Tolerant parser for the C# expression subset found around logging call
//! sites. It produces a concrete syntax tree with absolute spans, including
//! the holes of interpolated strings, so rewrites can be spliced straight
//! back into the original text.
//!
//! Whole documents go through [`parse_with_errors`], which keeps every
//! expression it can recover. Synthesized replacement text goes through
//! [`parse_expression`], which accepts exactly one expression.
//!
//! ```
//! use logfix_parser::{parse_with_errors, NodeKind};
//!
//! let (cst, errors) = parse_with_errors("_logger.LogInformation($\"Value: {ex.Message}\");");
//!
//! assert!(errors.is_empty());
//! assert_eq!(cst.children[0].kind, NodeKind::Invocation);
//! ```

pub mod cst;
pub mod error;
pub mod lexer;
pub mod node_kind;
pub mod parser;
mod scan;
pub mod span;
pub mod token;

pub use cst::{CstNode, CstWalker};
pub use error::{ParseError, ParseErrors, ParseResult};
pub use lexer::{tokenize, Lexer, SpannedToken};
pub use node_kind::NodeKind;
pub use parser::{parse_expression, Parser};
pub use span::{SourceMap, Span};
pub use token::Token;

#[cfg(any(test, feature = "testing"))]
pub use cst::testing;

/// Parse a document, failing on the first recovered error
pub fn parse(source: &str) -> ParseResult<CstNode> {
    let (cst, errors) = parser::parse(source);
    match errors.into_iter().next() {
        Some(error) => Err(error),
        None => Ok(cst),
    }
}

/// Parse a document, returning the tree together with every recovered error
pub fn parse_with_errors(source: &str) -> (CstNode, ParseErrors) {
    parser::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let cst = parse("").unwrap();
        assert_eq!(cst.kind, NodeKind::SourceFile);
        assert!(cst.children.is_empty());
    }

    #[test]
    fn test_strict_parse_reports_first_error() {
        let err = parse("f(a b); g(").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err}");

        let (cst, errors) = parse_with_errors("f(a b); g(c)");
        assert_eq!(errors.len(), 1);
        assert_eq!(cst.children.last().map(|n| n.kind), Some(NodeKind::Invocation));
    }

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        assert!(parse_expression("a.b(c)").is_ok());
        assert!(parse_expression("a b").is_err());
        assert!(parse_expression("a(").is_err());
    }
}
