//! Tolerant recursive descent parser for C# expressions
//!
//! The document parse does not try to understand declarations or
//! statements. It scans the token stream, parses every expression it can
//! find, and skips whatever cannot start one. That is enough to locate
//! logging invocations and their arguments anywhere in a file.

mod expressions;
mod literals;

use crate::cst::CstNode;
use crate::error::{ParseError, ParseErrors, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::node_kind::NodeKind;
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// C# expression parser
pub struct Parser<'a> {
    /// Source code (the whole document, even when parsing a sub-range)
    pub(crate) source: &'a str,
    /// Lexer
    pub(crate) lexer: Lexer<'a>,
    pub(crate) source_map: SourceMap,
    pub(crate) current: Option<SpannedToken<'a>>,
    /// End offset of the last consumed token
    pub(crate) prev_end: usize,
    /// Offset where input ends for this parser
    pub(crate) end: usize,
    /// Errors recovered from so far
    pub(crate) errors: ParseErrors,
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("current", &self.current)
            .field("end", &self.end)
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let source_map = SourceMap::new(source);
        let lexer = Lexer::new(source);
        Self {
            source,
            lexer,
            source_map,
            current: None,
            prev_end: 0,
            end: source.len(),
            errors: ParseErrors::new(),
        }
    }

    /// Create a parser over `source[start..end]` producing absolute spans
    pub(crate) fn for_range(
        source: &'a str,
        start: usize,
        end: usize,
        source_map: SourceMap,
    ) -> Self {
        let lexer = Lexer::with_range(source, start, end, source_map.clone());
        Self {
            source,
            lexer,
            source_map,
            current: None,
            prev_end: start,
            end,
            errors: ParseErrors::new(),
        }
    }

    /// Parse the whole document and return a SourceFile CST node
    ///
    /// Tokens that cannot start an expression (`;`, `{`, `}`, `)`, ...) are
    /// skipped. A failed expression is recorded and parsing resumes one
    /// token later.
    pub fn parse(mut self) -> (CstNode, ParseErrors) {
        let mut children = Vec::new();

        self.advance();

        while let Some(token) = self.current.as_ref() {
            if !token.token.starts_expression() {
                self.advance();
                continue;
            }

            match self.parse_expression() {
                Ok(node) => children.push(node),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        let span = self.source_map.span(0, self.source.len());
        let root = CstNode::with_children(NodeKind::SourceFile, span, children);

        (root, self.errors)
    }

    /// Parse the input as exactly one expression
    pub fn parse_single_expression(mut self) -> ParseResult<CstNode> {
        self.advance();
        let node = self.parse_expression()?;

        if let Some(token) = self.current.as_ref() {
            return Err(ParseError::unexpected_token(
                token.text,
                "end of input",
                token.span,
            ));
        }
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(node),
        }
    }

    /// Move to the next non-trivia token, recording lexer errors on the way
    pub(crate) fn advance(&mut self) -> Option<SpannedToken<'a>> {
        let prev = self.current.take();
        if let Some(prev) = prev.as_ref() {
            self.prev_end = prev.span.end;
        }
        loop {
            match self.lexer.next_token() {
                Some(Ok(token)) => {
                    if token.is_trivia() {
                        continue;
                    }
                    self.current = Some(token);
                    break;
                }
                Some(Err(e)) => {
                    self.errors.push(e);
                    continue;
                }
                None => {
                    self.current = None;
                    break;
                }
            }
        }
        prev
    }

    /// Consume the current token, failing at end of input
    pub(crate) fn bump(&mut self, expected: &str) -> ParseResult<SpannedToken<'a>> {
        let span = self.current_span();
        self.advance()
            .ok_or_else(|| ParseError::unexpected_eof(expected, span))
    }

    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.current
            .as_ref()
            .map(|t| &t.token == expected)
            .unwrap_or(false)
    }

    /// Check if current token is the contextual keyword `word`
    pub(crate) fn check_contextual(&self, word: &str) -> bool {
        self.current
            .as_ref()
            .map(|t| t.token == Token::Identifier && t.text == word)
            .unwrap_or(false)
    }

    /// Peek at the token after the current one without consuming it
    pub(crate) fn peek_next(&mut self) -> Option<Token> {
        loop {
            match self.lexer.peek() {
                Some(Ok(token)) => {
                    if token.is_trivia() {
                        let _ = self.lexer.next_token();
                        continue;
                    }
                    return Some(token.token.clone());
                }
                Some(Err(_)) => {
                    let _ = self.lexer.next_token();
                    continue;
                }
                None => return None,
            }
        }
    }

    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        match self.current.as_ref() {
            Some(token) if token.token == expected => self.bump("token"),
            Some(token) => Err(ParseError::unexpected_token(
                token.text,
                format!("{:?}", expected),
                token.span,
            )),
            None => Err(ParseError::unexpected_eof(
                format!("{:?}", expected),
                self.current_span(),
            )),
        }
    }

    /// Span of the current token, or an empty span at end of input
    pub(crate) fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|t| t.span)
            .unwrap_or_else(|| self.source_map.span(self.end, self.end))
    }

    /// Error recovery: skip one token
    pub(crate) fn synchronize(&mut self) {
        self.advance();
    }
}

/// Parse C# source code into a CST with error recovery
pub fn parse(source: &str) -> (CstNode, ParseErrors) {
    Parser::new(source).parse()
}

/// Parse C# source code that must be exactly one expression
pub fn parse_expression(source: &str) -> ParseResult<CstNode> {
    Parser::new(source).parse_single_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_child_count, assert_field_kind, assert_node_kind, assert_node_text};

    #[test]
    fn test_declaration_surfaces_as_assignment() {
        let (cst, errors) = parse("Exception ex = null;");

        assert!(errors.is_empty());
        assert_child_count(&cst, 2);
        assert_node_text(&cst.children[0], "Exception");
        assert_node_kind(&cst.children[1], NodeKind::Assignment);
    }

    #[test]
    fn test_statement_punctuation_is_skipped() {
        let (cst, errors) = parse("{ a; } ; b");

        assert!(errors.is_empty());
        assert_child_count(&cst, 2);
    }

    #[test]
    fn test_recovery_skips_one_token() {
        let (cst, errors) = parse("f(a b); g(c)");

        assert_eq!(errors.len(), 1);
        let last = cst.children.last().unwrap();
        assert_node_kind(last, NodeKind::Invocation);
        assert_field_kind(last, "function", NodeKind::Identifier);
    }

    #[test]
    fn test_single_expression() {
        let node = parse_expression("this.GetType().FullName").unwrap();
        assert_node_kind(&node, NodeKind::MemberAccess);
        assert!(parse_expression("a; b").is_err());
    }
}
