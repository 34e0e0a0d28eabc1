//! Operator-precedence expression parsing
//!
//! Handles:
//! - Binary, assignment and lambda operators with precedence climbing
//! - Prefix unary operators, `await` and casts
//! - Postfix operations (member access, invocation, element access)
//! - Conditional expressions `c ? a : b`

mod postfix;
mod primary;

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::node_kind::NodeKind;
use crate::token::{Associativity, Precedence, Token};

use super::Parser;

/// Contextual keywords that act as prefix operators when followed by an operand
const PREFIX_KEYWORDS: &[&str] = &["await", "out", "ref"];

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<CstNode> {
        self.parse_expression_with_precedence(Precedence::Lowest)
    }

    /// Precedence climbing: binary operators binding at least as tight as `min_prec`
    pub(crate) fn parse_expression_with_precedence(
        &mut self,
        min_prec: Precedence,
    ) -> ParseResult<CstNode> {
        let mut left = self.parse_prefix()?;

        while let Some(token) = self.current.as_ref() {
            // Conditional: c ? a : b
            if token.token == Token::Question && min_prec <= Precedence::Conditional {
                left = self.parse_conditional(left)?;
                continue;
            }

            // Type tests: x is T, x is not null, x as T
            if token.token == Token::Identifier
                && matches!(token.text, "is" | "as")
                && min_prec <= Precedence::Relational
            {
                left = self.parse_type_test(left)?;
                continue;
            }

            let Some((prec, assoc)) = token.token.binary_precedence() else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let op_token = self.bump("operator")?;

            let next_prec = match assoc {
                Associativity::Left => prec.tighter(),
                Associativity::Right => prec,
            };

            // Lambda with a block body: x => { ... }
            if op_token.token == Token::FatArrow && self.check(&Token::LBrace) {
                let body = self.parse_block()?;
                let span = self.source_map.span(left.span.start, body.span.end);
                left = CstNode::with_children(NodeKind::LambdaExpression, span, vec![left, body]);
                continue;
            }

            let right = self.parse_expression_with_precedence(next_prec)?;
            let span = self.source_map.span(left.span.start, right.span.end);

            left = if op_token.token == Token::FatArrow {
                CstNode::with_children(NodeKind::LambdaExpression, span, vec![left, right])
            } else {
                let kind = if op_token.token.is_assignment() {
                    NodeKind::Assignment
                } else {
                    NodeKind::BinaryExpression
                };
                let op_node = CstNode::leaf(NodeKind::Operator, op_token.span, op_token.text);
                CstNode::with_children(kind, span, vec![left, op_node, right])
            };
        }

        Ok(left)
    }

    /// Parse the branches of `condition ? when_true : when_false`
    fn parse_conditional(&mut self, condition: CstNode) -> ParseResult<CstNode> {
        self.expect(Token::Question)?;
        let when_true = self.parse_expression_with_precedence(Precedence::Lambda)?;
        self.expect(Token::Colon)?;
        let when_false = self.parse_expression_with_precedence(Precedence::Conditional)?;

        let span = self
            .source_map
            .span(condition.span.start, when_false.span.end);
        Ok(CstNode::with_children(
            NodeKind::ConditionalExpression,
            span,
            vec![condition, when_true, when_false],
        ))
    }

    /// Parse `is T`, `is not T` or `as T` after `left`
    fn parse_type_test(&mut self, left: CstNode) -> ParseResult<CstNode> {
        let op_token = self.bump("type test")?;
        let mut op_end = op_token.span.end;
        if op_token.text == "is" && self.check_contextual("not") {
            op_end = self.bump("not")?.span.end;
        }
        let op_span = self.source_map.span(op_token.span.start, op_end);
        let op_node = CstNode::leaf(NodeKind::Operator, op_span, &self.source[op_span.start..op_end]);

        let right = self.parse_prefix()?;
        let span = self.source_map.span(left.span.start, right.span.end);
        Ok(CstNode::with_children(
            NodeKind::BinaryExpression,
            span,
            vec![left, op_node, right],
        ))
    }

    /// Unary operators, casts and `await`, then a primary with its postfixes
    pub(crate) fn parse_prefix(&mut self) -> ParseResult<CstNode> {
        let Some(token) = self.current.as_ref() else {
            return Err(ParseError::unexpected_eof("expression", self.current_span()));
        };

        let is_unary = token.token.unary_precedence().is_some();
        let keyword_candidate =
            token.token == Token::Identifier && PREFIX_KEYWORDS.contains(&token.text);
        let is_prefix_keyword = keyword_candidate
            && matches!(
                self.peek_next(),
                Some(Token::Identifier | Token::KwThis | Token::KwBase | Token::KwNew)
            );

        if is_unary || is_prefix_keyword {
            let op_token = self.bump("operator")?;
            // Unary binds tighter than binary, postfix binds tightest: -a.b is -(a.b)
            let operand = self.parse_prefix()?;

            let span = self.source_map.span(op_token.span.start, operand.span.end);
            let op_node = CstNode::leaf(NodeKind::Operator, op_token.span, op_token.text);
            return Ok(CstNode::with_children(
                NodeKind::UnaryExpression,
                span,
                vec![op_node, operand],
            ));
        }

        self.parse_primary_with_postfix()
    }

    /// Parse a primary expression followed by any postfix operations
    pub(crate) fn parse_primary_with_postfix(&mut self) -> ParseResult<CstNode> {
        let mut left = self.parse_primary()?;

        while let Some(postfix) = self.try_parse_postfix(&left)? {
            left = postfix;
        }

        Ok(left)
    }

    /// Parse a braced block: lambda body, object or collection initializer.
    ///
    /// The block is scanned like a document: every expression inside is
    /// kept as a child, everything else is skipped. Nested blocks nest.
    pub(crate) fn parse_block(&mut self) -> ParseResult<CstNode> {
        let open = self.expect(Token::LBrace)?;
        let mut children = Vec::new();

        loop {
            let Some(token) = self.current.as_ref() else {
                return Err(ParseError::unexpected_eof("'}'", self.current_span()));
            };

            let kind = token.token.clone();
            match kind {
                Token::RBrace => break,
                Token::LBrace => children.push(self.parse_block()?),
                t if t.starts_expression() => match self.parse_expression() {
                    Ok(node) => children.push(node),
                    Err(e) => {
                        self.errors.push(e);
                        if !self.check(&Token::RBrace) {
                            self.synchronize();
                        }
                    }
                },
                _ => {
                    self.advance();
                }
            }
        }

        let close = self.expect(Token::RBrace)?;
        let span = self.source_map.span(open.span.start, close.span.end);
        Ok(CstNode::with_children(NodeKind::Block, span, children))
    }
}
