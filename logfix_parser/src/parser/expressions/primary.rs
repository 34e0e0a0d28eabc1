//! Primary expression parsers

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::node_kind::NodeKind;
use crate::token::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse a primary expression
    pub(crate) fn parse_primary(&mut self) -> ParseResult<CstNode> {
        let token = self
            .current
            .as_ref()
            .ok_or_else(|| ParseError::unexpected_eof("expression", self.current_span()))?;

        let leaf_kind = match token.token {
            Token::Identifier => Some(NodeKind::Identifier),
            Token::KwThis => Some(NodeKind::ThisExpression),
            Token::KwBase => Some(NodeKind::BaseExpression),
            Token::IntegerLiteral | Token::HexLiteral | Token::RealLiteral => {
                Some(NodeKind::NumericLiteral)
            }
            Token::CharLiteral => Some(NodeKind::CharacterLiteral),
            Token::True | Token::False => Some(NodeKind::BooleanLiteral),
            Token::Null => Some(NodeKind::NullLiteral),
            Token::DoubleQuote | Token::VerbatimQuote => Some(NodeKind::StringLiteral),
            _ => None,
        };

        if let Some(kind) = leaf_kind {
            let token = self.bump("expression")?;
            return Ok(CstNode::leaf(kind, token.span, token.text));
        }

        match token.token {
            Token::InterpolatedQuote | Token::InterpolatedVerbatimQuote => {
                let token = self.bump("string")?;
                self.parse_interpolated_string(token)
            }
            Token::LParen => self.parse_parenthesized(),
            Token::KwNew => self.parse_object_creation(),
            _ => Err(ParseError::unexpected_token(
                token.text,
                "expression",
                token.span,
            )),
        }
    }

    /// Parse `(expr)`, a lambda parameter list `(a, b)` / `()`, or a cast `(T)x`
    fn parse_parenthesized(&mut self) -> ParseResult<CstNode> {
        let open = self.expect(Token::LParen)?;
        let mut children = Vec::new();

        if !self.check(&Token::RParen) {
            loop {
                children.push(self.parse_expression()?);
                if !self.check(&Token::Comma) {
                    break;
                }
                self.bump("','")?;
            }
        }

        let close = self.expect(Token::RParen)?;
        let span = self.source_map.span(open.span.start, close.span.end);

        if children.is_empty() && !self.check(&Token::FatArrow) {
            return Err(ParseError::invalid_syntax(
                "empty parentheses outside a lambda",
                span,
            ));
        }

        if children.len() == 1 && is_type_like(&children[0]) && self.starts_cast_operand() {
            let type_node = children.remove(0);
            let operand = self.parse_prefix()?;
            let span = self.source_map.span(open.span.start, operand.span.end);
            let mut node = CstNode::new(NodeKind::CastExpression, span);
            node.push_field("type", type_node);
            node.push_field("expression", operand);
            return Ok(node);
        }

        Ok(CstNode::with_children(
            NodeKind::ParenthesizedExpression,
            span,
            children,
        ))
    }

    /// Tokens that can follow `(T)` when it is a cast rather than a value
    fn starts_cast_operand(&self) -> bool {
        self.current.as_ref().is_some_and(|t| {
            t.token.is_literal()
                || t.token.is_string_opener()
                || matches!(
                    t.token,
                    Token::Identifier
                        | Token::KwThis
                        | Token::KwBase
                        | Token::KwNew
                        | Token::LParen
                        | Token::Bang
                        | Token::Tilde
                )
        })
    }

    /// Parse `new T(args) { init }`, `new(args)`, `new[] { ... }` or `new { ... }`
    fn parse_object_creation(&mut self) -> ParseResult<CstNode> {
        let new_token = self.expect(Token::KwNew)?;
        let mut node = CstNode::new(NodeKind::ObjectCreation, new_token.span);

        if self.check(&Token::Identifier) || self.check(&Token::LBracket) {
            node.push_field("type", self.parse_type_name()?);
        }
        if self.check(&Token::LParen) {
            node.push_field("arguments", self.parse_argument_list()?);
        }
        if self.check(&Token::LBrace) {
            node.push_field("initializer", self.parse_block()?);
        }

        let Some(last) = node.children.last() else {
            return Err(ParseError::unexpected_token(
                self.current.as_ref().map(|t| t.text).unwrap_or("end of input"),
                "type or arguments after 'new'",
                self.current_span(),
            ));
        };
        node.span = self.source_map.span(new_token.span.start, last.span.end);
        Ok(node)
    }

    /// Parse a type name: `Exception`, `System.IO.IOException`,
    /// `List<int>`, `int?`, `string[]`, or bare `[]` after `new`.
    /// The result is a single `TypeName` leaf carrying the source text.
    fn parse_type_name(&mut self) -> ParseResult<CstNode> {
        let start = self.current_span().start;

        if self.check(&Token::Identifier) {
            self.parse_identifier()?;
            while self.check(&Token::Dot) {
                self.bump("'.'")?;
                self.parse_identifier()?;
            }
            if self.check(&Token::Lt) {
                self.skip_generic_arguments()?;
            }
            if self.check(&Token::Question) {
                self.bump("'?'")?;
            }
        }
        while self.check(&Token::LBracket) {
            self.bump("'['")?;
            while self.check(&Token::Comma) {
                self.bump("','")?;
            }
            self.expect(Token::RBracket)?;
        }

        let span = self.source_map.span(start, self.prev_end);
        Ok(CstNode::leaf(
            NodeKind::TypeName,
            span,
            &self.source[start..self.prev_end],
        ))
    }

    /// Skip a balanced `<...>` generic argument list
    fn skip_generic_arguments(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            let token = self.bump("'>'")?;
            match token.token {
                Token::Lt => depth += 1,
                Token::Gt => depth -= 1,
                Token::Identifier | Token::Comma | Token::Dot | Token::Question => {}
                Token::LBracket | Token::RBracket => {}
                _ => {
                    return Err(ParseError::unexpected_token(
                        token.text,
                        "generic argument",
                        token.span,
                    ))
                }
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }
}

/// Whether a parenthesized expression could be a type in a cast
fn is_type_like(node: &CstNode) -> bool {
    match node.kind {
        NodeKind::Identifier => true,
        NodeKind::MemberAccess => node
            .child_by_field("expression")
            .is_some_and(is_type_like),
        _ => false,
    }
}
