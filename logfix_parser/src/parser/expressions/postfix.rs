//! Postfix expression parsers: member access, invocation, element access

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::node_kind::NodeKind;
use crate::token::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Try to parse a postfix operation applied to `left`
    pub(crate) fn try_parse_postfix(&mut self, left: &CstNode) -> ParseResult<Option<CstNode>> {
        let token = match self.current.as_ref() {
            Some(t) => t,
            None => return Ok(None),
        };

        match &token.token {
            // Member access: expr.name
            Token::Dot => Ok(Some(self.parse_member_access(
                left.clone(),
                NodeKind::MemberAccess,
            )?)),

            // Conditional member access: expr?.name
            Token::QuestionDot => Ok(Some(self.parse_member_access(
                left.clone(),
                NodeKind::ConditionalAccess,
            )?)),

            // Invocation: expr(args)
            Token::LParen => {
                let arguments = self.parse_argument_list()?;
                let span = self.source_map.span(left.span.start, arguments.span.end);
                let mut node = CstNode::new(NodeKind::Invocation, span);
                node.push_field("function", left.clone());
                node.push_field("arguments", arguments);
                Ok(Some(node))
            }

            // Element access: expr[index]
            Token::LBracket => {
                let arguments = self.parse_bracketed_argument_list()?;
                let span = self.source_map.span(left.span.start, arguments.span.end);
                let mut node = CstNode::new(NodeKind::ElementAccess, span);
                node.push_field("expression", left.clone());
                node.push_field("arguments", arguments);
                Ok(Some(node))
            }

            // Increment/decrement and null-forgiving: x++, x--, x!
            Token::PlusPlus | Token::MinusMinus | Token::Bang => {
                let op_token = self.bump("operator")?;
                let span = self.source_map.span(left.span.start, op_token.span.end);
                let op_node = CstNode::leaf(NodeKind::Operator, op_token.span, op_token.text);
                Ok(Some(CstNode::with_children(
                    NodeKind::PostfixExpression,
                    span,
                    vec![left.clone(), op_node],
                )))
            }

            _ => Ok(None),
        }
    }

    /// Parse `.name` or `?.name` after `left`
    fn parse_member_access(&mut self, left: CstNode, kind: NodeKind) -> ParseResult<CstNode> {
        self.bump("member access")?;
        let name = self.parse_identifier()?;

        let span = self.source_map.span(left.span.start, name.span.end);
        let mut node = CstNode::new(kind, span);
        node.push_field("expression", left);
        node.push_field("name", name);
        Ok(node)
    }

    /// Parse a parenthesized argument list; the node span includes both parentheses
    pub(crate) fn parse_argument_list(&mut self) -> ParseResult<CstNode> {
        let open = self.expect(Token::LParen)?;
        let arguments = self.parse_arguments_until(Token::RParen)?;
        let close = self.expect(Token::RParen)?;

        let span = self.source_map.span(open.span.start, close.span.end);
        Ok(CstNode::with_children(NodeKind::ArgumentList, span, arguments))
    }

    /// Parse a bracketed argument list; the node span includes both brackets
    fn parse_bracketed_argument_list(&mut self) -> ParseResult<CstNode> {
        let open = self.expect(Token::LBracket)?;
        let arguments = self.parse_arguments_until(Token::RBracket)?;
        let close = self.expect(Token::RBracket)?;

        let span = self.source_map.span(open.span.start, close.span.end);
        Ok(CstNode::with_children(
            NodeKind::BracketedArgumentList,
            span,
            arguments,
        ))
    }

    /// Parse comma-separated arguments up to (not including) `close`
    fn parse_arguments_until(&mut self, close: Token) -> ParseResult<Vec<CstNode>> {
        let mut arguments = Vec::new();
        if self.check(&close) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_argument()?);
            if !self.check(&Token::Comma) {
                break;
            }
            self.bump("','")?;
        }

        Ok(arguments)
    }

    /// Parse a single argument, which may be named: `name: value`
    fn parse_argument(&mut self) -> ParseResult<CstNode> {
        if self.check(&Token::Identifier) && self.peek_next() == Some(Token::Colon) {
            let name = self.parse_identifier()?;
            self.expect(Token::Colon)?;
            let value = self.parse_expression()?;

            let span = self.source_map.span(name.span.start, value.span.end);
            let mut node = CstNode::new(NodeKind::NamedArgument, span);
            node.push_field("name", name);
            node.push_field("value", value);
            return Ok(node);
        }

        self.parse_expression()
    }

    /// Parse a simple name
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<CstNode> {
        match self.current.as_ref() {
            Some(token) if token.token == Token::Identifier => {
                let token = self.bump("identifier")?;
                Ok(CstNode::leaf(NodeKind::Identifier, token.span, token.text))
            }
            Some(token) => Err(ParseError::unexpected_token(
                token.text,
                "identifier",
                token.span,
            )),
            None => Err(ParseError::unexpected_eof(
                "identifier",
                self.current_span(),
            )),
        }
    }
}
