//! Interpolated string parsing
//!
//! The lexer hands over an interpolated string as one token. Here it is
//! split into text runs and holes; each hole expression is parsed in place
//! so its nodes carry absolute spans.

use std::ops::Range;

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::lexer::SpannedToken;
use crate::node_kind::NodeKind;
use crate::scan::{self, InterpolatedPart, ScanError};
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse an interpolated string token into an `InterpolatedString` node.
    ///
    /// The node's text is the opening prefix (`$"`, `$@"` or `@$"`).
    pub(crate) fn parse_interpolated_string(
        &mut self,
        token: SpannedToken<'a>,
    ) -> ParseResult<CstNode> {
        let verbatim = token.token == Token::InterpolatedVerbatimQuote;
        let opener_len = if verbatim { 3 } else { 2 };
        let body_start = token.span.start + opener_len;

        let mut parts = Vec::new();
        scan::scan_interpolated(self.source.as_bytes(), body_start, verbatim, &mut parts)
            .map_err(|e| self.scan_error(token.span.start, e))?;

        let mut children = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                InterpolatedPart::Text(range) => children.push(self.range_leaf(
                    NodeKind::InterpolatedText,
                    range,
                )),
                InterpolatedPart::Hole(hole) => {
                    let mut interpolation =
                        CstNode::new(NodeKind::Interpolation, self.range_span(hole.whole));
                    interpolation.push_field("expression", self.parse_hole(hole.expression)?);
                    if let Some(alignment) = hole.alignment {
                        interpolation.push_field(
                            "alignment",
                            self.range_leaf(NodeKind::InterpolationAlignment, alignment),
                        );
                    }
                    if let Some(format) = hole.format {
                        interpolation.push_field(
                            "format",
                            self.range_leaf(NodeKind::InterpolationFormat, format),
                        );
                    }
                    children.push(interpolation);
                }
            }
        }

        let mut node = CstNode::with_children(NodeKind::InterpolatedString, token.span, children);
        node.set_text(&token.text[..opener_len]);
        Ok(node)
    }

    /// Parse the expression inside one hole with a sub-parser over its range
    fn parse_hole(&mut self, range: Range<usize>) -> ParseResult<CstNode> {
        let mut parser = Parser::for_range(
            self.source,
            range.start,
            range.end,
            self.source_map.clone(),
        );
        parser.advance();
        let expression = parser.parse_expression()?;

        if let Some(token) = parser.current.as_ref() {
            return Err(ParseError::InvalidInterpolation {
                text: self.source[range.clone()].to_string(),
                span: token.span,
            });
        }
        self.errors.extend(parser.errors);
        Ok(expression)
    }

    fn range_span(&self, range: Range<usize>) -> crate::span::Span {
        self.source_map.span(range.start, range.end)
    }

    fn range_leaf(&self, kind: NodeKind, range: Range<usize>) -> CstNode {
        CstNode::leaf(kind, self.range_span(range.clone()), &self.source[range])
    }

    fn scan_error(&self, start: usize, error: ScanError) -> ParseError {
        match error {
            ScanError::Unterminated { at } => ParseError::UnterminatedString {
                span: self.source_map.span(start, at),
            },
            ScanError::InvalidHole { start, end } => ParseError::InvalidInterpolation {
                text: self.source[start..end].to_string(),
                span: self.source_map.span(start, end),
            },
        }
    }
}
