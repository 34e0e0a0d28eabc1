//! Parse errors
//!
//! Messages lead with `line:column` so they read like compiler output.
//! [`ParseError::render`] adds the offending source line with a caret marker.

use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{}:{}: unexpected '{found}', expected {expected}", .span.start_line, .span.start_column)]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("{}:{}: unexpected end of input, expected {expected}", .span.start_line, .span.start_column)]
    UnexpectedEof { expected: String, span: Span },

    #[error("{}:{}: string literal is never closed", .span.start_line, .span.start_column)]
    UnterminatedString { span: Span },

    #[error("{}:{}: block comment is never closed", .span.start_line, .span.start_column)]
    UnterminatedBlockComment { span: Span },

    /// Interpolation hole that is empty or never closed
    #[error("{}:{}: invalid interpolation hole '{text}'", .span.start_line, .span.start_column)]
    InvalidInterpolation { text: String, span: Span },

    #[error("{}:{}: {message}", .span.start_line, .span.start_column)]
    InvalidSyntax { message: String, span: Span },

    /// Character sequence no token matches
    #[error("{}:{}: unrecognized input", .span.start_line, .span.start_column)]
    Unrecognized { span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnterminatedString { span }
            | ParseError::UnterminatedBlockComment { span }
            | ParseError::InvalidInterpolation { span, .. }
            | ParseError::InvalidSyntax { span, .. }
            | ParseError::Unrecognized { span } => span,
        }
    }

    pub fn unexpected_token(found: impl Into<String>, expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidSyntax {
            message: message.into(),
            span,
        }
    }

    /// The message followed by the source line and a caret under the error.
    ///
    /// ```text
    /// 1:24: unexpected end of input, expected argument
    ///    1 | _logger.LogInformation(
    ///      |                        ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let span = self.span();
        let Some(line) = source.lines().nth(span.start_line.saturating_sub(1)) else {
            return self.to_string();
        };

        let column = span.start_column.saturating_sub(1).min(line.len());
        let width = if span.start_line == span.end_line {
            span.end_column.saturating_sub(span.start_column)
        } else {
            line.len() - column
        };
        let carets = "^".repeat(width.clamp(1, (line.len() - column).max(1)));

        format!(
            "{self}\n{:>4} | {line}\n     | {}{carets}",
            span.start_line,
            " ".repeat(column)
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors recovered from during a tolerant parse, in source order
#[derive(Debug, Default, Clone)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ParseError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: ParseErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
