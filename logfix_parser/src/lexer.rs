//! Token stream over C# source
//!
//! logos recognises everything except the two constructs that need a
//! hand-written scanner: block comments and string literals. For those the
//! logos lexer only matches the opener (`/*`, `"`, `@"`, `$"`, `$@"`); the
//! rest is scanned here and the logos lexer is restarted after it. String
//! tokens therefore cover the whole literal, prefix through closing quote.

use logos::Logos;

use crate::error::ParseError;
use crate::scan::{self, ScanError};
use crate::span::{SourceMap, Span};
use crate::token::Token;

#[derive(Debug, Clone)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

impl SpannedToken<'_> {
    /// Comments and `#` directives, which the parser never sees
    pub fn is_trivia(&self) -> bool {
        self.token == Token::LineComment
    }
}

type Lexed<'a> = Result<SpannedToken<'a>, ParseError>;

pub struct Lexer<'a> {
    source: &'a str,
    source_map: SourceMap,
    inner: logos::Lexer<'a, Token>,
    /// Absolute offset of `inner`'s input within `source`
    base: usize,
    peeked: Option<Lexed<'a>>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("base", &self.base)
            .field("peeked", &self.peeked)
            .finish_non_exhaustive()
    }
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let source_map = SourceMap::new(source);
        Self::with_range(source, 0, source.len(), source_map)
    }

    /// Lexer over `source[start..end]` reporting offsets into all of `source`.
    ///
    /// Interpolation holes are lexed this way, in place.
    pub fn with_range(source: &'a str, start: usize, end: usize, source_map: SourceMap) -> Self {
        let source = &source[..end];
        Self {
            source,
            source_map,
            inner: Token::lexer(&source[start..]),
            base: start,
            peeked: None,
        }
    }

    pub fn peek(&mut self) -> Option<&Lexed<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.lex();
        }
        self.peeked.as_ref()
    }

    pub fn next_token(&mut self) -> Option<Lexed<'a>> {
        match self.peeked.take() {
            Some(peeked) => Some(peeked),
            None => self.lex(),
        }
    }

    fn lex(&mut self) -> Option<Lexed<'a>> {
        let result = self.inner.next()?;
        let range = self.inner.span();
        let (start, end) = (self.base + range.start, self.base + range.end);

        let lexed = match result {
            Ok(Token::BlockCommentStart) => self.finish_comment(start, end),
            Ok(opener) if opener.is_string_opener() => self.finish_string(opener, start, end),
            Ok(token) => Ok(self.token(token, start, end)),
            Err(()) => Err(ParseError::Unrecognized {
                span: self.source_map.span(start, end),
            }),
        };
        Some(lexed)
    }

    fn token(&self, token: Token, start: usize, end: usize) -> SpannedToken<'a> {
        SpannedToken {
            token,
            span: self.source_map.span(start, end),
            text: &self.source[start..end],
        }
    }

    /// Block comments do not nest; an unterminated one swallows the rest
    fn finish_comment(&mut self, start: usize, body: usize) -> Lexed<'a> {
        let close = memchr::memmem::find(&self.source.as_bytes()[body..], b"*/");
        let Some(close) = close else {
            self.resume_at(self.source.len());
            return Err(ParseError::UnterminatedBlockComment {
                span: self.source_map.span(start, self.source.len()),
            });
        };
        let end = body + close + 2;
        self.resume_at(end);
        Ok(self.token(Token::LineComment, start, end))
    }

    fn finish_string(&mut self, opener: Token, start: usize, body: usize) -> Lexed<'a> {
        let bytes = self.source.as_bytes();
        let scanned = match opener {
            Token::DoubleQuote => scan::scan_string(bytes, body, false),
            Token::VerbatimQuote => scan::scan_string(bytes, body, true),
            Token::InterpolatedQuote => scan::scan_interpolated(bytes, body, false, &mut Vec::new()),
            _ => scan::scan_interpolated(bytes, body, true, &mut Vec::new()),
        };
        match scanned {
            Ok(end) => {
                self.resume_at(end);
                Ok(self.token(opener, start, end))
            }
            Err(ScanError::Unterminated { at }) => {
                self.resume_at(self.source.len());
                Err(ParseError::UnterminatedString {
                    span: self.source_map.span(start, at),
                })
            }
            Err(ScanError::InvalidHole { start, end }) => {
                self.resume_at(self.source.len());
                Err(ParseError::InvalidInterpolation {
                    text: self.source[start..end].to_string(),
                    span: self.source_map.span(start, end),
                })
            }
        }
    }

    /// Continue logos lexing from absolute offset `pos`
    fn resume_at(&mut self, pos: usize) {
        self.inner = Token::lexer(&self.source[pos..]);
        self.base = pos;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexed<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Every token in `source`, comments included
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken<'_>, ParseError>> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(|r| r.ok())
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            tokens("_logger.LogInformation(ex, x + 1);"),
            vec![
                Token::Identifier,
                Token::Dot,
                Token::Identifier,
                Token::LParen,
                Token::Identifier,
                Token::Comma,
                Token::Identifier,
                Token::Plus,
                Token::IntegerLiteral,
                Token::RParen,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(
            tokens("/* a * b */ 42"),
            vec![Token::LineComment, Token::IntegerLiteral]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens: Vec<_> = tokenize("/* unterminated").into_iter().collect();

        assert_eq!(tokens.len(), 1);
        assert!(matches!(
            tokens[0],
            Err(ParseError::UnterminatedBlockComment { .. })
        ));
    }

    #[test]
    fn test_string_token_covers_whole_literal() {
        let source = r#"Log("a {0} \" b", x)"#;
        let all: Vec<_> = tokenize(source).into_iter().filter_map(|r| r.ok()).collect();

        assert_eq!(all[2].token, Token::DoubleQuote);
        assert_eq!(all[2].text, r#""a {0} \" b""#);
        assert_eq!(all[3].token, Token::Comma);
        assert_eq!(all[4].text, "x");
    }

    #[test]
    fn test_interpolated_string_with_nested_string() {
        let source = r#"$"v {x.ToString("D2")} w" + y"#;
        let all: Vec<_> = tokenize(source).into_iter().filter_map(|r| r.ok()).collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].token, Token::InterpolatedQuote);
        assert_eq!(all[0].text, r#"$"v {x.ToString("D2")} w""#);
        assert_eq!(all[2].text, "y");
    }

    #[test]
    fn test_verbatim_strings_span_lines() {
        let source = "@\"line1\nline \"\"2\"\"\" $@\"{a}\n\"";
        let all: Vec<_> = tokenize(source).into_iter().filter_map(|r| r.ok()).collect();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].token, Token::VerbatimQuote);
        assert_eq!(all[1].token, Token::InterpolatedVerbatimQuote);
        assert_eq!(all[1].span.end_line, 3);
    }

    #[test]
    fn test_unterminated_string() {
        let result = tokenize("\"abc\nx");
        assert!(matches!(
            result[0],
            Err(ParseError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_spans() {
        let source = "foo + bar";
        let tokens: Vec<_> = tokenize(source)
            .into_iter()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].span.start, tokens[0].span.end), (0, 3));
        assert_eq!(tokens[0].text, "foo");
        assert_eq!((tokens[1].span.start, tokens[1].span.end), (4, 5));
        assert_eq!((tokens[2].span.start, tokens[2].span.end), (6, 9));
    }

    #[test]
    fn test_range_lexer_reports_absolute_offsets() {
        let source = "$\"a {x.y} b\"";
        let map = SourceMap::new(source);
        let tokens: Vec<_> = Lexer::with_range(source, 5, 8, map)
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "x");
        assert_eq!(tokens[0].span.start, 5);
        assert_eq!(tokens[2].text, "y");
        assert_eq!(tokens[2].span.end, 8);
    }

    #[test]
    fn test_peek() {
        let mut lexer = Lexer::new("a b c");

        let peeked = lexer.peek().unwrap().as_ref().unwrap();
        assert_eq!(peeked.text, "a");
        let peeked = lexer.peek().unwrap().as_ref().unwrap();
        assert_eq!(peeked.text, "a");

        let next = lexer.next_token().unwrap().unwrap();
        assert_eq!(next.text, "a");
        let next = lexer.next_token().unwrap().unwrap();
        assert_eq!(next.text, "b");
    }
}
