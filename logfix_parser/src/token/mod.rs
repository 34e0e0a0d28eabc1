//! Token definitions for the C# expression lexer
//!
//! Covers the expression subset that appears around logging call sites.
//! Statement keywords (`var`, `class`, `return`, ...) lex as identifiers;
//! the tolerant parser treats them as ordinary names.

mod precedence;


use logos::Logos;

pub use precedence::{Associativity, Precedence};

/// C# tokens
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}]+")]
pub enum Token {
    // ==================== Keywords ====================
    #[token("this")]
    KwThis,
    #[token("base")]
    KwBase,
    #[token("new")]
    KwNew,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?.")]
    QuestionDot,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,

    // ==================== Assignment Operators ====================
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("??=")]
    QuestionQuestionEq,

    // ==================== Binary Operators ====================
    #[token("??")]
    QuestionQuestion,
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // ==================== Unary Operators ====================
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // ==================== Comments ====================
    /// Line comment or preprocessor directive
    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    /// Block comment start (handled specially by the lexer wrapper)
    #[token("/*")]
    BlockCommentStart,

    // ==================== Numeric Literals ====================
    #[regex(r"[0-9]([0-9]|_[0-9])*([uU][lL]?|[lL][uU]?)?")]
    IntegerLiteral,

    #[regex(r"0[xX][0-9a-fA-F]([0-9a-fA-F]|_[0-9a-fA-F])*([uU][lL]?|[lL][uU]?)?")]
    HexLiteral,

    #[regex(r"[0-9]([0-9]|_[0-9])*[fFdDmM]")]
    #[regex(r"[0-9]([0-9]|_[0-9])*\.[0-9]([0-9]|_[0-9])*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9]([0-9]|_[0-9])*[eE][+-]?[0-9]+[fFdDmM]?")]
    RealLiteral,

    // ==================== Character and String Openers ====================
    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    CharLiteral,

    /// `"` opening a regular string; the lexer extends the span to the closing quote
    #[token("\"")]
    DoubleQuote,

    /// `@"` opening a verbatim string
    #[token("@\"")]
    VerbatimQuote,

    /// `$"` opening an interpolated string
    #[token("$\"")]
    InterpolatedQuote,

    /// `$@"` or `@$"` opening a verbatim interpolated string
    #[token("$@\"")]
    #[token("@$\"")]
    InterpolatedVerbatimQuote,

    // ==================== Identifiers ====================
    /// Identifier, including verbatim identifiers such as `@class`
    #[regex(r"@?[_\p{XID_Start}][_\p{XID_Continue}]*")]
    Identifier,
}

impl Token {
    /// Get the precedence and associativity of a binary or assignment operator
    pub fn binary_precedence(&self) -> Option<(Precedence, Associativity)> {
        use Associativity::*;
        use Precedence::*;

        Some(match self {
            Token::FatArrow => (Lambda, Right),

            Token::Eq
            | Token::PlusEq
            | Token::MinusEq
            | Token::StarEq
            | Token::SlashEq
            | Token::PercentEq
            | Token::AmpEq
            | Token::PipeEq
            | Token::CaretEq
            | Token::QuestionQuestionEq => (Assignment, Right),

            Token::QuestionQuestion => (Coalesce, Right),
            Token::OrOr => (LogicalOr, Left),
            Token::AndAnd => (LogicalAnd, Left),
            Token::Pipe => (BitOr, Left),
            Token::Caret => (BitXor, Left),
            Token::Amp => (BitAnd, Left),
            Token::EqEq | Token::NotEq => (Equality, Left),
            Token::Lt | Token::Gt | Token::LtEq | Token::GtEq => (Relational, Left),
            Token::Plus | Token::Minus => (Additive, Left),
            Token::Star | Token::Slash | Token::Percent => (Multiplicative, Left),

            _ => return None,
        })
    }

    /// Get the precedence of a prefix unary operator
    pub fn unary_precedence(&self) -> Option<Precedence> {
        match self {
            Token::Plus
            | Token::Minus
            | Token::Bang
            | Token::Tilde
            | Token::PlusPlus
            | Token::MinusMinus => Some(Precedence::Unary),
            _ => None,
        }
    }

    /// Check if this token is an assignment (simple or compound)
    pub fn is_assignment(&self) -> bool {
        matches!(
            self.binary_precedence(),
            Some((Precedence::Assignment, _))
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::True
                | Token::False
                | Token::Null
                | Token::IntegerLiteral
                | Token::HexLiteral
                | Token::RealLiteral
                | Token::CharLiteral
        )
    }

    /// Check if this token opens a string literal of any flavour
    pub fn is_string_opener(&self) -> bool {
        matches!(
            self,
            Token::DoubleQuote
                | Token::VerbatimQuote
                | Token::InterpolatedQuote
                | Token::InterpolatedVerbatimQuote
        )
    }

    /// Check if this token can begin an expression
    pub fn starts_expression(&self) -> bool {
        self.is_literal()
            || self.is_string_opener()
            || self.unary_precedence().is_some()
            || matches!(
                self,
                Token::Identifier
                    | Token::KwThis
                    | Token::KwBase
                    | Token::KwNew
                    | Token::LParen
            )
    }
}
