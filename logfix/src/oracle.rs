//! Declaration-scanning type oracle
//!
//! A lightweight stand-in for a semantic model. It records the declared type
//! of every local, field and parameter it can recognise in a document
//! (`Exception ex = null;`, `var ex = new IOException();`,
//! `catch (TimeoutException ex)`) and resolves base types from a table of
//! well-known exception types plus the `[types]` section of `logfix.toml`.
//! Scopes are not tracked: a use resolves to the nearest declaration of the
//! same name before it, or the first one after it (fields declared below
//! the method that uses them).

use std::collections::HashMap;

use logfix_parser::{tokenize, CstNode, NodeKind, SpannedToken, Token};

use crate::config::FixOptions;
use crate::types::{literal_type_name, numeric_type_name, simple_name, TypeInfo, TypeOracle};

/// Well-known exception types and their direct base type
const BUILTIN_HIERARCHY: &[(&str, &str)] = &[
    ("SystemException", "Exception"),
    ("ApplicationException", "Exception"),
    ("AggregateException", "Exception"),
    ("HttpRequestException", "Exception"),
    ("JsonException", "Exception"),
    ("ArgumentException", "SystemException"),
    ("ArgumentNullException", "ArgumentException"),
    ("ArgumentOutOfRangeException", "ArgumentException"),
    ("InvalidOperationException", "SystemException"),
    ("ObjectDisposedException", "InvalidOperationException"),
    ("NotSupportedException", "SystemException"),
    ("NotImplementedException", "SystemException"),
    ("NullReferenceException", "SystemException"),
    ("FormatException", "SystemException"),
    ("IndexOutOfRangeException", "SystemException"),
    ("KeyNotFoundException", "SystemException"),
    ("TimeoutException", "SystemException"),
    ("UnauthorizedAccessException", "SystemException"),
    ("OperationCanceledException", "SystemException"),
    ("TaskCanceledException", "OperationCanceledException"),
    ("IOException", "SystemException"),
    ("FileNotFoundException", "IOException"),
    ("DirectoryNotFoundException", "IOException"),
];

/// Identifiers that look like a type in `word name =` but never are
const NOT_A_TYPE: &[&str] = &[
    "return", "throw", "await", "yield", "using", "namespace", "class", "struct",
    "interface", "enum", "record", "goto", "case", "else", "in", "out", "ref", "is",
    "as", "not", "and", "or", "typeof", "sizeof", "default", "const", "static",
    "readonly", "public", "private", "protected", "internal", "params", "event",
];

/// Type oracle backed by declarations found in the document text
#[derive(Debug, Clone, Default)]
pub struct DeclarationOracle {
    /// Declarations per name, in source order
    variables: HashMap<String, Vec<(usize, String)>>,
    hierarchy: HashMap<String, String>,
}

impl DeclarationOracle {
    /// Oracle with the built-in exception hierarchy and configured types
    pub fn new(options: &FixOptions) -> Self {
        let mut oracle = Self::default();
        for (derived, base) in BUILTIN_HIERARCHY {
            oracle.declare_type(*derived, *base);
        }
        for (derived, base) in &options.types {
            oracle.declare_type(derived, base);
        }
        oracle
    }

    /// Oracle primed with every declaration found in `source`
    pub fn from_source(source: &str, options: &FixOptions) -> Self {
        let mut oracle = Self::new(options);
        oracle.scan(source);
        oracle
    }

    /// Record the declared type of a variable, visible everywhere
    pub fn declare(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.declare_at(name, 0, type_name);
    }

    /// Record a declaration made at byte `offset`
    pub fn declare_at(&mut self, name: impl Into<String>, offset: usize, type_name: impl Into<String>) {
        let declarations = self.variables.entry(name.into()).or_default();
        let at = declarations.partition_point(|(o, _)| *o <= offset);
        declarations.insert(at, (offset, type_name.into()));
    }

    /// Record that `derived` directly inherits from `base`
    pub fn declare_type(&mut self, derived: impl AsRef<str>, base: impl AsRef<str>) {
        self.hierarchy.insert(
            simple_name(derived.as_ref()).to_string(),
            simple_name(base.as_ref()).to_string(),
        );
    }

    /// Type of the last declaration of `name`
    pub fn variable_type(&self, name: &str) -> Option<&str> {
        self.variables
            .get(name)
            .and_then(|declarations| declarations.last())
            .map(|(_, ty)| ty.as_str())
    }

    /// Type of `name` as seen from byte `offset`
    pub fn variable_type_at(&self, name: &str, offset: usize) -> Option<&str> {
        let declarations = self.variables.get(name)?;
        let visible = declarations.partition_point(|(o, _)| *o <= offset);
        let (_, ty) = match visible {
            0 => declarations.first()?,
            n => &declarations[n - 1],
        };
        Some(ty)
    }

    /// Type info for `type_name` with its base chain resolved
    pub fn describe(&self, type_name: &str) -> TypeInfo {
        let mut bases = Vec::new();
        let mut current = simple_name(type_name);
        while let Some(base) = self.hierarchy.get(current) {
            if base == simple_name(type_name) || bases.contains(base) {
                break;
            }
            bases.push(base.clone());
            current = base;
        }
        TypeInfo::new(type_name).with_base_types(bases)
    }

    /// Scan `source` for declarations
    pub fn scan(&mut self, source: &str) {
        let tokens: Vec<SpannedToken<'_>> = tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|t| !t.is_trivia())
            .collect();

        for i in 0..tokens.len() {
            if let Some((name, type_name)) = declaration_at(source, &tokens, i) {
                self.declare_at(name.text, name.span.start, type_name);
            }
        }
    }
}

impl TypeOracle for DeclarationOracle {
    fn type_of(&self, expression: &CstNode, source: &str) -> Option<TypeInfo> {
        match expression.kind {
            NodeKind::Identifier => {
                let name = expression.text_from_source(source);
                self.variable_type_at(name, expression.span.start)
                    .map(|ty| self.describe(ty))
            }
            NodeKind::MemberAccess => {
                let receiver = expression.child_by_field("expression")?;
                if receiver.kind != NodeKind::ThisExpression {
                    return None;
                }
                let name = expression.child_by_field("name")?;
                self.variable_type_at(name.text_from_source(source), name.span.start)
                    .map(|ty| self.describe(ty))
            }
            NodeKind::ParenthesizedExpression => match expression.children.as_slice() {
                [inner] => self.type_of(inner, source),
                _ => None,
            },
            NodeKind::CastExpression | NodeKind::ObjectCreation => {
                let ty = expression.child_by_field("type")?;
                Some(self.describe(ty.text_from_source(source)))
            }
            _ => literal_type_name(expression, source).map(TypeInfo::new),
        }
    }
}

/// Recognise a declaration whose type starts at `tokens[i]`
fn declaration_at<'t, 'a>(
    source: &'a str,
    tokens: &'t [SpannedToken<'a>],
    i: usize,
) -> Option<(&'t SpannedToken<'a>, String)> {
    let first = tokens.get(i)?;
    if first.token != Token::Identifier || NOT_A_TYPE.contains(&first.text) {
        return None;
    }
    // The type must start here, not continue a dotted name
    if i > 0 && matches!(tokens[i - 1].token, Token::Dot | Token::QuestionDot) {
        return None;
    }

    // Dotted type name, optionally nullable
    let mut end = i;
    while matches!(tokens.get(end + 1).map(|t| &t.token), Some(Token::Dot))
        && matches!(tokens.get(end + 2).map(|t| &t.token), Some(Token::Identifier))
    {
        end += 2;
    }
    let type_end = tokens[end].span.end;
    let mut next = end + 1;
    if matches!(tokens.get(next).map(|t| &t.token), Some(Token::Question)) {
        next += 1;
    }

    let name = tokens.get(next)?;
    if name.token != Token::Identifier {
        return None;
    }
    let after = tokens.get(next + 1)?;

    if first.text == "var" && end == i {
        // `var name = new T(...)` or `var name = <literal>`
        if after.token != Token::Eq {
            return None;
        }
        let init = tokens.get(next + 2)?;
        let type_name = match init.token {
            Token::KwNew => {
                let ty = tokens.get(next + 3)?;
                if ty.token != Token::Identifier {
                    return None;
                }
                let mut ty_end = next + 3;
                while matches!(tokens.get(ty_end + 1).map(|t| &t.token), Some(Token::Dot))
                    && matches!(tokens.get(ty_end + 2).map(|t| &t.token), Some(Token::Identifier))
                {
                    ty_end += 2;
                }
                source[ty.span.start..tokens[ty_end].span.end].to_string()
            }
            _ => literal_token_type(init)?.to_string(),
        };
        return Some((name, type_name));
    }

    match after.token {
        Token::Eq | Token::Semicolon | Token::Comma | Token::RParen => {
            Some((name, source[first.span.start..type_end].to_string()))
        }
        _ => None,
    }
}

fn literal_token_type(token: &SpannedToken<'_>) -> Option<&'static str> {
    match token.token {
        Token::IntegerLiteral | Token::HexLiteral | Token::RealLiteral => {
            Some(numeric_type_name(token.text))
        }
        Token::DoubleQuote | Token::VerbatimQuote => Some("String"),
        Token::CharLiteral => Some("Char"),
        Token::True | Token::False => Some("Boolean"),
        _ => None,
    }
}
