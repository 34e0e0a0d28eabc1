//! Node kinds for the C# expression CST
//!
//! Names follow the Roslyn syntax kinds they stand in for, in snake_case.

mod convert;
mod predicates;


use serde::{Deserialize, Serialize};

/// CST node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // ==================== Top Level ====================
    /// Root node: every top-level expression found in the document
    SourceFile,

    // ==================== Names ====================
    /// Simple name: `ex`, `_logger`, `@default`
    Identifier,
    /// `this`
    ThisExpression,
    /// `base`
    BaseExpression,

    // ==================== Literals ====================
    /// Integer or real literal, suffix included: `1`, `1f`, `0xFFu`
    NumericLiteral,
    /// Regular or verbatim string: `"a"`, `@"a"`
    StringLiteral,
    /// `'c'`
    CharacterLiteral,
    /// `true` / `false`
    BooleanLiteral,
    /// `null`
    NullLiteral,

    // ==================== Interpolated Strings ====================
    /// `$"..."` or `$@"..."`
    InterpolatedString,
    /// Raw text run between holes (escapes and doubled braces kept verbatim)
    InterpolatedText,
    /// One hole: `{expr,alignment:format}`
    Interpolation,
    /// `,5` inside a hole
    InterpolationAlignment,
    /// `:D2` inside a hole
    InterpolationFormat,

    // ==================== Access and Invocation ====================
    /// `a.b`
    MemberAccess,
    /// `a?.b`
    ConditionalAccess,
    /// `f(args)`
    Invocation,
    /// `(a, b)` including the parentheses
    ArgumentList,
    /// `name: value` inside an argument list
    NamedArgument,
    /// `a[i]`
    ElementAccess,
    /// `[i, j]` including the brackets
    BracketedArgumentList,
    /// `new T(args)`
    ObjectCreation,
    /// Type name after `new`, generic arguments included
    TypeName,

    // ==================== Operators ====================
    /// `(expr)`
    ParenthesizedExpression,
    /// `-x`, `!x`, `++x`, `await x`
    UnaryExpression,
    /// `(T)x`
    CastExpression,
    /// `x++`, `x--`
    PostfixExpression,
    /// `a + b`, `a ?? b`, ...
    BinaryExpression,
    /// `a = b`, `a += b`, ...
    Assignment,
    /// `c ? a : b`
    ConditionalExpression,
    /// `x => body`
    LambdaExpression,
    /// Operator leaf inside unary/binary/assignment nodes
    Operator,
    /// `{ ... }` lambda body or initializer; children are the expressions inside
    Block,

    // ==================== Other ====================
    /// Error recovery node
    Error,

    /// Unknown node type (fallback)
    Unknown,
}

impl NodeKind {
    /// Every variant, in declaration order
    pub fn all_variants() -> &'static [NodeKind] {
        &[
            // Top Level
            NodeKind::SourceFile,
            // Names
            NodeKind::Identifier,
            NodeKind::ThisExpression,
            NodeKind::BaseExpression,
            // Literals
            NodeKind::NumericLiteral,
            NodeKind::StringLiteral,
            NodeKind::CharacterLiteral,
            NodeKind::BooleanLiteral,
            NodeKind::NullLiteral,
            // Interpolated strings
            NodeKind::InterpolatedString,
            NodeKind::InterpolatedText,
            NodeKind::Interpolation,
            NodeKind::InterpolationAlignment,
            NodeKind::InterpolationFormat,
            // Access and invocation
            NodeKind::MemberAccess,
            NodeKind::ConditionalAccess,
            NodeKind::Invocation,
            NodeKind::ArgumentList,
            NodeKind::NamedArgument,
            NodeKind::ElementAccess,
            NodeKind::BracketedArgumentList,
            NodeKind::ObjectCreation,
            NodeKind::TypeName,
            // Operators
            NodeKind::ParenthesizedExpression,
            NodeKind::UnaryExpression,
            NodeKind::CastExpression,
            NodeKind::PostfixExpression,
            NodeKind::BinaryExpression,
            NodeKind::Assignment,
            NodeKind::ConditionalExpression,
            NodeKind::LambdaExpression,
            NodeKind::Operator,
            NodeKind::Block,
            // Other
            NodeKind::Error,
            NodeKind::Unknown,
        ]
    }

    /// Fails to compile when a variant is added without a match arm here,
    /// which is the reminder to extend `all_variants` as well
    #[cfg(test)]
    fn variant_count() -> usize {
        fn _exhaustive_check(k: NodeKind) -> u8 {
            match k {
                NodeKind::SourceFile => 0,
                NodeKind::Identifier => 0,
                NodeKind::ThisExpression => 0,
                NodeKind::BaseExpression => 0,
                NodeKind::NumericLiteral => 0,
                NodeKind::StringLiteral => 0,
                NodeKind::CharacterLiteral => 0,
                NodeKind::BooleanLiteral => 0,
                NodeKind::NullLiteral => 0,
                NodeKind::InterpolatedString => 0,
                NodeKind::InterpolatedText => 0,
                NodeKind::Interpolation => 0,
                NodeKind::InterpolationAlignment => 0,
                NodeKind::InterpolationFormat => 0,
                NodeKind::MemberAccess => 0,
                NodeKind::ConditionalAccess => 0,
                NodeKind::Invocation => 0,
                NodeKind::ArgumentList => 0,
                NodeKind::NamedArgument => 0,
                NodeKind::ElementAccess => 0,
                NodeKind::BracketedArgumentList => 0,
                NodeKind::ObjectCreation => 0,
                NodeKind::TypeName => 0,
                NodeKind::ParenthesizedExpression => 0,
                NodeKind::UnaryExpression => 0,
                NodeKind::CastExpression => 0,
                NodeKind::PostfixExpression => 0,
                NodeKind::BinaryExpression => 0,
                NodeKind::Assignment => 0,
                NodeKind::ConditionalExpression => 0,
                NodeKind::LambdaExpression => 0,
                NodeKind::Operator => 0,
                NodeKind::Block => 0,
                NodeKind::Error => 0,
                NodeKind::Unknown => 0,
            }
        }
        NodeKind::all_variants().len()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
