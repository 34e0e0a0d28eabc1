//! NodeKind conversion methods (from_str, as_str)

use std::convert::Infallible;
use std::str::FromStr;

use super::NodeKind;

impl FromStr for NodeKind {
    type Err = Infallible;

    /// Convert from the snake_case kind name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "source_file" => NodeKind::SourceFile,

            // Names
            "identifier" => NodeKind::Identifier,
            "this_expression" => NodeKind::ThisExpression,
            "base_expression" => NodeKind::BaseExpression,

            // Literals
            "numeric_literal" => NodeKind::NumericLiteral,
            "string_literal" => NodeKind::StringLiteral,
            "character_literal" => NodeKind::CharacterLiteral,
            "boolean_literal" => NodeKind::BooleanLiteral,
            "null_literal" => NodeKind::NullLiteral,

            // Interpolated strings
            "interpolated_string" => NodeKind::InterpolatedString,
            "interpolated_text" => NodeKind::InterpolatedText,
            "interpolation" => NodeKind::Interpolation,
            "interpolation_alignment" => NodeKind::InterpolationAlignment,
            "interpolation_format" => NodeKind::InterpolationFormat,

            // Access and invocation
            "member_access" => NodeKind::MemberAccess,
            "conditional_access" => NodeKind::ConditionalAccess,
            "invocation" => NodeKind::Invocation,
            "argument_list" => NodeKind::ArgumentList,
            "named_argument" => NodeKind::NamedArgument,
            "element_access" => NodeKind::ElementAccess,
            "bracketed_argument_list" => NodeKind::BracketedArgumentList,
            "object_creation" => NodeKind::ObjectCreation,
            "type_name" => NodeKind::TypeName,

            // Operators
            "parenthesized_expression" => NodeKind::ParenthesizedExpression,
            "unary_expression" => NodeKind::UnaryExpression,
            "cast_expression" => NodeKind::CastExpression,
            "postfix_expression" => NodeKind::PostfixExpression,
            "binary_expression" => NodeKind::BinaryExpression,
            "assignment" => NodeKind::Assignment,
            "conditional_expression" => NodeKind::ConditionalExpression,
            "lambda_expression" => NodeKind::LambdaExpression,
            "operator" => NodeKind::Operator,
            "block" => NodeKind::Block,

            "ERROR" => NodeKind::Error,
            _ => NodeKind::Unknown,
        })
    }
}

impl NodeKind {
    /// Convert to the snake_case kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",

            NodeKind::Identifier => "identifier",
            NodeKind::ThisExpression => "this_expression",
            NodeKind::BaseExpression => "base_expression",

            NodeKind::NumericLiteral => "numeric_literal",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::CharacterLiteral => "character_literal",
            NodeKind::BooleanLiteral => "boolean_literal",
            NodeKind::NullLiteral => "null_literal",

            NodeKind::InterpolatedString => "interpolated_string",
            NodeKind::InterpolatedText => "interpolated_text",
            NodeKind::Interpolation => "interpolation",
            NodeKind::InterpolationAlignment => "interpolation_alignment",
            NodeKind::InterpolationFormat => "interpolation_format",

            NodeKind::MemberAccess => "member_access",
            NodeKind::ConditionalAccess => "conditional_access",
            NodeKind::Invocation => "invocation",
            NodeKind::ArgumentList => "argument_list",
            NodeKind::NamedArgument => "named_argument",
            NodeKind::ElementAccess => "element_access",
            NodeKind::BracketedArgumentList => "bracketed_argument_list",
            NodeKind::ObjectCreation => "object_creation",
            NodeKind::TypeName => "type_name",

            NodeKind::ParenthesizedExpression => "parenthesized_expression",
            NodeKind::UnaryExpression => "unary_expression",
            NodeKind::CastExpression => "cast_expression",
            NodeKind::PostfixExpression => "postfix_expression",
            NodeKind::BinaryExpression => "binary_expression",
            NodeKind::Assignment => "assignment",
            NodeKind::ConditionalExpression => "conditional_expression",
            NodeKind::LambdaExpression => "lambda_expression",
            NodeKind::Operator => "operator",
            NodeKind::Block => "block",

            NodeKind::Error => "ERROR",
            NodeKind::Unknown => "unknown",
        }
    }
}
