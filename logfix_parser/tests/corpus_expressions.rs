//! Expression corpus: the shapes that show up around logging call sites

use logfix_parser::{parse, parse_expression, parse_with_errors, NodeKind};

fn assert_parses(source: &str) {
    let result = parse(source);
    assert!(
        result.is_ok(),
        "Failed to parse: {}\nError: {:?}",
        source,
        result.err()
    );
}

fn assert_root_child_kind(source: &str, expected_kind: NodeKind) {
    let cst = parse(source).unwrap_or_else(|_| panic!("Failed to parse: {}", source));
    assert_eq!(cst.kind, NodeKind::SourceFile);
    assert!(!cst.children.is_empty(), "Expected at least one child");
    assert_eq!(
        cst.children[0].kind, expected_kind,
        "Expected {:?}, got {:?} for source: {}",
        expected_kind, cst.children[0].kind, source
    );
}

// =============================================================================
// Names and literals
// =============================================================================

#[test]
fn test_identifiers() {
    assert_root_child_kind("foo", NodeKind::Identifier);
    assert_root_child_kind("_logger", NodeKind::Identifier);
    assert_root_child_kind("@default", NodeKind::Identifier);
    assert_root_child_kind("this", NodeKind::ThisExpression);
    assert_root_child_kind("base", NodeKind::BaseExpression);
}

#[test]
fn test_literals() {
    assert_root_child_kind("1", NodeKind::NumericLiteral);
    assert_root_child_kind("1f", NodeKind::NumericLiteral);
    assert_root_child_kind("0xFFUL", NodeKind::NumericLiteral);
    assert_root_child_kind("'c'", NodeKind::CharacterLiteral);
    assert_root_child_kind("true", NodeKind::BooleanLiteral);
    assert_root_child_kind("null", NodeKind::NullLiteral);
    assert_root_child_kind("\"text\"", NodeKind::StringLiteral);
    assert_root_child_kind("@\"C:\\path\"", NodeKind::StringLiteral);
}

// =============================================================================
// Access and invocation
// =============================================================================

#[test]
fn test_member_access() {
    assert_root_child_kind("a.b", NodeKind::MemberAccess);
    assert_root_child_kind("a.b.c", NodeKind::MemberAccess);
    assert_root_child_kind("a?.b", NodeKind::ConditionalAccess);
    assert_root_child_kind("1.ToString", NodeKind::MemberAccess);
}

#[test]
fn test_invocations() {
    assert_root_child_kind("f()", NodeKind::Invocation);
    assert_root_child_kind("a.b(c, d)", NodeKind::Invocation);
    assert_root_child_kind("ex?.GetType()", NodeKind::Invocation);
    assert_root_child_kind("nameof(ex)", NodeKind::Invocation);
    assert_root_child_kind("f(name: value)", NodeKind::Invocation);
}

#[test]
fn test_element_access_and_postfix() {
    assert_root_child_kind("items[0]", NodeKind::ElementAccess);
    assert_root_child_kind("i++", NodeKind::PostfixExpression);
    assert_root_child_kind("value!", NodeKind::PostfixExpression);
}

#[test]
fn test_object_creation() {
    assert_root_child_kind("new Exception()", NodeKind::ObjectCreation);
    assert_root_child_kind("new System.IO.IOException(\"x\")", NodeKind::ObjectCreation);
    assert_root_child_kind("new List<int> { 1, 2 }", NodeKind::ObjectCreation);
    assert_root_child_kind("new()", NodeKind::ObjectCreation);
    assert_root_child_kind("new[] { a, b }", NodeKind::ObjectCreation);
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn test_operators() {
    assert_root_child_kind("a + b * c", NodeKind::BinaryExpression);
    assert_root_child_kind("a ?? b", NodeKind::BinaryExpression);
    assert_root_child_kind("x = y", NodeKind::Assignment);
    assert_root_child_kind("x += 1", NodeKind::Assignment);
    assert_root_child_kind("!ok", NodeKind::UnaryExpression);
    assert_root_child_kind("await task", NodeKind::UnaryExpression);
    assert_root_child_kind("c ? a : b", NodeKind::ConditionalExpression);
    assert_root_child_kind("x is not null", NodeKind::BinaryExpression);
    assert_root_child_kind("(int)value", NodeKind::CastExpression);
    assert_root_child_kind("(a + b)", NodeKind::ParenthesizedExpression);
}

#[test]
fn test_lambdas() {
    assert_root_child_kind("x => x.Name", NodeKind::LambdaExpression);
    assert_root_child_kind("() => Run()", NodeKind::LambdaExpression);
    assert_root_child_kind("(a, b) => a + b", NodeKind::LambdaExpression);
    assert_root_child_kind("x => { Log(x); }", NodeKind::LambdaExpression);
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_interpolated_strings() {
    assert_root_child_kind("$\"Value: {x}\"", NodeKind::InterpolatedString);
    assert_root_child_kind("$@\"Value: {x}\"", NodeKind::InterpolatedString);
    assert_root_child_kind("@$\"Value: {x}\"", NodeKind::InterpolatedString);
    assert_parses("$\"{a,5:D2} {b:yyyy-MM-dd} {{literal}}\"");
    assert_parses("$\"{x.ToString(\"D2\")}\"");
    assert_parses("$\"outer {$\"inner {y}\"}\"");
}

#[test]
fn test_invalid_interpolation_is_an_error() {
    assert!(parse("$\"Value: { }\"").is_err());
    assert!(parse("$\"Value: {x\"").is_err());
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn test_document_statements_are_tolerated() {
    let source = r#"
using System;
using Microsoft.Extensions.Logging;

namespace TestNamespace;

class TestClass
{
    private ILogger _logger = NullLogger.Instance;

    public TestClass()
    {
        Exception ex = null;
        _logger.LogInformation($"Value: {ex.Message}");
    }
}
"#;
    let (cst, _) = parse_with_errors(source);

    let invocation = cst
        .walk()
        .find(|n| {
            n.kind == NodeKind::Invocation
                && n.text_from_source(source).starts_with("_logger.LogInformation")
        })
        .expect("logging invocation should be found");
    assert_eq!(
        invocation.text_from_source(source),
        "_logger.LogInformation($\"Value: {ex.Message}\")"
    );
}

#[test]
fn test_errors_do_not_stop_the_document_parse() {
    let source = "void M(string text) { _logger.LogWarning(\"{0}\", text); }";
    let (cst, errors) = parse_with_errors(source);

    assert!(!errors.is_empty());
    assert!(cst
        .walk()
        .any(|n| n.kind == NodeKind::Invocation
            && n.text_from_source(source) == "_logger.LogWarning(\"{0}\", text)"));
}

#[test]
fn test_parse_expression_is_strict() {
    assert!(parse_expression("_logger.LogInformation(\"Value: {Value}\", value)").is_ok());
    assert!(parse_expression("x;").is_err());
    assert!(parse_expression("").is_err());
}
