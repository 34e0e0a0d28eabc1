//! CST shape tests: fields, spans and interpolation decomposition

use logfix_parser::{parse, parse_expression, CstNode, NodeKind};
use pretty_assertions::assert_eq;

fn expr(source: &str) -> CstNode {
    parse_expression(source).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", source, e))
}

fn assert_node_kind(node: &CstNode, expected: NodeKind) {
    assert_eq!(node.kind, expected, "\n{}", node.outline());
}

fn assert_field_kind(node: &CstNode, field: &str, expected: NodeKind) {
    let child = node
        .child_by_field(field)
        .unwrap_or_else(|| panic!("missing field {:?}\n{}", field, node.outline()));
    assert_eq!(child.kind, expected, "\n{}", node.outline());
}

fn assert_child_count(node: &CstNode, expected: usize) {
    assert_eq!(node.children.len(), expected, "\n{}", node.outline());
}

#[test]
fn test_invocation_fields() {
    let node = expr("_logger.LogInformation(ex, \"Value\")");

    assert_node_kind(&node, NodeKind::Invocation);
    assert_field_kind(&node, "function", NodeKind::MemberAccess);
    assert_field_kind(&node, "arguments", NodeKind::ArgumentList);

    let arguments = node.child_by_field("arguments").unwrap();
    assert_child_count(arguments, 2);
    assert_eq!(arguments.span.start, 22);
    assert_eq!(arguments.span.end, node.span.end);
}

#[test]
fn test_member_access_chain_nests_left() {
    let source = "type?.Assembly?.EntryPoint?.Name";
    let node = expr(source);

    assert_node_kind(&node, NodeKind::ConditionalAccess);
    assert_eq!(
        node.child_by_field("name").and_then(|n| n.text_str()),
        Some("Name")
    );
    let receiver = node.child_by_field("expression").unwrap();
    assert_eq!(
        receiver.text_from_source(source),
        "type?.Assembly?.EntryPoint"
    );
}

#[test]
fn test_interpolated_string_decomposition() {
    let source = "$\"Value: {ex.Message,5:D2} - {{raw}} {1}\"";
    let node = expr(source);

    assert_node_kind(&node, NodeKind::InterpolatedString);
    assert_eq!(node.text_str(), Some("$\""));

    let kinds: Vec<_> = node.children.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::InterpolatedText,
            NodeKind::Interpolation,
            NodeKind::InterpolatedText,
            NodeKind::Interpolation,
        ]
    );
    assert_eq!(node.children[0].text_str(), Some("Value: "));
    assert_eq!(node.children[2].text_str(), Some(" - {{raw}} "));

    let hole = &node.children[1];
    assert_eq!(hole.text_from_source(source), "{ex.Message,5:D2}");
    assert_field_kind(hole, "expression", NodeKind::MemberAccess);
    assert_eq!(
        hole.child_by_field("alignment").and_then(|n| n.text_str()),
        Some(",5")
    );
    assert_eq!(
        hole.child_by_field("format").and_then(|n| n.text_str()),
        Some(":D2")
    );

    let inner = hole.child_by_field("expression").unwrap();
    assert_eq!(inner.text_from_source(source), "ex.Message");
}

#[test]
fn test_hole_spans_are_absolute() {
    let source = "x;\n_logger.LogError($\"Failed: {ex?.GetType()}\");";
    let cst = parse(source).unwrap();

    let call = cst
        .walk()
        .find(|n| n.kind == NodeKind::Invocation && n.text_from_source(source) == "ex?.GetType()")
        .expect("hole invocation");
    assert_eq!(call.span.start_line, 2);
    assert_eq!(&source[call.span.start..call.span.end], "ex?.GetType()");
}

#[test]
fn test_verbatim_interpolated_prefix() {
    let node = expr("@$\"path {dir}\\file\"");
    assert_eq!(node.text_str(), Some("@$\""));
    assert_eq!(node.children.last().unwrap().text_str(), Some("\\file"));
}

#[test]
fn test_named_argument() {
    let node = expr("Log(message: text)");
    let arguments = node.child_by_field("arguments").unwrap();

    assert_node_kind(&arguments.children[0], NodeKind::NamedArgument);
    assert_field_kind(&arguments.children[0], "value", NodeKind::Identifier);
}

#[test]
fn test_object_creation_fields() {
    let node = expr("new ArgumentException(\"bad\", nameof(value))");

    assert_node_kind(&node, NodeKind::ObjectCreation);
    assert_eq!(
        node.child_by_field("type").and_then(|n| n.text_str()),
        Some("ArgumentException")
    );
    assert_child_count(node.child_by_field("arguments").unwrap(), 2);
}

#[test]
fn test_precedence() {
    let node = expr("a ?? b + c * d");
    assert_node_kind(&node, NodeKind::BinaryExpression);
    assert_eq!(node.children[1].text_str(), Some("??"));

    let node = expr("x = a ? b : c");
    assert_node_kind(&node, NodeKind::Assignment);
    assert_node_kind(&node.children[2], NodeKind::ConditionalExpression);

    let node = expr("-a.b");
    assert_node_kind(&node, NodeKind::UnaryExpression);
    assert_node_kind(&node.children[1], NodeKind::MemberAccess);
}

#[test]
fn test_path_to_offset() {
    let source = "_logger.LogInformation($\"{value}\")";
    let cst = parse(source).unwrap();

    let offset = source.find("value").unwrap();
    let path = cst.path_to(offset);
    let kinds: Vec<_> = path.iter().map(|n| n.kind).collect();

    assert_eq!(
        kinds,
        vec![
            NodeKind::SourceFile,
            NodeKind::Invocation,
            NodeKind::ArgumentList,
            NodeKind::InterpolatedString,
            NodeKind::Interpolation,
            NodeKind::Identifier,
        ]
    );
}

#[test]
fn test_json_export() {
    let node = expr("a.b");
    let json = node.to_json();

    assert_eq!(json["kind"], "member_access");
    assert_eq!(json["children"].as_array().map(|c| c.len()), Some(2));
    assert_eq!(CstNode::from_json(&json).map(|n| n.kind), Some(NodeKind::MemberAccess));
}
