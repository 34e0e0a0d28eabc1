//! Concrete syntax tree
//!
//! Nodes keep absolute spans into the parsed document, so a node found
//! anywhere in the tree can be sliced straight out of the source text.
//! Children that play a named role in their parent (`expression`, `name`,
//! `arguments`, ...) carry that role as their `field`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::node_kind::NodeKind;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<CstNode>,

    /// Token text for leaves; the opener (`$"`, `$@"`) for interpolated strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Role of this node in its parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl CstNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self::with_children(kind, span, Vec::new())
    }

    pub fn leaf(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        let mut node = Self::new(kind, span);
        node.text = Some(text.into());
        node
    }

    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            kind,
            span,
            children,
            text: None,
            field: None,
        }
    }

    /// Append `child` under the role `field`
    pub fn push_field(&mut self, field: impl Into<String>, mut child: CstNode) {
        child.field = Some(field.into());
        self.children.push(child);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// First child playing the role `field`
    pub fn child_by_field(&self, field: &str) -> Option<&CstNode> {
        self.children
            .iter()
            .find(|c| c.field.as_deref() == Some(field))
    }

    pub fn text_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Slice of `source` covered by this node
    pub fn text_from_source<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }

    /// Pre-order traversal, this node first
    pub fn walk(&self) -> CstWalker<'_> {
        CstWalker { stack: vec![self] }
    }

    /// This node and every descendant whose span contains `offset`,
    /// outermost first. Empty when `offset` is outside this node.
    pub fn path_to(&self, offset: usize) -> Vec<&CstNode> {
        let mut path = Vec::new();
        let mut next = Some(self).filter(|n| n.span.contains(offset));
        while let Some(node) = next {
            path.push(node);
            next = node.children.iter().find(|c| c.span.contains(offset));
        }
        path
    }

    /// JSON export: `kind`, `range` (byte offsets), `from`/`to` (line, column),
    /// then `field`, `text` and `children` when present
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "kind": self.kind.as_str(),
            "range": [self.span.start, self.span.end],
            "from": [self.span.start_line, self.span.start_column],
            "to": [self.span.end_line, self.span.end_column],
        });
        if let Some(field) = &self.field {
            value["field"] = json!(field);
        }
        if let Some(text) = &self.text {
            value["text"] = json!(text);
        }
        if !self.children.is_empty() {
            value["children"] = self.children.iter().map(CstNode::to_json).collect();
        }
        value
    }

    /// Inverse of [`to_json`](Self::to_json)
    pub fn from_json(value: &Value) -> Option<Self> {
        let pair = |key: &str| -> Option<(usize, usize)> {
            match value.get(key)?.as_array()?.as_slice() {
                [a, b] => Some((a.as_u64()? as usize, b.as_u64()? as usize)),
                _ => None,
            }
        };
        let (start, end) = pair("range")?;
        let (start_line, start_column) = pair("from")?;
        let (end_line, end_column) = pair("to")?;

        let children = match value.get("children") {
            Some(children) => children
                .as_array()?
                .iter()
                .map(CstNode::from_json)
                .collect::<Option<Vec<_>>>()?,
            None => Vec::new(),
        };
        let string = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            kind: value.get("kind")?.as_str()?.parse().ok()?,
            span: Span::new(start, end, start_line, end_line, start_column, end_column),
            children,
            text: string("text"),
            field: string("field"),
        })
    }

    /// Indented outline of the subtree, one node per line:
    ///
    /// ```text
    /// MemberAccess
    ///   expression: Identifier "ex"
    ///   name: Identifier "Message"
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (depth, node) in self.walk_with_depth() {
            out.push_str(&"  ".repeat(depth));
            if let Some(field) = &node.field {
                out.push_str(field);
                out.push_str(": ");
            }
            out.push_str(&format!("{:?}", node.kind));
            if let Some(text) = &node.text {
                out.push_str(&format!(" {:?}", text));
            }
            out.push('\n');
        }
        out
    }

    fn walk_with_depth(&self) -> Vec<(usize, &CstNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug)]
pub struct CstWalker<'a> {
    stack: Vec<&'a CstNode>,
}

impl<'a> Iterator for CstWalker<'a> {
    type Item = &'a CstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Assertions that print the subtree outline when they fail
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::*;

    #[track_caller]
    fn fail(node: &CstNode, message: String) -> ! {
        panic!("{message}\n--- tree ---\n{}", node.outline());
    }

    #[track_caller]
    pub fn assert_node_kind(node: &CstNode, expected: NodeKind) {
        if node.kind != expected {
            fail(node, format!("expected {:?}, found {:?}", expected, node.kind));
        }
    }

    #[track_caller]
    pub fn assert_node_text(node: &CstNode, expected: &str) {
        if node.text_str() != Some(expected) {
            fail(node, format!("expected text {:?}, found {:?}", expected, node.text));
        }
    }

    #[track_caller]
    pub fn assert_child_count(node: &CstNode, expected: usize) {
        if node.children.len() != expected {
            fail(node, format!("expected {} children, found {}", expected, node.children.len()));
        }
    }

    #[track_caller]
    pub fn assert_field_kind(node: &CstNode, field: &str, expected: NodeKind) {
        match node.child_by_field(field) {
            Some(child) if child.kind == expected => {}
            Some(child) => fail(node, format!("field {field:?}: expected {expected:?}, found {:?}", child.kind)),
            None => fail(node, format!("no field {field:?}")),
        }
    }
}
