//! Static type information consumed by the rewrite engine
//!
//! The engine never evaluates code. It asks a [`TypeOracle`] for the static
//! type of an expression twice: to spot error values that should be hoisted
//! into the dedicated error argument, and to name literal arguments bound to
//! positional placeholders.

use logfix_parser::{CstNode, NodeKind};
use serde::{Deserialize, Serialize};

/// Static type of an expression and its base-type chain (nearest first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub base_types: Vec<String>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_types: Vec::new(),
        }
    }

    pub fn with_base_types<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_types = bases.into_iter().map(Into::into).collect();
        self
    }

    /// Name without its namespace (`System.IO.IOException` -> `IOException`)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// True when this type is `base` or has it somewhere in its chain.
    ///
    /// Names are compared without namespaces, so `System.Exception` matches
    /// a chain entry written as `Exception`.
    pub fn derives_from(&self, base: &str) -> bool {
        let base = simple_name(base);
        std::iter::once(&self.name)
            .chain(self.base_types.iter())
            .any(|ty| simple_name(ty) == base)
    }
}

pub(crate) fn simple_name(name: &str) -> &str {
    let name = name.trim_end_matches('?');
    name.rsplit('.').next().unwrap_or(name)
}

/// Read-only type lookup supplied by the host
pub trait TypeOracle {
    /// Static type of `expression`, or `None` when it cannot be determined
    fn type_of(&self, expression: &CstNode, source: &str) -> Option<TypeInfo>;
}

impl<F> TypeOracle for F
where
    F: Fn(&CstNode, &str) -> Option<TypeInfo>,
{
    fn type_of(&self, expression: &CstNode, source: &str) -> Option<TypeInfo> {
        self(expression, source)
    }
}

/// Runtime type name of a literal expression (`42` -> `Int32`, `1f` -> `Single`)
pub fn literal_type_name(node: &CstNode, source: &str) -> Option<&'static str> {
    match node.kind {
        NodeKind::StringLiteral => Some("String"),
        NodeKind::CharacterLiteral => Some("Char"),
        NodeKind::BooleanLiteral => Some("Boolean"),
        NodeKind::NumericLiteral => Some(numeric_type_name(node.text_from_source(source))),
        _ => None,
    }
}

pub(crate) fn numeric_type_name(text: &str) -> &'static str {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") {
        return integer_type_name(&lower);
    }
    if lower.ends_with('f') {
        "Single"
    } else if lower.ends_with('m') {
        "Decimal"
    } else if lower.ends_with('d') || lower.contains('.') || lower.contains('e') {
        "Double"
    } else {
        integer_type_name(&lower)
    }
}

fn integer_type_name(lower: &str) -> &'static str {
    let suffix: String = lower
        .chars()
        .rev()
        .take_while(|c| matches!(c, 'u' | 'l'))
        .collect();
    match (suffix.contains('u'), suffix.contains('l')) {
        (true, true) => "UInt64",
        (false, true) => "Int64",
        (true, false) => "UInt32",
        (false, false) => "Int32",
    }
}

/// Literal value text without its type suffix (`1f` -> `1`, `0xFFu` -> `0xFF`)
pub fn strip_numeric_suffix(text: &str) -> &str {
    if text.starts_with("0x") || text.starts_with("0X") {
        text.trim_end_matches(['u', 'U', 'l', 'L'])
    } else {
        text.trim_end_matches(['u', 'U', 'l', 'L', 'f', 'F', 'd', 'D', 'm', 'M'])
    }
}
