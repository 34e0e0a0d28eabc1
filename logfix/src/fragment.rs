//! Fragment classification
//!
//! A fragment is one dynamic unit of a log message: an interpolation hole,
//! or the argument bound to a positional placeholder. Each fragment is
//! classified once by the shape of its expression ([`HoleKind`]) and then
//! resolved into a placeholder name, inert inline text, or left as is
//! ([`Resolution`]).

use logfix_parser::{CstNode, NodeKind};
use tracing::{debug, trace};

use crate::config::FixOptions;
use crate::normalizer::normalize;
use crate::types::{strip_numeric_suffix, TypeOracle};

/// A call whose target is a member access, e.g. `ex.GetType()` or `x?.ToString("D2")`
#[derive(Debug, Clone, Copy)]
pub struct MethodCall<'a> {
    /// The whole invocation
    pub call: &'a CstNode,
    /// The invoked member access, without the argument list
    pub callee: &'a CstNode,
    /// Expression left of the invoked member
    pub receiver: &'a CstNode,
    pub method: &'a str,
    pub argument_count: usize,
}

/// Shape of a fragment's expression
#[derive(Debug, Clone, Copy)]
pub enum HoleKind<'a> {
    NumericLiteral,
    /// String, character, boolean and null literals
    Literal,
    SimpleIdentifier,
    NameofIdentifier { operand: &'a CstNode },
    MemberChain { receiver: &'a CstNode },
    ConditionalMemberChain { receiver: &'a CstNode },
    MethodCall(MethodCall<'a>),
    ConditionalMethodCall(MethodCall<'a>),
    /// Call of a bare identifier such as `Describe()`
    IdentifierCall { target: &'a CstNode },
    Other,
}

impl<'a> HoleKind<'a> {
    /// Classify `expression` by its syntax
    pub fn of(expression: &'a CstNode, source: &'a str, nameof_operator: &str) -> Self {
        match expression.kind {
            NodeKind::NumericLiteral => HoleKind::NumericLiteral,
            kind if kind.is_literal() => HoleKind::Literal,
            NodeKind::Identifier => HoleKind::SimpleIdentifier,
            kind if kind.is_member_access() => {
                match expression.child_by_field("expression") {
                    Some(receiver) if is_conditional_chain(expression) => {
                        HoleKind::ConditionalMemberChain { receiver }
                    }
                    Some(receiver) => HoleKind::MemberChain { receiver },
                    None => HoleKind::Other,
                }
            }
            NodeKind::Invocation => Self::of_invocation(expression, source, nameof_operator),
            _ => HoleKind::Other,
        }
    }

    fn of_invocation(call: &'a CstNode, source: &'a str, nameof_operator: &str) -> Self {
        let (Some(callee), Some(arguments)) =
            (call.child_by_field("function"), call.child_by_field("arguments"))
        else {
            return HoleKind::Other;
        };

        match callee.kind {
            NodeKind::Identifier => {
                if callee.text_from_source(source) == nameof_operator {
                    if let [operand] = arguments.children.as_slice() {
                        return HoleKind::NameofIdentifier { operand };
                    }
                }
                HoleKind::IdentifierCall { target: callee }
            }
            kind if kind.is_member_access() => {
                let (Some(receiver), Some(name)) =
                    (callee.child_by_field("expression"), callee.child_by_field("name"))
                else {
                    return HoleKind::Other;
                };
                let method = MethodCall {
                    call,
                    callee,
                    receiver,
                    method: name.text_from_source(source),
                    argument_count: arguments.children.len(),
                };
                if is_conditional_chain(callee) {
                    HoleKind::ConditionalMethodCall(method)
                } else {
                    HoleKind::MethodCall(method)
                }
            }
            _ => HoleKind::Other,
        }
    }

    /// Short name used in trace output
    pub fn name(&self) -> &'static str {
        match self {
            HoleKind::NumericLiteral => "numeric_literal",
            HoleKind::Literal => "literal",
            HoleKind::SimpleIdentifier => "simple_identifier",
            HoleKind::NameofIdentifier { .. } => "nameof_identifier",
            HoleKind::MemberChain { .. } => "member_chain",
            HoleKind::ConditionalMemberChain { .. } => "conditional_member_chain",
            HoleKind::MethodCall(_) => "method_call",
            HoleKind::ConditionalMethodCall(_) => "conditional_method_call",
            HoleKind::IdentifierCall { .. } => "identifier_call",
            HoleKind::Other => "other",
        }
    }
}

/// True when `?.` appears anywhere along the access chain
fn is_conditional_chain(node: &CstNode) -> bool {
    let mut current = node;
    loop {
        match current.kind {
            NodeKind::ConditionalAccess => return true,
            NodeKind::MemberAccess | NodeKind::ElementAccess => {
                match current.child_by_field("expression") {
                    Some(inner) => current = inner,
                    None => return false,
                }
            }
            NodeKind::Invocation => match current.child_by_field("function") {
                Some(inner) => current = inner,
                None => return false,
            },
            _ => return false,
        }
    }
}

/// How a fragment ends up in the rewritten template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A named placeholder, `{Name}`
    Placeholder { name: String },
    /// Inert text spliced into the template
    Inline { text: String },
    /// The fragment stays exactly as written
    Retained,
}

/// Result of classifying one fragment
#[derive(Debug, Clone)]
pub struct ResolvedFragment<'a> {
    pub resolution: Resolution,
    /// Values appended to the call's argument list, in order
    pub new_arguments: Vec<&'a CstNode>,
    /// Expression probed for an error type; not necessarily an argument
    pub error_candidate: Option<&'a CstNode>,
}

impl<'a> ResolvedFragment<'a> {
    pub fn placeholder(
        name: String,
        new_arguments: Vec<&'a CstNode>,
        error_candidate: Option<&'a CstNode>,
    ) -> Self {
        Self {
            resolution: Resolution::Placeholder { name },
            new_arguments,
            error_candidate,
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            resolution: Resolution::Inline { text: text.into() },
            new_arguments: Vec::new(),
            error_candidate: None,
        }
    }

    pub fn retained() -> Self {
        Self {
            resolution: Resolution::Retained,
            new_arguments: Vec::new(),
            error_candidate: None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Placeholder { name } => Some(name),
            _ => None,
        }
    }

    /// Retained fragments keep the template in interpolated form
    pub fn is_retained(&self) -> bool {
        self.resolution == Resolution::Retained
    }
}

/// Resolves fragments against one document
pub struct FragmentClassifier<'a> {
    source: &'a str,
    options: &'a FixOptions,
    oracle: &'a dyn TypeOracle,
}

impl std::fmt::Debug for FragmentClassifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentClassifier")
            .field("options", self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> FragmentClassifier<'a> {
    pub fn new(source: &'a str, options: &'a FixOptions, oracle: &'a dyn TypeOracle) -> Self {
        Self {
            source,
            options,
            oracle,
        }
    }

    pub fn kind_of(&self, expression: &'a CstNode) -> HoleKind<'a> {
        HoleKind::of(expression, self.source, &self.options.nameof_operator)
    }

    /// Resolve an interpolation hole of a template written in `verbatim` style
    pub fn resolve_hole(&self, expression: &'a CstNode, verbatim: bool) -> ResolvedFragment<'a> {
        let kind = self.kind_of(expression);
        let resolved = match kind {
            HoleKind::NumericLiteral => {
                ResolvedFragment::inline(strip_numeric_suffix(self.text(expression)))
            }
            HoleKind::Literal => match self.inline_literal(expression, verbatim) {
                Some(text) => ResolvedFragment::inline(text),
                None => ResolvedFragment::retained(),
            },
            HoleKind::SimpleIdentifier => {
                self.placeholder(expression, vec![expression], Some(expression))
            }
            HoleKind::MemberChain { receiver } | HoleKind::ConditionalMemberChain { receiver } => {
                self.placeholder(expression, vec![expression], Some(receiver))
            }
            HoleKind::MethodCall(call) | HoleKind::ConditionalMethodCall(call) => {
                if call.method == self.options.stringify_method {
                    let value = if call.argument_count == 0 {
                        call.receiver
                    } else {
                        call.call
                    };
                    self.placeholder(call.receiver, vec![value], Some(call.receiver))
                } else {
                    self.placeholder(call.callee, vec![call.call], Some(call.receiver))
                }
            }
            HoleKind::NameofIdentifier { .. } | HoleKind::IdentifierCall { .. } | HoleKind::Other => {
                ResolvedFragment::retained()
            }
        };

        trace!(
            kind = kind.name(),
            expression = self.text(expression),
            resolution = ?resolved.resolution,
            "resolved interpolation hole"
        );
        resolved
    }

    /// Resolve the argument bound to a positional placeholder.
    ///
    /// The argument already sits in the call, so nothing is appended; only
    /// the placeholder name is derived. Literals are named after their type.
    pub fn resolve_positional(&self, argument: &'a CstNode) -> ResolvedFragment<'a> {
        let kind = self.kind_of(argument);
        let named_after = match kind {
            HoleKind::NumericLiteral | HoleKind::Literal => {
                let resolved = self
                    .oracle
                    .type_of(argument, self.source)
                    .and_then(|ty| normalize(ty.simple_name()).ok())
                    .map(|name| ResolvedFragment::placeholder(name, Vec::new(), None))
                    .unwrap_or_else(ResolvedFragment::retained);
                trace!(kind = kind.name(), resolution = ?resolved.resolution, "resolved positional literal");
                return resolved;
            }
            HoleKind::SimpleIdentifier
            | HoleKind::MemberChain { .. }
            | HoleKind::ConditionalMemberChain { .. } => Some(argument),
            HoleKind::NameofIdentifier { operand } => Some(operand),
            HoleKind::MethodCall(call) | HoleKind::ConditionalMethodCall(call) => {
                if call.method == self.options.stringify_method {
                    Some(call.receiver)
                } else {
                    Some(call.callee)
                }
            }
            HoleKind::IdentifierCall { target } => Some(target),
            HoleKind::Other => None,
        };

        let resolved = match named_after {
            Some(node) => self.placeholder(node, Vec::new(), None),
            None => ResolvedFragment::retained(),
        };
        trace!(
            kind = kind.name(),
            argument = self.text(argument),
            resolution = ?resolved.resolution,
            "resolved positional argument"
        );
        resolved
    }

    fn placeholder(
        &self,
        named_after: &CstNode,
        new_arguments: Vec<&'a CstNode>,
        error_candidate: Option<&'a CstNode>,
    ) -> ResolvedFragment<'a> {
        match normalize(self.text(named_after)) {
            Ok(name) => ResolvedFragment::placeholder(name, new_arguments, error_candidate),
            Err(e) => {
                debug!(error = %e, "keeping fragment unchanged");
                ResolvedFragment::retained()
            }
        }
    }

    /// Literal value as template text, or `None` when it cannot be spliced
    /// into a template of the given style without changing its meaning
    fn inline_literal(&self, literal: &CstNode, verbatim: bool) -> Option<String> {
        let text = self.text(literal);
        match literal.kind {
            NodeKind::BooleanLiteral => Some(text.to_string()),
            NodeKind::NullLiteral => Some(String::new()),
            NodeKind::StringLiteral => {
                let (contents, is_verbatim) = match text.strip_prefix('@') {
                    Some(rest) => (rest, true),
                    None => (text, false),
                };
                if is_verbatim != verbatim {
                    return None;
                }
                let contents = contents.strip_prefix('"')?.strip_suffix('"')?;
                Some(escape_braces(contents))
            }
            NodeKind::CharacterLiteral => {
                let contents = text.strip_prefix('\'')?.strip_suffix('\'')?;
                if contents.contains('"') || (verbatim && contents.contains('\\')) {
                    return None;
                }
                Some(escape_braces(&contents.replace("\\'", "'")))
            }
            _ => None,
        }
    }

    fn text(&self, node: &CstNode) -> &'a str {
        node.text_from_source(self.source)
    }
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}
