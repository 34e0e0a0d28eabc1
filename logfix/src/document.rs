//! Host document: source text plus its tolerant syntax tree

use logfix_parser::{parse_with_errors, CstNode, NodeKind, ParseErrors, SourceMap};

/// A parsed source file
///
/// Parse errors are kept for reporting but never block fixing: the tree
/// still contains every call expression the parser could recover.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    root: CstNode,
    errors: ParseErrors,
    source_map: SourceMap,
}

impl Document {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let (root, errors) = parse_with_errors(&source);
        let source_map = SourceMap::new(&source);
        Self {
            source,
            root,
            errors,
            source_map,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &CstNode {
        &self.root
    }

    pub fn parse_errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Byte offset of a 1-indexed line and column
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        self.source_map.offset_of(line, column)
    }

    /// 1-indexed line and column of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.source_map.line_col(offset)
    }

    /// The deepest node at `offset` and all of its ancestors, root first
    pub fn locate(&self, offset: usize) -> Vec<&CstNode> {
        self.root.path_to(offset)
    }

    /// Smallest call expression whose argument list contains `offset`.
    ///
    /// Falls back to the innermost call containing `offset` at all, e.g.
    /// when the offset points into the invoked member name.
    pub fn enclosing_invocation(&self, offset: usize) -> Option<CallSite<'_>> {
        let path = self.locate(offset);
        let invocations = path.iter().rev().filter(|n| n.kind == NodeKind::Invocation);

        let mut fallback = None;
        for invocation in invocations {
            let Some(arguments) = invocation.child_by_field("arguments") else {
                continue;
            };
            if arguments.span.contains(offset) {
                return Some(CallSite::new(invocation, arguments, offset));
            }
            fallback.get_or_insert(CallSite::new(invocation, arguments, offset));
        }
        fallback
    }
}

/// A call expression located from a diagnostic
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    pub invocation: &'a CstNode,
    pub arguments: &'a CstNode,
    /// Index of the argument containing the diagnostic offset
    pub argument_index: Option<usize>,
}

impl<'a> CallSite<'a> {
    fn new(invocation: &'a CstNode, arguments: &'a CstNode, offset: usize) -> Self {
        let argument_index = arguments
            .children
            .iter()
            .position(|arg| arg.span.contains(offset));
        Self {
            invocation,
            arguments,
            argument_index,
        }
    }

    /// Argument nodes as written (named arguments included)
    pub fn arguments(&self) -> &'a [CstNode] {
        &self.arguments.children
    }

    /// Value expression of argument `index`, looking through `name: value`
    pub fn argument_value(&self, index: usize) -> Option<&'a CstNode> {
        self.arguments.children.get(index).map(argument_value)
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.invocation.text_from_source(source)
    }
}

/// Value expression of an argument node
pub fn argument_value(argument: &CstNode) -> &CstNode {
    match argument.kind {
        NodeKind::NamedArgument => argument.child_by_field("value").unwrap_or(argument),
        _ => argument,
    }
}
