//! Error value hoisting
//!
//! Structured logging APIs take an exception as a dedicated first argument.
//! After a template is assembled, its error candidates are checked in order
//! against the type oracle, and the first one whose type derives from the
//! configured error base type is moved into that slot. The value keeps its
//! own placeholder argument as well.

use logfix_parser::CstNode;
use tracing::debug;

use crate::types::TypeOracle;

pub struct ErrorHoister<'a> {
    source: &'a str,
    oracle: &'a dyn TypeOracle,
    error_base_type: &'a str,
}

impl std::fmt::Debug for ErrorHoister<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHoister")
            .field("error_base_type", &self.error_base_type)
            .finish_non_exhaustive()
    }
}

impl<'a> ErrorHoister<'a> {
    pub fn new(source: &'a str, oracle: &'a dyn TypeOracle, error_base_type: &'a str) -> Self {
        Self {
            source,
            oracle,
            error_base_type,
        }
    }

    /// True when the static type of `expression` derives from the error base type
    pub fn is_error_value(&self, expression: &CstNode) -> bool {
        self.oracle
            .type_of(expression, self.source)
            .is_some_and(|ty| ty.derives_from(self.error_base_type))
    }

    /// First candidate that holds an error value
    pub fn find<'n>(&self, candidates: &[&'n CstNode]) -> Option<&'n CstNode> {
        let found = candidates.iter().copied().find(|c| self.is_error_value(c))?;
        debug!(
            value = found.text_from_source(self.source),
            base = self.error_base_type,
            "hoisting error value into the leading argument"
        );
        Some(found)
    }
}
