//! NodeKind predicate methods

use super::NodeKind;

impl NodeKind {
    /// Check if this is a literal node
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::NumericLiteral
                | NodeKind::StringLiteral
                | NodeKind::CharacterLiteral
                | NodeKind::BooleanLiteral
                | NodeKind::NullLiteral
        )
    }

    /// Check if this is a member access, conditional or not
    pub fn is_member_access(&self) -> bool {
        matches!(self, NodeKind::MemberAccess | NodeKind::ConditionalAccess)
    }
}
