//! Operator precedence and associativity definitions
//!
//! Ordered from loosest to tightest binding, following the C# operator table.

/// Operator precedence levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum Precedence {
    /// Entry point for a full expression
    Lowest = 0,
    /// Lambda: x => expr
    Lambda = 1,
    /// Assignment and compound assignment
    Assignment = 2,
    /// Conditional: ? :
    Conditional = 3,
    /// Null coalescing: ??
    Coalesce = 4,
    /// Conditional or: ||
    LogicalOr = 5,
    /// Conditional and: &&
    LogicalAnd = 6,
    /// Logical or: |
    BitOr = 7,
    /// Logical xor: ^
    BitXor = 8,
    /// Logical and: &
    BitAnd = 9,
    /// Equality: ==, !=
    Equality = 10,
    /// Relational: <, >, <=, >=
    Relational = 11,
    /// Additive: +, -
    Additive = 12,
    /// Multiplicative: *, /, %
    Multiplicative = 13,
    /// Prefix unary
    Unary = 14,
    /// Member access, invocation, element access
    Postfix = 15,
}

impl Precedence {
    /// The next tighter level, used for left-associative operators
    pub fn tighter(self) -> Precedence {
        Precedence::try_from(self as i8 + 1).unwrap_or(self)
    }
}

impl TryFrom<i8> for Precedence {
    type Error = ();

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        use Precedence::*;
        Ok(match value {
            0 => Lowest,
            1 => Lambda,
            2 => Assignment,
            3 => Conditional,
            4 => Coalesce,
            5 => LogicalOr,
            6 => LogicalAnd,
            7 => BitOr,
            8 => BitXor,
            9 => BitAnd,
            10 => Equality,
            11 => Relational,
            12 => Additive,
            13 => Multiplicative,
            14 => Unary,
            15 => Postfix,
            _ => return Err(()),
        })
    }
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}
