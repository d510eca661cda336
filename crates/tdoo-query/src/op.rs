//! Comparison and membership operators for query conditions.
//!
//! Every operator is either a plain form or the negated twin of one. Negated
//! forms render by prefixing the whole comparison with `NOT`, never by
//! flipping the symbol: `NotGe` on `x` becomes `NOT x >= ?`, not `x < ?`.
//! The two differ when `x` is NULL, and the textual form is kept on purpose.

/// Operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Comparison operators
    /// Equal (`=`).
    Eq,
    /// `NOT col = ?`.
    NotEq,
    /// Greater than or equal (`>=`).
    Ge,
    /// `NOT col >= ?`.
    NotGe,
    /// Less than or equal (`<=`).
    Le,
    /// `NOT col <= ?`.
    NotLe,
    /// Greater than (`>`).
    Gt,
    /// `NOT col > ?`.
    NotGt,
    /// Less than (`<`).
    Lt,
    /// `NOT col < ?`.
    NotLt,

    // Pattern matching
    /// SQL `LIKE` pattern match.
    Like,
    /// `NOT col LIKE ?`.
    NotLike,

    // Membership
    /// Value is one of a list, or of a subquery's projected column.
    In,
    /// `NOT col IN(...)`.
    NotIn,
}

impl Op {
    /// All operators, plain forms first.
    pub const ALL: [Op; 14] = [
        Op::Eq,
        Op::Ge,
        Op::Le,
        Op::Gt,
        Op::Lt,
        Op::Like,
        Op::In,
        Op::NotEq,
        Op::NotGe,
        Op::NotLe,
        Op::NotGt,
        Op::NotLt,
        Op::NotLike,
        Op::NotIn,
    ];

    /// Returns `true` for the `NOT ...` forms.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Op::NotEq | Op::NotGe | Op::NotLe | Op::NotGt | Op::NotLt | Op::NotLike | Op::NotIn
        )
    }

    /// Returns `true` for `In` and `NotIn`, which take lists or subqueries.
    pub fn is_membership(self) -> bool {
        matches!(self, Op::In | Op::NotIn)
    }

    /// Strips the negation, returning the plain operator.
    pub fn base(self) -> Op {
        match self {
            Op::NotEq => Op::Eq,
            Op::NotGe => Op::Ge,
            Op::NotLe => Op::Le,
            Op::NotGt => Op::Gt,
            Op::NotLt => Op::Lt,
            Op::NotLike => Op::Like,
            Op::NotIn => Op::In,
            other => other,
        }
    }

    /// Returns the negated twin. Applying it twice gives back `self`.
    pub fn negate(self) -> Op {
        match self {
            Op::Eq => Op::NotEq,
            Op::Ge => Op::NotGe,
            Op::Le => Op::NotLe,
            Op::Gt => Op::NotGt,
            Op::Lt => Op::NotLt,
            Op::Like => Op::NotLike,
            Op::In => Op::NotIn,
            negated => negated.base(),
        }
    }

    /// SQL symbol of the plain form, e.g. `">="` for both `Ge` and `NotGe`.
    pub fn symbol(self) -> &'static str {
        match self.base() {
            Op::Eq => "=",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Like => "LIKE",
            _ => "IN",
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "EQ",
            Op::NotEq => "NOT_EQ",
            Op::Ge => "GE",
            Op::NotGe => "NOT_GE",
            Op::Le => "LE",
            Op::NotLe => "NOT_LE",
            Op::Gt => "GT",
            Op::NotGt => "NOT_GT",
            Op::Lt => "LT",
            Op::NotLt => "NOT_LT",
            Op::Like => "LIKE",
            Op::NotLike => "NOT_LIKE",
            Op::In => "IN",
            Op::NotIn => "NOT_IN",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
