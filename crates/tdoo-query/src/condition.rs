//! Condition nodes.
//!
//! A [`Condition`] is a single predicate: a column, an operator and a value.
//! Construction validates the column and the value shape, so a condition
//! that exists can always be rendered.

use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::value::{Scalar, Value};

/// A single typed predicate.
///
/// The column is a raw identifier taken from the caller and pasted into the
/// selection as-is; only the value is ever parameterized.
///
/// # Example
///
/// ```
/// use tdoo_query::{Condition, Op};
///
/// let cond = Condition::new("priority", Op::Ge, 2).unwrap();
/// assert_eq!(cond.column(), "priority");
///
/// assert!(Condition::new("", Op::Eq, 1).is_err());
/// assert!(Condition::new("_id", Op::In, 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    op: Op,
    value: Value,
}

impl Condition {
    /// Creates a condition, rejecting blank columns and mismatched values.
    ///
    /// `In`/`NotIn` take a list (possibly empty) or a subquery with a
    /// projection. Every other operator takes a single scalar. Floats must
    /// be finite.
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<Value>) -> Result<Self> {
        let column = column.into();
        if column.trim().is_empty() {
            return Err(QueryError::InvalidColumn { column });
        }

        let value = value.into();
        check_shape(op, &value)?;
        check_finite(&column, &value)?;

        Ok(Condition { column, op, value })
    }

    /// The column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The operator.
    pub fn op(&self) -> Op {
        self.op
    }

    /// The value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

fn check_shape(op: Op, value: &Value) -> Result<()> {
    let reason = match (op.is_membership(), value) {
        (true, Value::List(_)) | (false, Value::Scalar(_)) => return Ok(()),
        (true, Value::Subquery(sub)) => {
            if sub.builder().projection().is_some() {
                return Ok(());
            }
            "subquery has no projection; call select() on it".to_string()
        }
        (true, other) => format!("expected a list or a subquery, got {}", other.kind()),
        (false, other) => format!("{} values are only valid for IN and NOT_IN", other.kind()),
    };
    Err(QueryError::InvalidOperator { op, reason })
}

fn check_finite(column: &str, value: &Value) -> Result<()> {
    let finite = match value {
        Value::Scalar(scalar) => scalar.is_finite(),
        Value::List(items) => items.iter().all(Scalar::is_finite),
        Value::Subquery(_) => true,
    };
    if finite {
        Ok(())
    } else {
        Err(QueryError::InvalidValue {
            column: column.to_string(),
            reason: "float is not finite",
        })
    }
}
