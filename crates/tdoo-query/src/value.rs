//! Condition values and their canonical argument form.
//!
//! A [`Value`] is what sits on the right-hand side of a condition: a single
//! [`Scalar`], a list of scalars for `IN`, or a [`Subquery`]. Every scalar
//! canonicalizes to the string that is bound for its `?` placeholder; the
//! storage layer only ever sees those strings.

use crate::entity::Entity;
use crate::query::QueryBuilder;

/// A single bindable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean, bound as `"1"` or `"0"`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point, always bound with a decimal point (`1.0`, `1.0e16`).
    /// Conditions reject NaN and infinities.
    Float(f64),
    /// Text, bound verbatim.
    Text(String),
    /// Identity of a domain object, bound as the identity's string form.
    Identity(i64),
}

impl Scalar {
    /// Identity reference to a domain object.
    pub fn identity_of<T: Identified + ?Sized>(object: &T) -> Self {
        Scalar::Identity(object.identity())
    }

    /// Returns the argument string bound for this scalar.
    pub fn canonical(&self) -> String {
        match self {
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => "0".to_string(),
            Scalar::Int(n) | Scalar::Identity(n) => n.to_string(),
            Scalar::Float(n) => float_text(*n),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Returns `false` for NaN and infinite floats, which have no argument
    /// form SQLite reads back as a number.
    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Float(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Returns the type name used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
            Scalar::Identity(_) => "identity",
        }
    }
}

/// Shortest round-trip form with a decimal point in the mantissa.
fn float_text(n: f64) -> String {
    let text = format!("{n:?}");
    match text.find('e') {
        Some(exp) if !text[..exp].contains('.') => {
            format!("{}.0{}", &text[..exp], &text[exp..])
        }
        None if !text.contains('.') => format!("{text}.0"),
        _ => text,
    }
}

/// A domain object that can stand in for its identity in a condition.
///
/// ```
/// use tdoo_query::{Identified, Op, QueryBuilder, Value};
///
/// struct List {
///     id: i64,
/// }
///
/// impl Identified for List {
///     fn identity(&self) -> i64 {
///         self.id
///     }
/// }
///
/// let inbox = List { id: 7 };
/// let qb = QueryBuilder::new()
///     .and("list_id", Op::Eq, Value::object(&inbox))
///     .unwrap();
/// assert_eq!(qb.selection_arguments(), vec!["7"]);
/// ```
pub trait Identified {
    /// Returns the identity value (the primary key).
    fn identity(&self) -> i64;
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single scalar; valid for every operator except `In`/`NotIn`.
    Scalar(Scalar),
    /// Ordered list of scalars for `In`/`NotIn`. May be empty.
    List(Vec<Scalar>),
    /// Correlated subquery for `In`/`NotIn`.
    Subquery(Box<Subquery>),
}

impl Value {
    /// Identity reference to a domain object.
    pub fn object<T: Identified + ?Sized>(object: &T) -> Self {
        Value::Scalar(Scalar::identity_of(object))
    }

    /// List value from any iterator of scalar-convertible items.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Subquery over the table of entity `E`.
    ///
    /// The builder must carry a projection set with
    /// [`QueryBuilder::select`]; otherwise the condition using it is
    /// rejected.
    pub fn subquery<E: Entity>(builder: QueryBuilder) -> Self {
        Value::subquery_from(E::TABLE, builder)
    }

    /// Subquery over an explicitly named table.
    pub fn subquery_from(table: impl Into<String>, builder: QueryBuilder) -> Self {
        Value::Subquery(Box::new(Subquery {
            table: table.into(),
            builder,
        }))
    }

    /// Returns the kind name used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::List(_) => "list",
            Value::Subquery(_) => "subquery",
        }
    }
}

/// A builder rendered as `SELECT <projection> FROM <table> [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    table: String,
    builder: QueryBuilder,
}

impl Subquery {
    /// Table the subquery reads from.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The inner builder (projection and conditions).
    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }
}

// Scalar conversions

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i8> for Scalar {
    fn from(n: i8) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i16> for Scalar {
    fn from(n: i16) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<u8> for Scalar {
    fn from(n: u8) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<u16> for Scalar {
    fn from(n: u16) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Text(s.clone())
    }
}

// Value conversions

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(b.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Scalar(s.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::list(v)
    }
}
