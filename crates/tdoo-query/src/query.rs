//! Expression tree builder.
//!
//! The [`QueryBuilder`] accumulates an ordered sequence of
//! `(connector, node)` entries, where a node is either a single
//! [`Condition`] or a parenthesized group built by another builder.
//! Rendering lives in [`crate::compile`] and execution in
//! [`crate::executor`]; this module only deals with accumulation.

use crate::condition::Condition;
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{Dir, OrderBy};
use crate::value::Value;

/// Keyword joining an entry to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single predicate, rendered bare.
    Condition(Condition),
    /// A nested expression, rendered in parentheses. Never empty.
    Group(Vec<Entry>),
}

/// One element of the tree: a node and the connector in front of it.
///
/// The connector of the first entry is kept but never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Connector to the previous entry.
    pub connector: Connector,
    /// The node itself.
    pub node: Node,
}

/// Fluent builder for a parameterized selection.
///
/// Entries are appended in call order; each `and`/`or` call returns the
/// builder so calls chain. Condition-taking methods validate immediately
/// and return a [`QueryError`](crate::QueryError) for a blank column or a
/// value that does not fit the operator.
///
/// # Example
///
/// ```
/// use tdoo_query::{Op, QueryBuilder};
///
/// let urgent = QueryBuilder::new()
///     .and("priority", Op::Ge, 2)?
///     .or("name", Op::Like, "%urgent%")?;
///
/// let qb = QueryBuilder::new()
///     .and("done", Op::Eq, false)?
///     .and_group(urgent);
///
/// assert_eq!(qb.selection(), "done = ? AND (priority >= ? OR name LIKE ?)");
/// assert_eq!(qb.selection_arguments(), vec!["0", "2", "%urgent%"]);
/// # Ok::<(), tdoo_query::QueryError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    entries: Vec<Entry>,
    projection: Option<String>,
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
}

impl QueryBuilder {
    /// Creates a new empty builder.
    ///
    /// An empty builder compiles to an empty selection and matches every row.
    pub fn new() -> Self {
        QueryBuilder::default()
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Appends a condition joined with `AND`.
    pub fn and(mut self, column: &str, op: Op, value: impl Into<Value>) -> Result<Self> {
        self.push(Connector::And, Condition::new(column, op, value)?);
        Ok(self)
    }

    /// Appends a condition joined with `OR`.
    pub fn or(mut self, column: &str, op: Op, value: impl Into<Value>) -> Result<Self> {
        self.push(Connector::Or, Condition::new(column, op, value)?);
        Ok(self)
    }

    /// Appends another builder's conditions as a parenthesized group joined
    /// with `AND`. An empty group is dropped. Only the group's conditions
    /// are kept; its projection, orderings and limit are discarded.
    pub fn and_group(mut self, group: QueryBuilder) -> Self {
        self.push_group(Connector::And, group);
        self
    }

    /// Appends another builder's conditions as a parenthesized group joined
    /// with `OR`. An empty group is dropped. Only the group's conditions
    /// are kept; its projection, orderings and limit are discarded.
    pub fn or_group(mut self, group: QueryBuilder) -> Self {
        self.push_group(Connector::Or, group);
        self
    }

    /// Appends an already validated condition in place.
    ///
    /// Useful when conditions are added in a loop rather than a chain.
    pub fn push(&mut self, connector: Connector, condition: Condition) -> &mut Self {
        self.entries.push(Entry {
            connector,
            node: Node::Condition(condition),
        });
        self
    }

    /// Appends a group's conditions in place. An empty group is dropped.
    pub fn push_group(&mut self, connector: Connector, group: QueryBuilder) -> &mut Self {
        if !group.entries.is_empty() {
            self.entries.push(Entry {
                connector,
                node: Node::Group(group.entries),
            });
        }
        self
    }

    // ========================================================================
    // Shorthands
    // ========================================================================

    /// Adds an AND equality condition.
    pub fn and_eq(self, column: &str, value: impl Into<Value>) -> Result<Self> {
        self.and(column, Op::Eq, value)
    }

    /// Adds an OR equality condition.
    pub fn or_eq(self, column: &str, value: impl Into<Value>) -> Result<Self> {
        self.or(column, Op::Eq, value)
    }

    /// Adds an AND `LIKE` condition.
    pub fn and_like(self, column: &str, pattern: &str) -> Result<Self> {
        self.and(column, Op::Like, pattern)
    }

    /// Adds an AND `IN` condition over a list.
    pub fn and_in<I>(self, column: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<crate::value::Scalar>,
    {
        self.and(column, Op::In, Value::list(values))
    }

    /// Adds an OR `IN` condition over a list.
    pub fn or_in<I>(self, column: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<crate::value::Scalar>,
    {
        self.or(column, Op::In, Value::list(values))
    }

    // ========================================================================
    // Projection, ordering, limits
    // ========================================================================

    /// Sets the projected column used when this builder is a subquery.
    ///
    /// A subquery's orderings and limit render inside its `SELECT`.
    pub fn select(mut self, column: &str) -> Self {
        self.projection = Some(column.to_string());
        self
    }

    /// Adds a sort key.
    pub fn order_by(mut self, column: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(column, dir));
        self
    }

    /// Adds an ascending sort key.
    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(column, Dir::Asc)
    }

    /// Adds a descending sort key.
    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(column, Dir::Desc)
    }

    /// Sets the maximum number of rows `get_list` returns.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the top-level entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the projection, if set.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Returns the sort keys.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if this builder has no conditions (matches everything).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
