//! tdoo-query - Fluent SQL selection builder for the tdoo task store.
//!
//! Builds a tree of typed conditions, compiles it into a parameterized
//! WHERE-clause body plus an ordered list of string arguments, and runs the
//! result against a relational store, mapping rows into typed records.
//!
//! - Operators: `=`, `>=`, `<=`, `>`, `<`, `LIKE`, `IN`, each with a `NOT` form
//! - Values: booleans, integers, floats, text, domain-object identities,
//!   lists and correlated subqueries
//! - AND/OR connectors with explicit parenthesized groups
//! - Ordering and limits for executed queries
//! - SQLite backend behind the default `sqlite` feature
//!
//! # Quick Start
//!
//! ```rust
//! use tdoo_query::{Op, QueryBuilder, Value};
//!
//! // Tasks that are open and either urgent or in the "Inbox" list
//! let inbox = QueryBuilder::new()
//!     .select("_id")
//!     .and("name", Op::Eq, "Inbox")?;
//!
//! let either = QueryBuilder::new()
//!     .and("priority", Op::Ge, 2)?
//!     .or("list_id", Op::In, Value::subquery_from("lists", inbox))?;
//!
//! let qb = QueryBuilder::new()
//!     .and("done", Op::Eq, false)?
//!     .and_group(either);
//!
//! assert_eq!(
//!     qb.selection(),
//!     "done = ? AND (priority >= ? OR list_id IN (SELECT _id FROM lists WHERE name = ?))"
//! );
//! assert_eq!(qb.selection_arguments(), vec!["0", "2", "Inbox"]);
//! # Ok::<(), tdoo_query::QueryError>(())
//! ```
//!
//! # Rendering
//!
//! Conditions render in the order they were added. The first entry never
//! carries a connector; later ones are joined with ` AND ` or ` OR ` and no
//! precedence is added beyond the groups the caller builds. Negated
//! operators prefix the comparison with `NOT` rather than inverting it.
//!
//! # Execution
//!
//! Types implement [`Entity`] to describe their table and how a [`Row`]
//! becomes a value. [`QueryBuilder::get`] returns the first match,
//! [`QueryBuilder::get_list`] every match, against any [`Storage`].

mod compile;
mod condition;
mod entity;
mod error;
mod executor;
mod op;
mod ordering;
mod query;
#[cfg(feature = "sqlite")]
pub mod sqlite;
mod storage;
mod value;

// Re-export public API
pub use compile::{compile, CompiledClause};
pub use condition::Condition;
pub use entity::{Entity, EntityDescriptor, RowMapper};
pub use error::{BoxError, MappingError, QueryError, Result, StorageError};
pub use op::Op;
pub use ordering::{render_order, Dir, OrderBy};
pub use query::{Connector, Entry, Node, QueryBuilder};
pub use storage::{Cell, Row, Storage, StorageQuery};
pub use value::{Identified, Scalar, Subquery, Value};
