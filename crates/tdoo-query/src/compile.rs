//! Clause compiler.
//!
//! Walks a builder's entries in pre-order and renders the selection string
//! together with the positional argument list. Compilation is pure: it
//! reads the tree, never mutates it, and cannot fail.
//!
//! Rendering rules:
//!
//! | Node | Selection | Arguments |
//! |------|-----------|-----------|
//! | `Eq` / `Ge` / `Le` / `Gt` / `Lt` / `Like` | `col <sym> ?` | 1 |
//! | negated form of the above | `NOT col <sym> ?` | 1 |
//! | `In` with n values | `col IN(?,...,?)` | n |
//! | `In` with a subquery | `col IN (SELECT p FROM t [WHERE ...] [ORDER BY ...] [LIMIT n])` | inner |
//! | `NotIn` | `NOT ` + the `In` form | same |
//! | group | `(` + inner selection + `)` | inner |
//!
//! Entries after the first are prefixed with `" AND "` or `" OR "`.

use crate::condition::Condition;
use crate::ordering::render_order;
use crate::query::{Entry, Node, QueryBuilder};
use crate::value::Value;

/// Rendered selection and its bound arguments.
///
/// The number of `?` placeholders in `selection` always equals
/// `arguments.len()`, and the Nth placeholder binds the Nth argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledClause {
    /// The WHERE-clause body, without the `WHERE` keyword.
    pub selection: String,
    /// Canonical argument strings in placeholder order.
    pub arguments: Vec<String>,
}

impl CompiledClause {
    /// Returns `true` if there is no selection (matches every row).
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

/// Compiles a builder into a selection and argument list.
pub fn compile(builder: &QueryBuilder) -> CompiledClause {
    let mut out = CompiledClause::default();
    render_entries(builder.entries(), &mut out);
    out
}

fn render_entries(entries: &[Entry], out: &mut CompiledClause) {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.selection.push(' ');
            out.selection.push_str(entry.connector.as_str());
            out.selection.push(' ');
        }
        match &entry.node {
            Node::Condition(condition) => render_condition(condition, out),
            Node::Group(inner) => {
                out.selection.push('(');
                render_entries(inner, out);
                out.selection.push(')');
            }
        }
    }
}

fn render_condition(condition: &Condition, out: &mut CompiledClause) {
    let op = condition.op();
    if op.is_negated() {
        out.selection.push_str("NOT ");
    }
    out.selection.push_str(condition.column());

    match condition.value() {
        Value::Scalar(scalar) => {
            out.selection.push(' ');
            out.selection.push_str(op.symbol());
            out.selection.push_str(" ?");
            out.arguments.push(scalar.canonical());
        }
        Value::List(items) => {
            let placeholders = vec!["?"; items.len()].join(",");
            out.selection.push_str(" IN(");
            out.selection.push_str(&placeholders);
            out.selection.push(')');
            out.arguments.extend(items.iter().map(|s| s.canonical()));
        }
        Value::Subquery(sub) => {
            // Condition::new guarantees a projection.
            let projection = sub.builder().projection().unwrap_or("*");
            out.selection.push_str(" IN (SELECT ");
            out.selection.push_str(projection);
            out.selection.push_str(" FROM ");
            out.selection.push_str(sub.table());
            if !sub.builder().is_empty() {
                out.selection.push_str(" WHERE ");
                render_entries(sub.builder().entries(), out);
            }
            if let Some(order_by) = render_order(sub.builder().orderings()) {
                out.selection.push_str(" ORDER BY ");
                out.selection.push_str(&order_by);
            }
            if let Some(limit) = sub.builder().get_limit() {
                out.selection.push_str(&format!(" LIMIT {limit}"));
            }
            out.selection.push(')');
        }
    }
}

impl QueryBuilder {
    /// Compiles this builder. Repeated calls return identical results.
    pub fn compile(&self) -> CompiledClause {
        compile(self)
    }

    /// Returns the rendered selection string.
    pub fn selection(&self) -> String {
        self.compile().selection
    }

    /// Returns the argument strings in placeholder order.
    pub fn selection_arguments(&self) -> Vec<String> {
        self.compile().arguments
    }
}
