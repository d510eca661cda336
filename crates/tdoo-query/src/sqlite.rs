//! SQLite storage backend.
//!
//! Implements [`Storage`] for [`rusqlite::Connection`]. Every argument is
//! bound as text; SQLite's column affinity converts it back for numeric
//! comparisons. The prepared statement and its cursor live only for the
//! duration of one [`Storage::query`] call.

use std::sync::Arc;

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};

use crate::error::StorageError;
use crate::storage::{Cell, Row, Storage, StorageQuery};

/// Renders the full `SELECT` statement for a request.
pub fn render_select(request: &StorageQuery<'_>) -> String {
    let columns = if request.columns.is_empty() {
        "*".to_string()
    } else {
        request.columns.join(", ")
    };

    let mut sql = format!("SELECT {columns} FROM {}", request.table);
    if !request.selection.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(request.selection);
    }
    if let Some(order_by) = request.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }
    if let Some(limit) = request.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sql
}

impl Storage for Connection {
    fn query(&self, request: &StorageQuery<'_>) -> Result<Vec<Row>, StorageError> {
        let sql = render_select(request);
        let fail = |what: &str, err: rusqlite::Error| {
            StorageError::with_source(format!("{what} on '{}'", request.table), err)
        };

        let mut stmt = self
            .prepare(&sql)
            .map_err(|e| fail("failed to prepare query", e))?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
            .into();

        let mut cursor = stmt
            .query(params_from_iter(request.arguments.iter()))
            .map_err(|e| fail("failed to run query", e))?;

        let mut rows = Vec::new();
        while let Some(raw) = cursor.next().map_err(|e| fail("failed to read row", e))? {
            let mut cells = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                let value = raw
                    .get_ref(index)
                    .map_err(|e| fail("failed to read column", e))?;
                cells.push(to_cell(value));
            }
            rows.push(Row::new(Arc::clone(&columns), cells));
        }
        Ok(rows)
    }
}

fn to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(n) => Cell::Integer(n),
        ValueRef::Real(n) => Cell::Real(n),
        // Invalid UTF-8 stays raw; text readers then report a type mismatch.
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Cell::Text(text.to_string()),
            Err(_) => Cell::Blob(bytes.to_vec()),
        },
        ValueRef::Blob(bytes) => Cell::Blob(bytes.to_vec()),
    }
}
