//! Storage boundary.
//!
//! The executor talks to the database through the [`Storage`] trait and
//! receives owned [`Row`]s back. Implementations must bind `arguments` to the
//! `?` placeholders of `selection` in order, and must release any cursor or
//! statement before returning, on success and on error alike.

use std::sync::Arc;

use crate::error::{MappingError, StorageError};

/// A single stored value as returned by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Text value.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Cell {
    /// Returns the type name used in mapping errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Integer(_) => "integer",
            Cell::Real(_) => "real",
            Cell::Text(_) => "text",
            Cell::Blob(_) => "blob",
        }
    }
}

/// One result row, addressable by column name or index.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    cells: Vec<Cell>,
}

impl Row {
    /// Creates a row. Rows of one result set share `columns`.
    ///
    /// Cells beyond the column count are unreachable by name.
    pub fn new(columns: Arc<[String]>, cells: Vec<Cell>) -> Self {
        Row { columns, cells }
    }

    /// Builds a standalone row from `(column, cell)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Cell)>,
        S: Into<String>,
    {
        let (columns, cells): (Vec<String>, Vec<Cell>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        Row::new(columns.into(), cells)
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a position.
    pub fn get_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Cell for a column name.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.get_index(index)
    }

    /// Cell for a column name, or [`MappingError::MissingColumn`].
    pub fn cell(&self, column: &str) -> Result<&Cell, MappingError> {
        self.get(column)
            .ok_or_else(|| MappingError::MissingColumn(column.to_string()))
    }

    // ========================================================================
    // Typed accessors for row mappers
    // ========================================================================

    /// Reads an integer column.
    pub fn get_i64(&self, column: &str) -> Result<i64, MappingError> {
        self.get_opt_i64(column)?
            .ok_or_else(|| mismatch(column, "integer", &Cell::Null))
    }

    /// Reads a nullable integer column.
    pub fn get_opt_i64(&self, column: &str) -> Result<Option<i64>, MappingError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Integer(n) => Ok(Some(*n)),
            other => Err(mismatch(column, "integer", other)),
        }
    }

    /// Reads a real column. Integer cells are widened.
    pub fn get_f64(&self, column: &str) -> Result<f64, MappingError> {
        match self.cell(column)? {
            Cell::Real(n) => Ok(*n),
            Cell::Integer(n) => Ok(*n as f64),
            other => Err(mismatch(column, "real", other)),
        }
    }

    /// Reads a boolean stored as integer `0`/`1`.
    pub fn get_bool(&self, column: &str) -> Result<bool, MappingError> {
        match self.cell(column)? {
            Cell::Integer(0) => Ok(false),
            Cell::Integer(1) => Ok(true),
            Cell::Integer(n) => Err(MappingError::InvalidValue {
                column: column.to_string(),
                reason: format!("{n} is not a boolean"),
            }),
            other => Err(mismatch(column, "integer", other)),
        }
    }

    /// Reads a text column.
    pub fn get_string(&self, column: &str) -> Result<String, MappingError> {
        self.get_opt_string(column)?
            .ok_or_else(|| mismatch(column, "text", &Cell::Null))
    }

    /// Reads a nullable text column.
    pub fn get_opt_string(&self, column: &str) -> Result<Option<String>, MappingError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Text(s) => Ok(Some(s.clone())),
            other => Err(mismatch(column, "text", other)),
        }
    }
}

fn mismatch(column: &str, expected: &'static str, actual: &Cell) -> MappingError {
    MappingError::TypeMismatch {
        column: column.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

/// Everything a backend needs to run one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageQuery<'a> {
    /// Table to read from.
    pub table: &'a str,
    /// Columns to return, in order.
    pub columns: &'a [&'a str],
    /// WHERE-clause body; empty means no filter.
    pub selection: &'a str,
    /// Arguments for the placeholders in `selection`.
    pub arguments: &'a [String],
    /// ORDER BY body, if any.
    pub order_by: Option<&'a str>,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

/// A relational store that can run a filtered select.
pub trait Storage {
    /// Runs the query and returns every row, in the order the store yields
    /// them.
    fn query(&self, request: &StorageQuery<'_>) -> Result<Vec<Row>, StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn query(&self, request: &StorageQuery<'_>) -> Result<Vec<Row>, StorageError> {
        (**self).query(request)
    }
}
