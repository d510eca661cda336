//! Error types for building and executing queries.

use thiserror::Error;

use crate::op::Op;

/// Boxed source error carried by [`StorageError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when building or executing queries.
///
/// Builder-time variants (`InvalidOperator`, `InvalidColumn`,
/// `InvalidValue`) are returned by the `and`/`or` call that introduced the
/// bad condition. Compilation never fails. Execution-time variants are passed through unchanged.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The value shape does not fit the operator.
    #[error("operator '{op}' cannot take this value: {reason}")]
    InvalidOperator { op: Op, reason: String },

    /// Empty or blank column name.
    #[error("invalid column name: {column:?}")]
    InvalidColumn { column: String },

    /// A value with no argument form, such as a NaN or infinite float.
    #[error("invalid value for column '{column}': {reason}")]
    InvalidValue { column: String, reason: &'static str },

    /// The storage backend could not run the query.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// A returned row could not be turned into the target type.
    #[error("row mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

/// Failure reported by a [`Storage`](crate::Storage) implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl StorageError {
    /// Creates a storage error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        StorageError {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a backend error, keeping it as the source.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StorageError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the message without the source chain.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by a row mapper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// The row has no column with this name.
    #[error("column '{0}' missing from row")]
    MissingColumn(String),

    /// The cell holds a different type than the mapper expected.
    #[error("column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The cell type is right but its content is not acceptable.
    #[error("column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
