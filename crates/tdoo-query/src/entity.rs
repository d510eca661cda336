//! Entity descriptors and row mapping.
//!
//! A queryable type declares where it lives (table, identity column, column
//! list) and how a row becomes a value. The executor is generic over that
//! capability and never inspects the target type itself.

use crate::error::MappingError;
use crate::storage::Row;

/// Function turning one row into a `T`.
pub type RowMapper<T> = fn(&Row) -> Result<T, MappingError>;

/// A type stored in one table and readable from its rows.
///
/// # Example
///
/// ```
/// use tdoo_query::{Entity, MappingError, Row};
///
/// struct List {
///     id: i64,
///     name: String,
/// }
///
/// impl Entity for List {
///     const TABLE: &'static str = "lists";
///     const ID_COLUMN: &'static str = "_id";
///     const COLUMNS: &'static [&'static str] = &["_id", "name"];
///
///     fn from_row(row: &Row) -> Result<Self, MappingError> {
///         Ok(List {
///             id: row.get_i64("_id")?,
///             name: row.get_string("name")?,
///         })
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// Table name.
    const TABLE: &'static str;
    /// Primary key column.
    const ID_COLUMN: &'static str;
    /// Every column the mapper reads, in select order.
    const COLUMNS: &'static [&'static str];

    /// Maps a row shaped like [`Self::COLUMNS`] into a value.
    fn from_row(row: &Row) -> Result<Self, MappingError>;

    /// Returns the value-level descriptor for this type.
    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::new(Self::TABLE, Self::ID_COLUMN, Self::COLUMNS, Self::from_row)
    }
}

/// Value-level entity description with an injected row mapper.
///
/// Use this when the mapping is chosen at runtime, e.g. a different mapper
/// for the same table.
pub struct EntityDescriptor<T> {
    /// Table name.
    pub table: &'static str,
    /// Primary key column.
    pub id_column: &'static str,
    /// Columns requested from storage.
    pub columns: &'static [&'static str],
    /// Row mapper.
    pub mapper: RowMapper<T>,
}

impl<T> EntityDescriptor<T> {
    /// Creates a descriptor.
    pub fn new(
        table: &'static str,
        id_column: &'static str,
        columns: &'static [&'static str],
        mapper: RowMapper<T>,
    ) -> Self {
        EntityDescriptor {
            table,
            id_column,
            columns,
            mapper,
        }
    }

    /// Maps one row.
    pub fn map(&self, row: &Row) -> Result<T, MappingError> {
        (self.mapper)(row)
    }
}

impl<T> Clone for EntityDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityDescriptor<T> {}

impl<T> std::fmt::Debug for EntityDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("table", &self.table)
            .field("id_column", &self.id_column)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}
