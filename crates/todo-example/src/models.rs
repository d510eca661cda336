//! Stored records.

use serde::{Deserialize, Serialize};
use tdoo_query::{Entity, Identified, MappingError, Row};

/// A named list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub name: String,
}

impl Entity for List {
    const TABLE: &'static str = "lists";
    const ID_COLUMN: &'static str = "_id";
    const COLUMNS: &'static [&'static str] = &["_id", "name"];

    fn from_row(row: &Row) -> Result<Self, MappingError> {
        Ok(List {
            id: row.get_i64("_id")?,
            name: row.get_string("name")?,
        })
    }
}

impl Identified for List {
    fn identity(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
    pub content: String,
    pub done: bool,
    pub priority: i64,
}

impl Entity for Task {
    const TABLE: &'static str = "tasks";
    const ID_COLUMN: &'static str = "_id";
    const COLUMNS: &'static [&'static str] =
        &["_id", "list_id", "name", "content", "done", "priority"];

    fn from_row(row: &Row) -> Result<Self, MappingError> {
        Ok(Task {
            id: row.get_i64("_id")?,
            list_id: row.get_i64("list_id")?,
            name: row.get_string("name")?,
            content: row.get_opt_string("content")?.unwrap_or_default(),
            done: row.get_bool("done")?,
            priority: row.get_i64("priority")?,
        })
    }
}

impl Identified for Task {
    fn identity(&self) -> i64 {
        self.id
    }
}
