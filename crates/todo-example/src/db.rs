//! SQLite database holding lists and tasks.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use tdoo_query::QueryBuilder;
use tracing::{debug, info};

use crate::models::{List, Task};

/// List used when `add` is given none.
pub const DEFAULT_LIST: &str = "Inbox";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS lists (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS tasks (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id INTEGER NOT NULL REFERENCES lists(_id),
    name TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    done INTEGER NOT NULL DEFAULT 0,
    priority INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_tasks_list ON tasks(list_id);
";

pub struct Db {
    conn: Connection,
}

impl Db {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("cannot open database {}", path.display()))?;
        debug!(path = %path.display(), "opened database");
        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Db {
            conn: Connection::open_in_memory()?,
        })
    }

    /// The underlying connection, usable as a [`tdoo_query::Storage`].
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Creates the tables. Safe to run more than once.
    pub fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("failed to create schema")?;
        info!("schema ready");
        Ok(())
    }

    pub fn find_list(&self, name: &str) -> Result<Option<List>> {
        let list = QueryBuilder::new().and_eq("name", name)?.get(&self.conn)?;
        Ok(list)
    }

    /// Returns the list called `name`, creating it when missing.
    pub fn ensure_list(&self, name: &str) -> Result<List> {
        if let Some(list) = self.find_list(name)? {
            return Ok(list);
        }
        self.conn
            .execute("INSERT INTO lists (name) VALUES (?1)", params![name])
            .with_context(|| format!("failed to create list '{name}'"))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name, "created list");
        Ok(List {
            id,
            name: name.to_string(),
        })
    }

    pub fn insert_task(
        &self,
        list: &List,
        name: &str,
        content: &str,
        priority: i64,
    ) -> Result<Task> {
        self.conn
            .execute(
                "INSERT INTO tasks (list_id, name, content, priority) VALUES (?1, ?2, ?3, ?4)",
                params![list.id, name, content, priority],
            )
            .context("failed to insert task")?;
        let id = self.conn.last_insert_rowid();
        debug!(id, list = list.name.as_str(), "inserted task");
        Ok(Task {
            id,
            list_id: list.id,
            name: name.to_string(),
            content: content.to_string(),
            done: false,
            priority,
        })
    }

    pub fn find_task(&self, id: i64) -> Result<Option<Task>> {
        let task = QueryBuilder::new().and_eq("_id", id)?.get(&self.conn)?;
        Ok(task)
    }

    /// Marks a task done and returns its updated state.
    pub fn mark_done(&self, id: i64) -> Result<Task> {
        let Some(mut task) = self.find_task(id)? else {
            bail!("no task with id {id}");
        };
        self.conn
            .execute("UPDATE tasks SET done = 1 WHERE _id = ?1", params![id])
            .context("failed to update task")?;
        task.done = true;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Db {
        let db = Db::open_in_memory().unwrap();
        db.init_schema().unwrap();
        db
    }

    #[test]
    fn init_is_repeatable() {
        let db = db();
        db.init_schema().unwrap();
    }

    #[test]
    fn ensure_list_reuses_existing() {
        let db = db();
        let first = db.ensure_list("Work").unwrap();
        let again = db.ensure_list("Work").unwrap();
        assert_eq!(first, again);
        assert_ne!(db.ensure_list("Home").unwrap().id, first.id);
    }

    #[test]
    fn insert_then_find() {
        let db = db();
        let list = db.ensure_list(DEFAULT_LIST).unwrap();
        let task = db.insert_task(&list, "milk", "2 litres", 1).unwrap();
        assert_eq!(db.find_task(task.id).unwrap(), Some(task));
    }

    #[test]
    fn mark_done_updates_row() {
        let db = db();
        let list = db.ensure_list(DEFAULT_LIST).unwrap();
        let task = db.insert_task(&list, "milk", "", 0).unwrap();

        let done = db.mark_done(task.id).unwrap();
        assert!(done.done);
        assert!(db.find_task(task.id).unwrap().unwrap().done);
    }

    #[test]
    fn mark_done_unknown_id_fails() {
        let db = db();
        let err = db.mark_done(42).unwrap_err();
        assert!(err.to_string().contains("42"));
    }
}
