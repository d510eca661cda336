//! Query execution against a [`Storage`].
//!
//! Each call compiles the builder, issues exactly one storage query and maps
//! the returned rows. Storage failures and mapping failures are returned
//! unchanged; there are no retries and no partial results.

use tracing::{debug, trace, warn};

use crate::compile::CompiledClause;
use crate::entity::{Entity, EntityDescriptor};
use crate::error::Result;
use crate::ordering::render_order;
use crate::query::QueryBuilder;
use crate::storage::{Row, Storage, StorageQuery};

impl QueryBuilder {
    /// Returns the first matching `T`, or `None` when nothing matches.
    pub fn get<T: Entity, S: Storage + ?Sized>(&self, store: &S) -> Result<Option<T>> {
        self.get_with(store, &T::descriptor())
    }

    /// Returns every matching `T` in storage order.
    pub fn get_list<T: Entity, S: Storage + ?Sized>(&self, store: &S) -> Result<Vec<T>> {
        self.get_list_with(store, &T::descriptor())
    }

    /// Counts the rows of `T`'s table that match. The limit is ignored.
    pub fn count<T: Entity, S: Storage + ?Sized>(&self, store: &S) -> Result<usize> {
        let columns = [T::ID_COLUMN];
        let rows = self.run(store, T::TABLE, &columns, None)?;
        Ok(rows.len())
    }

    /// Like [`get`](Self::get), with an explicit descriptor.
    pub fn get_with<T, S: Storage + ?Sized>(
        &self,
        store: &S,
        entity: &EntityDescriptor<T>,
    ) -> Result<Option<T>> {
        let rows = self.run(store, entity.table, entity.columns, Some(1))?;
        match rows.first() {
            Some(row) => Ok(Some(entity.map(row)?)),
            None => Ok(None),
        }
    }

    /// Like [`get_list`](Self::get_list), with an explicit descriptor.
    pub fn get_list_with<T, S: Storage + ?Sized>(
        &self,
        store: &S,
        entity: &EntityDescriptor<T>,
    ) -> Result<Vec<T>> {
        let limit = self.get_limit();
        let rows = self.run(store, entity.table, entity.columns, limit)?;
        let items = rows
            .iter()
            .map(|row| entity.map(row))
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(items)
    }

    fn run<S: Storage + ?Sized>(
        &self,
        store: &S,
        table: &str,
        columns: &[&str],
        limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        let CompiledClause {
            selection,
            arguments,
        } = self.compile();
        let order_by = render_order(self.orderings());

        debug!(
            table,
            selection = selection.as_str(),
            args = arguments.len(),
            "issuing query"
        );

        let request = StorageQuery {
            table,
            columns,
            selection: &selection,
            arguments: &arguments,
            order_by: order_by.as_deref(),
            limit,
        };

        let rows = store.query(&request).map_err(|err| {
            warn!(table, error = %err, "storage query failed");
            err
        })?;

        trace!(table, rows = rows.len(), "query returned");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MappingError, QueryError, StorageError};
    use crate::op::Op;
    use crate::storage::Cell;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    struct Note {
        id: i64,
        body: String,
    }

    impl Entity for Note {
        const TABLE: &'static str = "notes";
        const ID_COLUMN: &'static str = "_id";
        const COLUMNS: &'static [&'static str] = &["_id", "body"];

        fn from_row(row: &Row) -> std::result::Result<Self, MappingError> {
            Ok(Note {
                id: row.get_i64("_id")?,
                body: row.get_string("body")?,
            })
        }
    }

    /// Owned copy of the last request seen.
    #[derive(Debug, Clone)]
    struct Seen {
        table: String,
        columns: Vec<String>,
        selection: String,
        arguments: Vec<String>,
        order_by: Option<String>,
        limit: Option<usize>,
    }

    /// Records the last request and replays canned rows.
    struct Recording {
        rows: Vec<Row>,
        last: RefCell<Option<Seen>>,
    }

    impl Recording {
        fn new(rows: Vec<Row>) -> Self {
            Recording {
                rows,
                last: RefCell::new(None),
            }
        }

        fn seen(&self) -> Seen {
            self.last.borrow().clone().expect("no query issued")
        }
    }

    impl Storage for Recording {
        fn query(&self, req: &StorageQuery<'_>) -> std::result::Result<Vec<Row>, StorageError> {
            *self.last.borrow_mut() = Some(Seen {
                table: req.table.to_string(),
                columns: req.columns.iter().map(|c| c.to_string()).collect(),
                selection: req.selection.to_string(),
                arguments: req.arguments.to_vec(),
                order_by: req.order_by.map(str::to_string),
                limit: req.limit,
            });
            Ok(self.rows.clone())
        }
    }

    fn note(id: i64, body: &str) -> Row {
        Row::from_pairs([("_id", Cell::Integer(id)), ("body", Cell::Text(body.into()))])
    }

    #[test]
    fn request_carries_compiled_clause() {
        let store = Recording::new(vec![note(1, "a")]);
        let qb = QueryBuilder::new()
            .and("body", Op::Like, "a%")
            .unwrap()
            .order_desc("_id")
            .limit(10);

        let _ = qb.get_list::<Note, _>(&store).unwrap();
        let seen = store.seen();
        assert_eq!(seen.table, "notes");
        assert_eq!(seen.columns, vec!["_id", "body"]);
        assert_eq!(seen.selection, "body LIKE ?");
        assert_eq!(seen.arguments, vec!["a%"]);
        assert_eq!(seen.order_by.as_deref(), Some("_id DESC"));
        assert_eq!(seen.limit, Some(10));
    }

    #[test]
    fn get_asks_for_one_row_and_maps_first() {
        let store = Recording::new(vec![note(1, "first"), note(2, "second")]);
        let got: Option<Note> = QueryBuilder::new().get(&store).unwrap();
        assert_eq!(
            got,
            Some(Note {
                id: 1,
                body: "first".into()
            })
        );
        assert_eq!(store.seen().limit, Some(1));
    }

    #[test]
    fn count_reads_identity_column() {
        let store = Recording::new(vec![note(1, "a"), note(2, "b")]);
        let n = QueryBuilder::new().count::<Note, _>(&store).unwrap();
        assert_eq!(n, 2);
        assert_eq!(store.seen().columns, vec!["_id"]);
    }

    #[test]
    fn mapping_error_aborts_list() {
        let bad = Row::from_pairs([("_id", Cell::Text("x".into())), ("body", Cell::Null)]);
        let store = Recording::new(vec![note(1, "ok"), bad, note(3, "ok")]);
        let err = QueryBuilder::new().get_list::<Note, _>(&store).unwrap_err();
        assert!(matches!(err, QueryError::Mapping(_)));
    }
}
