//! tdoo - a small task list backed by SQLite.
//!
//! Tasks live in named lists. Every read goes through
//! [`tdoo_query::QueryBuilder`]; writes are plain statements.

pub mod cli;
pub mod commands;
pub mod db;
pub mod models;

pub use cli::{Cli, Command, LsArgs};
pub use db::Db;
pub use models::{List, Task};
