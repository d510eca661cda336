//! Command handlers.
//!
//! Each handler returns the text to print so it can be tested without a
//! terminal.

use std::collections::HashMap;

use anyhow::Result;
use tdoo_query::{Op, QueryBuilder, Value};
use tracing::debug;

use crate::cli::{Command, LsArgs};
use crate::db::Db;
use crate::models::{List, Task};

pub fn run(command: Command, db: &Db) -> Result<String> {
    match command {
        Command::Init => init(db),
        Command::Add {
            name,
            list,
            priority,
            content,
        } => add(db, &name, &list, priority, &content),
        Command::Done { id } => done(db, id),
        Command::Ls(args) => ls(db, &args),
    }
}

pub fn init(db: &Db) -> Result<String> {
    db.init_schema()?;
    Ok("initialized".to_string())
}

pub fn add(db: &Db, name: &str, list: &str, priority: i64, content: &str) -> Result<String> {
    let list = db.ensure_list(list)?;
    let task = db.insert_task(&list, name, content, priority)?;
    Ok(format!("added #{} to {}", task.id, list.name))
}

pub fn done(db: &Db, id: i64) -> Result<String> {
    let task = db.mark_done(id)?;
    Ok(format!("done #{} {}", task.id, task.name))
}

/// Translates `ls` flags into a task query.
pub fn task_filter(args: &LsArgs) -> tdoo_query::Result<QueryBuilder> {
    let mut qb = QueryBuilder::new();

    if !args.all {
        qb = qb.and_eq("done", false)?;
    }
    if let Some(list) = &args.list {
        let ids = QueryBuilder::new()
            .select("_id")
            .and_eq("name", list.as_str())?;
        qb = qb.and("list_id", Op::In, Value::subquery::<List>(ids))?;
    }
    if let Some(min) = args.min_priority {
        qb = qb.and("priority", Op::Ge, min)?;
    }
    if let Some(text) = &args.search {
        let pattern = format!("%{text}%");
        let matches = QueryBuilder::new()
            .and("name", Op::Like, pattern.as_str())?
            .or("content", Op::Like, pattern.as_str())?;
        qb = qb.and_group(matches);
    }

    qb = qb.order_desc("priority").order_asc("_id");
    if let Some(n) = args.limit {
        qb = qb.limit(n);
    }
    Ok(qb)
}

pub fn ls(db: &Db, args: &LsArgs) -> Result<String> {
    let qb = task_filter(args)?;
    debug!(selection = %qb.selection(), "listing tasks");
    let tasks: Vec<Task> = qb.get_list(db.conn())?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&tasks)?);
    }

    let lists: HashMap<i64, String> = QueryBuilder::new()
        .get_list::<List, _>(db.conn())?
        .into_iter()
        .map(|l| (l.id, l.name))
        .collect();

    let lines: Vec<String> = tasks
        .iter()
        .map(|task| {
            let list = lists.get(&task.list_id).map(String::as_str).unwrap_or("?");
            format_task(task, list)
        })
        .collect();
    Ok(lines.join("\n"))
}

fn format_task(task: &Task, list: &str) -> String {
    let mark = if task.done { "x" } else { " " };
    let mut line = format!("{:>4} [{mark}] {}", task.id, task.name);
    if task.priority != 0 {
        line.push_str(&format!(" !{}", task.priority));
    }
    line.push_str(&format!(" @{list}"));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_open_tasks() {
        let qb = task_filter(&LsArgs::default()).unwrap();
        assert_eq!(qb.selection(), "done = ?");
        assert_eq!(qb.selection_arguments(), vec!["0"]);
    }

    #[test]
    fn all_flags_compose() {
        let args = LsArgs {
            list: Some("Work".into()),
            all: false,
            min_priority: Some(1),
            search: Some("bank".into()),
            limit: Some(3),
            json: false,
        };
        let qb = task_filter(&args).unwrap();
        assert_eq!(
            qb.selection(),
            "done = ? AND list_id IN (SELECT _id FROM lists WHERE name = ?) \
             AND priority >= ? AND (name LIKE ? OR content LIKE ?)"
        );
        assert_eq!(
            qb.selection_arguments(),
            vec!["0", "Work", "1", "%bank%", "%bank%"]
        );
        assert_eq!(qb.get_limit(), Some(3));
    }

    #[test]
    fn all_drops_done_filter() {
        let args = LsArgs {
            all: true,
            ..LsArgs::default()
        };
        assert!(task_filter(&args).unwrap().is_empty());
    }

    #[test]
    fn format_marks_done_and_priority() {
        let task = Task {
            id: 7,
            list_id: 1,
            name: "milk".into(),
            content: String::new(),
            done: true,
            priority: 2,
        };
        assert_eq!(format_task(&task, "Inbox"), "   7 [x] milk !2 @Inbox");
    }
}
