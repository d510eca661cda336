//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tdoo")]
#[command(about = "A small task list backed by SQLite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Database file
    #[arg(long, env = "TDOO_DB", default_value = "tdoo.db", global = true)]
    pub db: PathBuf,

    /// Log issued queries (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the tables
    Init,

    /// Add a task
    Add {
        /// Task name
        name: String,

        /// List to add to, created when missing
        #[arg(short, long, default_value = crate::db::DEFAULT_LIST)]
        list: String,

        #[arg(short, long, default_value_t = 0)]
        priority: i64,

        /// Free-form notes, matched by `ls --search`
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Mark a task done
    Done {
        /// Task id
        id: i64,
    },

    /// List tasks
    Ls(LsArgs),
}

#[derive(Debug, Default, Clone, Args)]
pub struct LsArgs {
    /// Only tasks in this list
    #[arg(short, long)]
    pub list: Option<String>,

    /// Include finished tasks
    #[arg(short, long)]
    pub all: bool,

    #[arg(long)]
    pub min_priority: Option<i64>,

    /// Substring of the name or content
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print JSON instead of lines
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ls_filters() {
        let cli = Cli::try_parse_from([
            "tdoo",
            "--db",
            "x.db",
            "ls",
            "--list",
            "Work",
            "--min-priority",
            "2",
            "-n",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("x.db"));
        match cli.command {
            Command::Ls(args) => {
                assert_eq!(args.list.as_deref(), Some("Work"));
                assert_eq!(args.min_priority, Some(2));
                assert_eq!(args.limit, Some(5));
                assert!(!args.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_defaults_to_inbox() {
        let cli = Cli::try_parse_from(["tdoo", "add", "milk"]).unwrap();
        match cli.command {
            Command::Add {
                name,
                list,
                priority,
                content,
            } => {
                assert_eq!(name, "milk");
                assert_eq!(list, "Inbox");
                assert_eq!(priority, 0);
                assert_eq!(content, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
