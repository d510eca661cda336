use clap::Parser;
use todo_example::{commands, Cli, Db};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let db = Db::open(&cli.db)?;
    let output = commands::run(cli.command, &db)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
