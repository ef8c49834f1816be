//! TackleTask Tracker command-line entry point.
//!
//! # Responsibility
//! - Resolve paths, start logging, open the store, run the menu loop.
//! - Own the single database connection for the whole session.

mod config;
mod prompt;
mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppPaths, Cli};
use log::info;
use prompt::Prompter;
use shell::Shell;
use tackletask_core::db::open_db;
use tackletask_core::{default_log_level, init_logging, SqliteTrackerService};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = AppPaths::resolve(&cli)?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &paths.log_dir) {
        // Logging is diagnostics only; the tracker still works without it.
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&paths.db_path)
        .with_context(|| format!("cannot open database `{}`", paths.db_path.display()))?;
    let service = SqliteTrackerService::open(&conn).context("database is not usable")?;
    info!(
        "event=session_start module=cli status=ok core_version={}",
        tackletask_core::core_version()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(service, Prompter::new(stdin.lock(), stdout.lock()));
    shell.run().context("terminal I/O failed")?;

    info!("event=session_end module=cli status=ok");
    Ok(())
}
