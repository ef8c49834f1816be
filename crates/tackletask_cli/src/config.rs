//! Command-line configuration and path resolution.
//!
//! ## Resolution order
//!
//! 1. `--db` / `TACKLETASK_DB`
//! 2. `<platform data dir>/tackletask/tackletask_tracker.db`
//! 3. `./tackletask_tracker.db` when no data dir is known
//!
//! Logs go to `--log-dir`, or `logs/` next to the database file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "tackletask";
const DB_FILE_NAME: &str = "tackletask_tracker.db";

#[derive(Debug, Parser)]
#[command(
    name = "tackletask",
    version,
    about = "Track clients, projects and billable tasks from the terminal"
)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, env = "TACKLETASK_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "TACKLETASK_LOG", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Resolved absolute locations for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        Ok(Self::resolve_with(cli, &cwd, dirs::data_dir()))
    }

    fn resolve_with(cli: &Cli, cwd: &Path, data_dir: Option<PathBuf>) -> Self {
        let db_path = match &cli.db {
            Some(path) => absolutize(path, cwd),
            None => data_dir
                .map(|dir| dir.join(APP_DIR_NAME))
                .unwrap_or_else(|| cwd.to_path_buf())
                .join(DB_FILE_NAME),
        };

        let log_dir = match &cli.log_dir {
            Some(dir) => absolutize(dir, cwd),
            None => db_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf())
                .join("logs"),
        };

        Self { db_path, log_dir }
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
