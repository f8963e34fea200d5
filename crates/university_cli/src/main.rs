//! Interactive console for department and lecturer queries.
//!
//! Settings come from `UNIVERSITY_*` environment variables (a `.env` file is
//! honored); command-line flags override them.

mod menu;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use menu::Menu;
use rusqlite::Connection;
use std::io;
use std::path::PathBuf;
use university_core::db::{open_db, open_db_in_memory};
use university_core::{
    init_logging, AppConfig, DepartmentService, LecturerService, SqliteDepartmentRepository,
    SqliteLecturerRepository,
};

#[derive(Debug, Parser)]
#[command(name = "university")]
#[command(about = "Query university departments and lecturers", version)]
struct Cli {
    /// SQLite database file; an in-memory database is used when unset.
    #[arg(long)]
    db: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(dir) = &config.log_dir {
        init_logging(config.log_level, &dir.to_string_lossy())
            .with_context(|| format!("failed to start logging in `{}`", dir.display()))?;
    }

    let conn = open_connection(config.db_path)?;
    let departments = DepartmentService::new(
        SqliteDepartmentRepository::new(&conn),
        LecturerService::new(SqliteLecturerRepository::new(&conn)),
    );

    info!("event=cli_start module=cli status=ok");
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&departments, stdin.lock(), stdout.lock())
        .run()
        .context("console session failed")?;
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

/// Environment settings with command-line flags applied on top.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env().context("invalid environment configuration")?;
    if let Some(level) = &cli.log_level {
        config
            .set_log_level(level)
            .context("invalid --log-level value")?;
    }
    if let Some(dir) = &cli.log_dir {
        if !dir.is_absolute() {
            bail!("--log-dir must be an absolute path, got `{}`", dir.display());
        }
        config.log_dir = Some(dir.clone());
    }
    if let Some(db) = &cli.db {
        config.db_path = Some(db.clone());
    }
    Ok(config)
}

fn open_connection(db_path: Option<PathBuf>) -> Result<Connection> {
    match db_path {
        Some(path) => open_db(&path)
            .with_context(|| format!("failed to open database `{}`", path.display())),
        None => open_db_in_memory().context("failed to open in-memory database"),
    }
}
