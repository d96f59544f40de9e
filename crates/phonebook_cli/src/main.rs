//! `phonebook` executable.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database once.
//! - Hand stdin/stdout to the interactive shell and close the database on exit.

mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use phonebook_core::db::open_db;
use phonebook_core::{core_version, init_logging, AppConfig, EditController, SqliteContactRepository};

use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Small single-user address book")]
struct Cli {
    /// SQLite database file (overrides PHONEBOOK_DB_PATH)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides PHONEBOOK_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides PHONEBOOK_LOG_DIR)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.set_log_level(level)?;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let repo = SqliteContactRepository::try_new(&conn)?;

    println!("Phone Book {} ({})", core_version(), config.db_path.display());
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(EditController::new(repo), stdin.lock(), stdout.lock()).run()?;

    info!("event=app_exit module=cli status=ok");
    Ok(())
}
