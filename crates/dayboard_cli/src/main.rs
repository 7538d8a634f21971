//! `dayboard` command-line entry point.
//!
//! # Responsibility
//! - Resolve settings, start file logging and open the database.
//! - Hand the parsed subcommand to `commands::dispatch`.

mod cli;
mod commands;
mod config;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dayboard_core::db::open_db;
use dayboard_core::{core_version, init_logging, SqliteKeyValueStore};
use log::{error, info};

use crate::cli::Cli;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = config::load_file_config(cli.config.as_deref())?;
    let settings = config::resolve(cli.data_dir, cli.log_level, file)?;

    init_logging(&settings.log_level, &settings.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    fs::create_dir_all(&settings.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            settings.data_dir.display()
        )
    })?;
    let db_path = settings.database_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let store = SqliteKeyValueStore::new(&conn);

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    commands::dispatch(cli.command, &store, today)
}
