mod cli;
mod config;
mod db;
mod engine;
mod models;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let mut conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Habit { action } => {
            handlers::handle_habit(&conn, &action, today)?;
        }
        Commands::Task { action } => {
            handlers::handle_task(&conn, &action, today)?;
        }
        Commands::Garden => {
            handlers::handle_garden(&conn, &config, today)?;
        }
        Commands::Place { item, col, row } => {
            handlers::handle_place(&conn, &config, item, col, row)?;
        }
        Commands::Unplace { item } => {
            handlers::handle_unplace(&conn, item)?;
        }
        Commands::Focus { action } => {
            handlers::handle_focus(&conn, &action, today)?;
        }
        Commands::Stats { week } => {
            handlers::handle_stats(&conn, &config, week, today)?;
        }
        Commands::Export => {
            handlers::handle_export(&mut conn)?;
        }
        Commands::Import { file } => {
            handlers::handle_import(&mut conn, &file)?;
        }
    }

    Ok(())
}
