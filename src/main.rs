mod advice;
mod alerts;
mod models;
mod run;
mod stats;
mod store;
mod ui;

use anyhow::{Context, Result};

use crate::store::{Ledger, SqliteGateway};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let gateway = SqliteGateway::open(&db_path)?;
    let mut ledger = Ledger::open(gateway);

    match args.len() {
        1 => run::as_tui(&mut ledger),
        2.. => run::as_cli(&args, &mut ledger),
        _ => {
            eprintln!("Usage: ledgertui [command]");
            Ok(())
        }
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledgertui", "LedgerTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("ledgertui.db"))
}
