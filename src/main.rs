mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod period;
mod report;
mod run;
mod util;


use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    logging::init_tracing(&config.log_filter);

    let db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open ledger at {}", config.db_path.display()))?;
    if let Err(e) = db.ensure_schema() {
        // Reads and writes will report their own errors.
        tracing::error!(error = %e, "ledger tables could not be created");
        eprintln!("Warning: {e}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run::as_cli(&args, &db, &mut out)
}
