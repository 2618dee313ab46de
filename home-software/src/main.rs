//! home - household cleaning routines and recipe suggestions
//!
//! Resolves the database path, opens the pool, runs one command, and closes
//! the pool before exiting. Any error aborts the command with a non-zero exit.

use anyhow::{Context, Result};
use clap::Parser;
use home_common::config::{resolve_database_path, TomlConfig, DATABASE_ENV_VAR};
use home_common::db::open_database;
use home_software::cli::{self, Cli};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "home=info,home_software=info,home_common=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "home v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Cli::parse();
    let config = TomlConfig::load_or_default();

    let db_path = resolve_database_path(args.database.as_deref(), DATABASE_ENV_VAR, &config);
    debug!("Database path: {}", db_path.display());

    let pool = open_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let result = cli::run(args.command, &pool, &config).await;

    pool.close().await;
    result
}
