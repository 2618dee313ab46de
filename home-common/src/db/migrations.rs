//! Database schema migrations
//!
//! Versioned schema migrations embedded in the binary, tracked in the
//! `schema_version` table.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases already at that version will not re-run them
//! 2. **Always add new migrations** - one SQL file per schema change, appended to [`MIGRATIONS`]
//! 3. **Keep statements idempotent** - `IF NOT EXISTS` everywhere
//!
//! Each migration runs in its own transaction together with its
//! `schema_version` row, so a failed migration leaves no trace.

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// A single embedded schema migration
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

/// All migrations, in application order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "cleaning routines and records",
        sql: include_str!("../../migrations/001_cleaning.sql"),
    },
    Migration {
        version: 2,
        name: "recipes and suggestions",
        sql: include_str!("../../migrations/002_recipes.sql"),
    },
];

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn schema_version(pool: &SqlitePool) -> Result<i64> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
            .fetch_one(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

/// Apply every pending migration.
///
/// Returns the number of migrations applied (0 when already up to date).
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize> {
    create_schema_version_table(pool).await?;
    let current_version = schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(0);
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(0);
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
        let mut tx = pool.begin().await?;

        sqlx::raw_sql(migration.sql).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(migration.version)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("✓ Migration v{} completed ({})", migration.version, migration.name);
        applied += 1;
    }

    Ok(applied)
}
