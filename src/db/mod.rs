mod models;
mod seeders;
mod sqlite;
mod store;

pub use models::*;
pub use seeders::{ensure_admin_account, seed_classifications};
pub use sqlite::SqliteStore;
pub use store::{AccountStore, InventoryStore, StoreError};

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = SqlitePool;

/// Drop `--` comments so they never take part in statement splitting.
/// Migrations keep `--` out of string literals.
fn strip_comments(sql: &str) -> String {
    sql.lines()
        .map(|line| match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    for statement in strip_comments(sql).split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create the directory holding a file-backed database, if any.
fn ensure_database_dir(url: &str) -> Result<()> {
    if is_in_memory(url) {
        return Ok(());
    }
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

pub async fn init(config: &DatabaseConfig) -> Result<DbPool> {
    info!("Initializing database at {}", config.url);

    ensure_database_dir(&config.url)?;

    // Every in-memory connection is its own database, so pin exactly one.
    let options = if is_in_memory(&config.url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = options
        .connect(&config.url)
        .await
        .with_context(|| format!("Failed to connect to {}", config.url))?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    // Migration 001: classification, inventory and account tables
    execute_sql(pool, include_str!("../../migrations/001_initial.sql")).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    init(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("in-memory database")
}
