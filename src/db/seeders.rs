//! Database seeders for built-in data
//!
//! Default classifications for an empty site, and the configured Admin
//! account (the only way a non-Client role is created).

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use super::models::AccountType;
use crate::auth::password::hash_password;

const DEFAULT_CLASSIFICATIONS: [&str; 5] = ["Custom", "Sedan", "Sport", "SUV", "Truck"];

/// Insert the default classifications when the table is empty.
pub async fn seed_classifications(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classification")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    info!("Seeding default classifications...");
    for name in DEFAULT_CLASSIFICATIONS {
        sqlx::query("INSERT OR IGNORE INTO classification (classification_name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Create an Admin account for `email` unless one already exists.
pub async fn ensure_admin_account(pool: &SqlitePool, email: &str, password: &str) -> Result<()> {
    let email = email.trim().to_lowercase();
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account WHERE account_email = ?")
        .bind(&email)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let password_hash = hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?;

    sqlx::query(
        r#"
        INSERT INTO account (account_firstname, account_lastname, account_email, account_password, account_type)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind("Site")
    .bind("Admin")
    .bind(&email)
    .bind(&password_hash)
    .bind(AccountType::Admin)
    .execute(pool)
    .await
    .context("Failed to create admin account")?;

    info!(email = %email, "Created admin account");
    Ok(())
}
