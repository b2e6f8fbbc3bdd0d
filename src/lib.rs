pub mod auth;
pub mod config;
pub mod db;
pub mod ui;
pub mod validation;

pub use db::DbPool;

use anyhow::{Context, Result};
use axum_extra::extract::cookie::Key;
use config::Config;
use sha2::{Digest, Sha512};
use std::sync::Arc;

use crate::auth::{TokenCodec, SESSION_TTL_SECS};
use crate::db::{AccountStore, InventoryStore, SqliteStore};

/// Shared, read-only request context built once at startup.
pub struct AppState {
    pub config: Config,
    pub accounts: Arc<dyn AccountStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub tokens: TokenCodec,
    /// Signs the flash cookie
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Result<Self> {
        let store = SqliteStore::new(db);
        Self::with_stores(config, Arc::new(store.clone()), Arc::new(store))
    }

    pub fn with_stores(
        config: Config,
        accounts: Arc<dyn AccountStore>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Result<Self> {
        let token_secret = config
            .token_secret()
            .context("a token secret is required to sign sessions")?;
        let session_secret = config
            .session_secret()
            .context("a session secret is required to sign cookies")?;

        let tokens = TokenCodec::new(token_secret.as_bytes(), SESSION_TTL_SECS);
        // Key needs 64 bytes of material
        let cookie_key = Key::from(Sha512::digest(session_secret.as_bytes()).as_slice());

        Ok(Self {
            config,
            accounts,
            inventory,
            tokens,
            cookie_key,
        })
    }
}
