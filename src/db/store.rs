//! Data-access seams used by the handlers and the validation engine.

use async_trait::async_trait;

use super::models::{
    Account, Classification, NewAccount, ProfileUpdate, Vehicle, VehicleInput,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a record with this value already exists")]
    Duplicate,
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate
            }
            other => StoreError::Database(other),
        }
    }
}

/// Credential store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a self-registered account. The role is always `Client`.
    async fn create_account(&self, account: &NewAccount) -> Result<Account, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_id(&self, account_id: i64) -> Result<Option<Account>, StoreError>;

    async fn update_profile(
        &self,
        account_id: i64,
        update: &ProfileUpdate,
    ) -> Result<Account, StoreError>;

    async fn update_password(&self, account_id: i64, password_hash: &str)
        -> Result<(), StoreError>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All classifications ordered by name.
    async fn classifications(&self) -> Result<Vec<Classification>, StoreError>;

    async fn classification(&self, classification_id: i64)
        -> Result<Option<Classification>, StoreError>;

    async fn add_classification(&self, name: &str) -> Result<Classification, StoreError>;

    async fn vehicles_by_classification(
        &self,
        classification_id: i64,
    ) -> Result<Vec<Vehicle>, StoreError>;

    async fn vehicle(&self, inv_id: i64) -> Result<Option<Vehicle>, StoreError>;

    /// Returns the new `inv_id`.
    async fn add_vehicle(&self, input: &VehicleInput) -> Result<i64, StoreError>;

    async fn update_vehicle(&self, inv_id: i64, input: &VehicleInput)
        -> Result<Vehicle, StoreError>;

    /// Returns false when no row matched.
    async fn delete_vehicle(&self, inv_id: i64) -> Result<bool, StoreError>;
}
