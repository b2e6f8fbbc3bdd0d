//! SQLite implementation of the store traits.

use async_trait::async_trait;

use super::models::{
    Account, AccountType, Classification, NewAccount, ProfileUpdate, Vehicle, VehicleInput,
};
use super::store::{AccountStore, InventoryStore, StoreError};
use super::DbPool;

const VEHICLE_SELECT: &str = r#"
    SELECT i.inv_id, i.inv_make, i.inv_model, i.inv_year, i.inv_description,
           i.inv_image, i.inv_thumbnail, i.inv_price, i.inv_miles, i.inv_color,
           i.classification_id, c.classification_name
    FROM inventory AS i
    JOIN classification AS c ON i.classification_id = c.classification_id
"#;

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account WHERE account_email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn create_account(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (account_firstname, account_lastname, account_email, account_password, account_type)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&account.firstname)
        .bind(&account.lastname)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(AccountType::Client)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            account_id = created.account_id,
            email = %created.account_email,
            "Account created"
        );
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE account_email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn find_by_id(&self, account_id: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn update_profile(
        &self,
        account_id: i64,
        update: &ProfileUpdate,
    ) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE account SET
                account_firstname = ?,
                account_lastname = ?,
                account_email = ?
            WHERE account_id = ?
            RETURNING *
            "#,
        )
        .bind(&update.firstname)
        .bind(&update.lastname)
        .bind(&update.email)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn update_password(
        &self,
        account_id: i64,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE account SET account_password = ? WHERE account_id = ?")
            .bind(password_hash)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for SqliteStore {
    async fn classifications(&self) -> Result<Vec<Classification>, StoreError> {
        let rows = sqlx::query_as::<_, Classification>(
            "SELECT * FROM classification ORDER BY classification_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn classification(
        &self,
        classification_id: i64,
    ) -> Result<Option<Classification>, StoreError> {
        let row = sqlx::query_as::<_, Classification>(
            "SELECT * FROM classification WHERE classification_id = ?",
        )
        .bind(classification_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn add_classification(&self, name: &str) -> Result<Classification, StoreError> {
        let row = sqlx::query_as::<_, Classification>(
            "INSERT INTO classification (classification_name) VALUES (?) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn vehicles_by_classification(
        &self,
        classification_id: i64,
    ) -> Result<Vec<Vehicle>, StoreError> {
        let sql = format!(
            "{} WHERE i.classification_id = ? ORDER BY i.inv_make, i.inv_model",
            VEHICLE_SELECT
        );
        let rows = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(classification_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn vehicle(&self, inv_id: i64) -> Result<Option<Vehicle>, StoreError> {
        let sql = format!("{} WHERE i.inv_id = ?", VEHICLE_SELECT);
        let row = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(inv_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add_vehicle(&self, input: &VehicleInput) -> Result<i64, StoreError> {
        let inv_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory
                (classification_id, inv_make, inv_model, inv_year, inv_description,
                 inv_image, inv_thumbnail, inv_price, inv_miles, inv_color)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING inv_id
            "#,
        )
        .bind(input.classification_id)
        .bind(&input.make)
        .bind(&input.model)
        .bind(input.year)
        .bind(&input.description)
        .bind(&input.image)
        .bind(&input.thumbnail)
        .bind(input.price)
        .bind(input.miles)
        .bind(&input.color)
        .fetch_one(&self.pool)
        .await?;
        Ok(inv_id)
    }

    async fn update_vehicle(
        &self,
        inv_id: i64,
        input: &VehicleInput,
    ) -> Result<Vehicle, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory SET
                inv_make = ?,
                inv_model = ?,
                inv_description = ?,
                inv_image = ?,
                inv_thumbnail = ?,
                inv_price = ?,
                inv_year = ?,
                inv_miles = ?,
                inv_color = ?,
                classification_id = ?
            WHERE inv_id = ?
            "#,
        )
        .bind(&input.make)
        .bind(&input.model)
        .bind(&input.description)
        .bind(&input.image)
        .bind(&input.thumbnail)
        .bind(input.price)
        .bind(input.year)
        .bind(input.miles)
        .bind(&input.color)
        .bind(input.classification_id)
        .bind(inv_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        self.vehicle(inv_id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_vehicle(&self, inv_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM inventory WHERE inv_id = ?")
            .bind(inv_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
