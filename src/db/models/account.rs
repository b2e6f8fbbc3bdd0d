//! Account models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account roles. Staff (Employee, Admin) may manage inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum AccountType {
    Client,
    Employee,
    Admin,
}

impl AccountType {
    pub fn is_staff(&self) -> bool {
        matches!(self, AccountType::Employee | AccountType::Admin)
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Client
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Client => write!(f, "Client"),
            AccountType::Employee => write!(f, "Employee"),
            AccountType::Admin => write!(f, "Admin"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(AccountType::Client),
            "employee" => Ok(AccountType::Employee),
            "admin" => Ok(AccountType::Admin),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

/// A row of the `account` table. Holds the password hash, so it is never
/// serialized; use `SessionClaims` for anything leaving the process.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub account_id: i64,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_password: String,
    pub account_type: AccountType,
}

/// Insert payload. The store always writes role `Client` for these.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}
