//! Password hashing and verification using argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(err: argon2::password_hash::Error) -> Self {
        PasswordError::Hash(err)
    }
}

/// Hash a password using argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. A hash that cannot be parsed is
/// an error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Digest with the default argon2id parameters that matches no password.
/// Checked in place of a stored digest when an email is unknown.
const ABSENT_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Z2qDZduHR/G7RPBA7cS9lQ$M99ks2yAjwPbqKv2NNbKPs9Z4Ku3L4F9Pa60VwYW8ww";

/// `hash_password` on the blocking pool.
pub async fn hash(password: String) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    Ok(hash)
}

/// `verify_password` on the blocking pool.
pub async fn verify(password: String, hash: String) -> Result<bool, PasswordError> {
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    Ok(ok)
}

/// Verify against `hash` when present, otherwise spend the same work on a
/// digest that never matches.
pub async fn verify_or_dummy(password: String, hash: Option<String>) -> Result<bool, PasswordError> {
    let found = hash.is_some();
    let hash = hash.unwrap_or_else(|| ABSENT_ACCOUNT_HASH.to_string());
    let ok = verify(password, hash).await?;
    Ok(found && ok)
}
