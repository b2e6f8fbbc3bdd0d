//! Credential hashing and session tokens.

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use token::{InvalidToken, SessionClaims, TokenCodec, SESSION_TTL_SECS};
