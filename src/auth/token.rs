//! Session token issuance and verification (HS256 JWT).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::{Account, AccountType};

/// Lifetime of a session token and of the cookie carrying it.
pub const SESSION_TTL_SECS: i64 = 3600;

/// Identity snapshot carried by the session token. No password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub account_id: i64,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_type: AccountType,
}

impl SessionClaims {
    pub fn is_staff(&self) -> bool {
        self.account_type.is_staff()
    }
}

impl From<&Account> for SessionClaims {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            account_firstname: account.account_firstname.clone(),
            account_lastname: account.account_lastname.clone(),
            account_email: account.account_email.clone(),
            account_type: account.account_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    #[serde(flatten)]
    claims: SessionClaims,
    iat: i64,
    exp: i64,
}

/// Any verification failure. Bad signature, tampering and expiry are
/// deliberately indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid session token")]
pub struct InvalidToken;

/// Signs and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token valid for `ttl_secs` from now.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(claims, now_secs())
    }

    /// Issue a token as if it had been created at `issued_at` (unix seconds).
    pub fn issue_at(
        &self,
        claims: &SessionClaims,
        issued_at: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let payload = TokenPayload {
            claims: claims.clone(),
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, InvalidToken> {
        jsonwebtoken::decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                InvalidToken
            })
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
