//! Read-once notices carried to the next rendered page in a signed cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::{
    cookie::{Cookie, Key, SameSite, SignedCookieJar},
    CookieJar,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::{convert::Infallible, sync::Arc};

use super::middleware::expired_cookie;
use crate::AppState;

pub const FLASH_COOKIE: &str = "flash";

/// Pending notices for this browser plus the ones queued by this request.
///
/// Return it as a response part whenever it was read or written so the
/// cookie is rewritten or cleared.
pub struct Flash {
    jar: SignedCookieJar,
    pending: Vec<String>,
    queued: Vec<String>,
    present: bool,
    dirty: bool,
}

impl Flash {
    pub fn from_headers(headers: &HeaderMap, key: &Key) -> Self {
        let jar = SignedCookieJar::from_headers(headers, key.clone());
        let pending = jar
            .get(FLASH_COOKIE)
            .map(|cookie| decode(cookie.value()))
            .unwrap_or_default();
        // A cookie with a bad signature is still cleared once read
        let present = CookieJar::from_headers(headers).get(FLASH_COOKIE).is_some();

        Self {
            jar,
            pending,
            queued: Vec::new(),
            present,
            dirty: false,
        }
    }

    /// Queue a notice for the next page.
    pub fn notice(mut self, message: impl Into<String>) -> Self {
        self.queued.push(message.into());
        self.dirty = true;
        self
    }

    /// Drain the notices left by earlier requests.
    pub fn take(&mut self) -> Vec<String> {
        if self.present {
            self.dirty = true;
        }
        std::mem::take(&mut self.pending)
    }
}

fn encode(messages: &[String]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Vec<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Flash::from_headers(&parts.headers, &state.cookie_key))
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }

        let mut messages = self.pending;
        messages.extend(self.queued);

        if messages.is_empty() {
            return CookieJar::new()
                .add(expired_cookie(FLASH_COOKIE))
                .into_response_parts(res);
        }

        self.jar
            .add(
                Cookie::build((FLASH_COOKIE, encode(&messages)))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .build(),
            )
            .into_response_parts(res)
    }
}
