//! Session resolution and route gates.
//!
//! The session token is resolved once per request by [`resolve_session`],
//! an outer layer over the whole router. Protected routes then run a
//! [`Gate`] as a route layer. Gates are pure decisions over the resolved
//! [`Session`]; the middleware functions only adapt them to axum.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use std::{convert::Infallible, sync::Arc};
use tracing::debug;

use super::flash::Flash;
use crate::auth::{SessionClaims, TokenCodec};
use crate::AppState;

pub const TOKEN_COOKIE: &str = "jwt";
pub const LOGIN_PATH: &str = "/account/login";
pub const ACCOUNT_PATH: &str = "/account/";

pub const PLEASE_LOG_IN: &str = "Please log in.";
pub const STAFF_LOG_IN: &str = "Please log in to access that page.";
pub const NOT_AUTHORIZED: &str = "You are not authorized to view that page.";

/// What the `jwt` cookie of a request amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Absent,
    Valid(SessionClaims),
    Invalid,
}

pub fn resolve_token(jar: &CookieJar, tokens: &TokenCodec) -> TokenState {
    match jar.get(TOKEN_COOKIE) {
        None => TokenState::Absent,
        Some(cookie) => match tokens.verify(cookie.value()) {
            Ok(claims) => TokenState::Valid(claims),
            Err(_) => TokenState::Invalid,
        },
    }
}

/// Identity resolved for the current request. Anonymous unless a valid
/// token was presented.
#[derive(Debug, Clone, Default)]
pub struct Session {
    claims: Option<SessionClaims>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(claims: SessionClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    pub fn logged_in(&self) -> bool {
        self.claims.is_some()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// The authenticated account of a request; redirects to login when absent.
pub struct CurrentAccount(pub SessionClaims);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .and_then(|session| session.claims().cloned())
            .map(CurrentAccount)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Redirect {
        to: &'static str,
        notice: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Any authenticated account
    Login,
    /// Employee or Admin
    Staff,
}

impl Gate {
    pub fn decide(self, session: &Session) -> Decision {
        match (self, session.claims()) {
            (Gate::Login, Some(_)) => Decision::Continue,
            (Gate::Login, None) => Decision::Redirect {
                to: LOGIN_PATH,
                notice: PLEASE_LOG_IN,
            },
            (Gate::Staff, None) => Decision::Redirect {
                to: LOGIN_PATH,
                notice: STAFF_LOG_IN,
            },
            (Gate::Staff, Some(claims)) if claims.is_staff() => Decision::Continue,
            (Gate::Staff, Some(_)) => Decision::Redirect {
                to: ACCOUNT_PATH,
                notice: NOT_AUTHORIZED,
            },
        }
    }
}

/// Session cookie set at login and after a profile update.
pub fn token_cookie(token: String, secure: bool, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Expired cookie that overwrites `name`, sent whether or not the request
/// carried it.
pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

pub fn clear_token(jar: CookieJar) -> CookieJar {
    jar.add(expired_cookie(TOKEN_COOKIE))
}

/// Redirect to the account page with the not-authorized notice.
pub fn not_authorized(flash: Flash) -> Response {
    (flash.notice(NOT_AUTHORIZED), Redirect::to(ACCOUNT_PATH)).into_response()
}

/// Outer layer: turn the `jwt` cookie into a [`Session`] extension.
///
/// An invalid token never falls through as anonymous: the cookie is cleared
/// and the browser is sent to the login page.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match resolve_token(&jar, &state.tokens) {
        TokenState::Absent => Session::anonymous(),
        TokenState::Valid(claims) => Session::authenticated(claims),
        TokenState::Invalid => {
            debug!(path = %request.uri().path(), "Clearing invalid session token");
            let flash = Flash::from_headers(request.headers(), &state.cookie_key).notice(PLEASE_LOG_IN);
            return (clear_token(jar), flash, Redirect::to(LOGIN_PATH)).into_response();
        }
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

pub async fn require_login(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(Gate::Login, &state, request, next).await
}

pub async fn require_staff(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(Gate::Staff, &state, request, next).await
}

async fn enforce(gate: Gate, state: &AppState, request: Request, next: Next) -> Response {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .unwrap_or_default();

    match gate.decide(&session) {
        Decision::Continue => next.run(request).await,
        Decision::Redirect { to, notice } => {
            debug!(?gate, path = %request.uri().path(), to, "Gate redirect");
            let flash = Flash::from_headers(request.headers(), &state.cookie_key).notice(notice);
            (flash, Redirect::to(to)).into_response()
        }
    }
}
