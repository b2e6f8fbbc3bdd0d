//! Error boundary for the web layer.
//!
//! Handlers return `Result<_, AppError>`. Not-found errors render the 404
//! page; everything else is logged and rendered as a generic 500 page so
//! no internal detail reaches the browser.

use askama::Template;
use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::any::Any;
use tracing::{debug, error};

use super::templates::{ErrorTemplate, Page};
use crate::auth::PasswordError;
use crate::db::StoreError;

pub const CRASH_MESSAGE: &str = "Oh no! There was a crash. Maybe try a different route?";
pub const NOT_FOUND_MESSAGE: &str = "Sorry, we appear to have lost that page.";
pub const BAD_REQUEST_MESSAGE: &str = "Sorry, that request could not be understood.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound(message) => error_page(status, Page::bare("404"), message),
            AppError::BadRequest(detail) => {
                debug!(%detail, "Rejected malformed request");
                error_page(status, Page::bare("Bad Request"), BAD_REQUEST_MESSAGE.to_string())
            }
            other => {
                error!(error = %other, "Request failed");
                error_page(status, Page::bare("Server Error"), CRASH_MESSAGE.to_string())
            }
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        debug!(detail = %rejection.body_text(), "Unmatched path parameter");
        AppError::not_found(NOT_FOUND_MESSAGE)
    }
}

/// Render the error view, falling back to plain text if that fails too.
pub fn error_page(status: StatusCode, page: Page, message: String) -> Response {
    let template = ErrorTemplate { page, message };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render error page");
            (status, template.message).into_response()
        }
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
