//! `Form` and `Path` extractors whose rejections go through [`AppError`].

use axum::extract::{FromRequest, FromRequestParts};

use super::AppError;

/// URL-encoded form body. A malformed body renders the bad-request page.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct Form<T>(pub T);

/// Path parameters. A segment that does not parse renders the 404 page.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
