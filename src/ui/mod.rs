// Server-rendered site: router, session middleware and handlers.
// Uses Askama templates compiled from templates/

mod account;
mod error;
mod extract;
mod flash;
mod forms;
mod inventory;
mod middleware;
mod templates;

use askama::Template;
use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::AppState;

pub use error::{AppError, BAD_REQUEST_MESSAGE, CRASH_MESSAGE, NOT_FOUND_MESSAGE};
pub use flash::{Flash, FLASH_COOKIE};
pub use middleware::{
    resolve_token, Decision, Gate, Session, TokenState, LOGIN_PATH, NOT_AUTHORIZED, TOKEN_COOKIE,
};
pub use templates::*;

/// Render a template with the given status, writing back the flash cookie.
fn render<T: Template>(status: StatusCode, flash: Flash, template: T) -> Result<Response, AppError> {
    let html = template.render()?;
    Ok((status, flash, Html(html)).into_response())
}

/// Layout context for the current request; drains pending flash notices.
async fn page(
    state: &AppState,
    session: &Session,
    flash: &mut Flash,
    title: impl Into<String>,
) -> Result<Page, AppError> {
    let nav = state.inventory.classifications().await?;
    Ok(Page::new(title, nav, flash.take(), session))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/", get(home))
        .route("/trigger-error", get(trigger_error))
        .route(
            "/account/login",
            get(account::login_page).post(account::login_submit),
        )
        .route(
            "/account/register",
            get(account::register_page).post(account::register_submit),
        )
        .route("/account/logout", get(account::logout))
        .route(
            "/inv/type/:classification_id",
            get(inventory::by_classification),
        )
        .route("/inv/detail/:inv_id", get(inventory::detail));

    // Any logged-in account
    let members = Router::new()
        .route("/account/", get(account::management))
        .route("/account/update/:account_id", get(account::update_view))
        .route("/account/update", post(account::update_profile))
        .route("/account/update-password", post(account::update_password))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_login));

    // Employee and Admin only
    let staff = Router::new()
        .route("/inv/", get(inventory::management))
        .route(
            "/inv/add-classification",
            get(inventory::add_classification_page).post(inventory::add_classification),
        )
        .route(
            "/inv/add-inventory",
            get(inventory::add_inventory_page).post(inventory::add_inventory),
        )
        .route("/inv/edit/:inv_id", get(inventory::edit_page))
        .route("/inv/update", post(inventory::update_inventory))
        .route("/inv/delete/:inv_id", get(inventory::delete_confirm))
        .route("/inv/delete", post(inventory::delete))
        .route(
            "/inv/getInventory/:classification_id",
            get(inventory::get_inventory),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_staff));

    let static_files = ServeDir::new(&state.config.server.public_dir)
        .not_found_service(not_found.with_state(state.clone()));

    Router::new()
        .merge(public)
        .merge(members)
        .merge(staff)
        .fallback_service(static_files)
        .layer(from_fn_with_state(state.clone(), middleware::resolve_session))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
        .with_state(state)
}

async fn home(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Home").await?;
    render(StatusCode::OK, flash, HomeTemplate { page })
}

/// Exercises the error boundary.
async fn trigger_error() -> Result<Response, AppError> {
    Err(AppError::Internal("intentional error from /trigger-error".to_string()))
}

async fn not_found(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "404").await?;
    render(
        StatusCode::NOT_FOUND,
        flash,
        ErrorTemplate {
            page,
            message: NOT_FOUND_MESSAGE.to_string(),
        },
    )
}

#[cfg(test)]
mod tests;
