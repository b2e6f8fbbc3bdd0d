//! Account handlers: login, registration, account home, profile and
//! password updates, logout.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::extract::{Form, Path};
use super::forms::{LoginForm, PasswordForm, ProfileForm, RegisterForm};
use super::middleware::{
    clear_token, not_authorized, token_cookie, CurrentAccount, Session, ACCOUNT_PATH,
};
use super::templates::{AccountTemplate, AccountUpdateTemplate, LoginTemplate, RegisterTemplate};
use super::{page, render, AppError, Flash};
use crate::auth::{password, SessionClaims};
use crate::db::{NewAccount, StoreError};
use crate::validation::{
    login_rules, password_rules, profile_rules, registration_rules, ValidationErrors,
};
use crate::AppState;

const LOGIN_FAILED: &str = "Please check your credentials and try again.";
const EMAIL_EXISTS: &str = "Email exists. Please log in or use a different email.";
const EMAIL_TAKEN: &str = "That email already exists. Please use another.";

pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Login").await?;
    render(
        StatusCode::OK,
        flash,
        LoginTemplate {
            page,
            account_email: String::new(),
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let form = form.normalized();
    let errors = login_rules().validate(&form, state.accounts.as_ref()).await?;
    if !errors.is_empty() {
        let page = page(&state, &session, &mut flash, "Login").await?;
        return render(
            StatusCode::OK,
            flash,
            LoginTemplate {
                page,
                account_email: form.account_email,
                errors,
            },
        );
    }

    let account = state.accounts.find_by_email(&form.account_email).await?;
    let stored = account.as_ref().map(|a| a.account_password.clone());
    let verified = password::verify_or_dummy(form.account_password.clone(), stored).await?;

    let account = match account {
        Some(account) if verified => account,
        _ => {
            // Unknown email and wrong password look the same
            debug!("Login rejected");
            let page = page(&state, &session, &mut flash, "Login")
                .await?
                .with_notice(LOGIN_FAILED);
            return render(
                StatusCode::UNAUTHORIZED,
                flash,
                LoginTemplate {
                    page,
                    account_email: form.account_email,
                    errors: ValidationErrors::new(),
                },
            );
        }
    };

    let token = state.tokens.issue(&SessionClaims::from(&account))?;
    let jar = jar.add(token_cookie(
        token,
        state.config.secure_cookies(),
        state.tokens.ttl_secs(),
    ));

    info!(account_id = account.account_id, "Account logged in");
    Ok((jar, Redirect::to(ACCOUNT_PATH)).into_response())
}

pub async fn register_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Register").await?;
    render(
        StatusCode::OK,
        flash,
        RegisterTemplate {
            page,
            form: RegisterForm::default(),
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let mut form = form.normalized();
    let mut errors = registration_rules()
        .validate(&form, state.accounts.as_ref())
        .await?;
    let password = std::mem::take(&mut form.account_password);

    if !errors.is_empty() {
        let page = page(&state, &session, &mut flash, "Register").await?;
        return render(StatusCode::OK, flash, RegisterTemplate { page, form, errors });
    }

    let password_hash = password::hash(password).await?;
    let new_account = NewAccount {
        firstname: form.account_firstname.clone(),
        lastname: form.account_lastname.clone(),
        email: form.account_email.clone(),
        password_hash,
    };

    match state.accounts.create_account(&new_account).await {
        Ok(account) => {
            info!(account_id = account.account_id, "Account registered");
            let page = page(&state, &session, &mut flash, "Login")
                .await?
                .with_notice(format!(
                    "Congratulations, you're registered {}. Please log in.",
                    account.account_firstname
                ));
            render(
                StatusCode::CREATED,
                flash,
                LoginTemplate {
                    page,
                    account_email: account.account_email,
                    errors: ValidationErrors::new(),
                },
            )
        }
        Err(StoreError::Duplicate) => {
            // Lost the race against a concurrent registration
            errors.add("account_email", EMAIL_EXISTS);
            let page = page(&state, &session, &mut flash, "Register").await?;
            render(StatusCode::OK, flash, RegisterTemplate { page, form, errors })
        }
        Err(e) => {
            error!(error = %e, "Failed to register account");
            let page = page(&state, &session, &mut flash, "Register")
                .await?
                .with_notice("Sorry, the registration failed.");
            render(
                StatusCode::NOT_IMPLEMENTED,
                flash,
                RegisterTemplate { page, form, errors },
            )
        }
    }
}

pub async fn management(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let page = page(&state, &session, &mut flash, "Account Management").await?;
    render(StatusCode::OK, flash, AccountTemplate { page })
}

pub async fn update_view(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    CurrentAccount(claims): CurrentAccount,
    Path(account_id): Path<i64>,
) -> Result<Response, AppError> {
    if account_id != claims.account_id {
        return Ok(not_authorized(flash));
    }

    let account = state
        .accounts
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    let page = page(&state, &session, &mut flash, "Edit Account").await?;
    render(
        StatusCode::OK,
        flash,
        AccountUpdateTemplate {
            page,
            form: ProfileForm::from(&account),
            errors: ValidationErrors::new(),
        },
    )
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    jar: CookieJar,
    CurrentAccount(claims): CurrentAccount,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let form = form.normalized();
    if form.account_id != claims.account_id {
        return Ok(not_authorized(flash));
    }

    let stored = state
        .accounts
        .find_by_id(form.account_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    let mut errors = profile_rules(&stored.account_email)
        .validate(&form, state.accounts.as_ref())
        .await?;
    if !errors.is_empty() {
        let page = page(&state, &session, &mut flash, "Edit Account").await?;
        return render(
            StatusCode::BAD_REQUEST,
            flash,
            AccountUpdateTemplate { page, form, errors },
        );
    }

    match state
        .accounts
        .update_profile(form.account_id, &form.to_update())
        .await
    {
        Ok(account) => {
            let token = state.tokens.issue(&SessionClaims::from(&account))?;
            let jar = jar.add(token_cookie(
                token,
                state.config.secure_cookies(),
                state.tokens.ttl_secs(),
            ));
            info!(account_id = account.account_id, "Account profile updated");
            Ok((
                jar,
                flash.notice("Your account was successfully updated."),
                Redirect::to(ACCOUNT_PATH),
            )
                .into_response())
        }
        Err(StoreError::Duplicate) => {
            errors.add("account_email", EMAIL_TAKEN);
            let page = page(&state, &session, &mut flash, "Edit Account").await?;
            render(
                StatusCode::BAD_REQUEST,
                flash,
                AccountUpdateTemplate { page, form, errors },
            )
        }
        Err(e) => {
            error!(error = %e, account_id = form.account_id, "Failed to update account");
            Ok((
                flash.notice("Sorry, the update failed."),
                Redirect::to(&format!("/account/update/{}", form.account_id)),
            )
                .into_response())
        }
    }
}

pub async fn update_password(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut flash: Flash,
    CurrentAccount(claims): CurrentAccount,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    if form.account_id != claims.account_id {
        return Ok(not_authorized(flash));
    }

    let errors = password_rules()
        .validate(&form, state.accounts.as_ref())
        .await?;
    if !errors.is_empty() {
        let stored = state
            .accounts
            .find_by_id(form.account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        let page = page(&state, &session, &mut flash, "Edit Account").await?;
        return render(
            StatusCode::BAD_REQUEST,
            flash,
            AccountUpdateTemplate {
                page,
                form: ProfileForm::from(&stored),
                errors,
            },
        );
    }

    let account_id = form.account_id;
    let password_hash = password::hash(form.account_password).await?;
    match state.accounts.update_password(account_id, &password_hash).await {
        Ok(()) => {
            info!(account_id, "Account password updated");
            Ok((
                flash.notice("Your password was successfully updated."),
                Redirect::to(ACCOUNT_PATH),
            )
                .into_response())
        }
        Err(e) => {
            error!(error = %e, account_id, "Failed to update password");
            Ok((
                flash.notice("Sorry, the password update failed."),
                Redirect::to(&format!("/account/update/{}", account_id)),
            )
                .into_response())
        }
    }
}

/// Always clears the session cookie, logged in or not.
pub async fn logout(jar: CookieJar, flash: Flash) -> impl IntoResponse {
    (
        clear_token(jar),
        flash.notice("You have been logged out."),
        Redirect::to("/"),
    )
}
