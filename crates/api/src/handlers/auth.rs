//! Handlers for registration, login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use comicsmith_core::error::CoreError;
use comicsmith_core::types::DbId;
use comicsmith_core::validation;
use comicsmith_db::models::session::CreateSession;
use comicsmith_db::models::user::CreateUser;
use comicsmith_db::{SessionStore, StoreError, UserStore};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{clear_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::session::MaybeSession;
use crate::response::message;
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "Email already registered";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create an account and start a session. A duplicate email is a 400.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_username(&input.username)?;
    validation::validate_email(&input.email)?;
    validation::validate_password(&input.password, state.config.min_password_length)?;

    if state.store.find_user_by_email(&input.email).await?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(CreateUser {
            username: input.username.trim().to_string(),
            email: input.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration for the same email.
            StoreError::UniqueViolation(_) => AppError::BadRequest(DUPLICATE_EMAIL.into()),
            other => other.into(),
        })?;

    let cookie = start_session(&state, user.id).await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(message("User registered successfully")),
    ))
}

/// POST /login
///
/// Unknown email is a 404; a wrong password is a 401.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .store
        .find_user_by_email(&input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: incorrect password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect password".into(),
        )));
    }

    let cookie = start_session(&state, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(([(SET_COOKIE, cookie)], Json(message("Login successful"))))
}

/// POST /logout
///
/// Revoke the current session, if any, and expire the cookie.
pub async fn logout(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> AppResult<impl IntoResponse> {
    if let Some(session) = session {
        state.store.revoke_session(session.session_id).await?;
        tracing::info!(user_id = session.user_id, "User logged out");
    }

    Ok((
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
        Json(message("Logged out successfully")),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Persist a new session for `user_id` and return its `Set-Cookie` value.
async fn start_session(state: &AppState, user_id: DbId) -> AppResult<String> {
    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.config.session.expiry_hours);

    state
        .store
        .create_session(CreateSession {
            user_id,
            token_hash,
            expires_at,
        })
        .await?;

    Ok(session_cookie(&token, &state.config.session))
}
