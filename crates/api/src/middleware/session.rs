//! Cookie-based session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use comicsmith_core::error::CoreError;
use comicsmith_core::types::DbId;
use comicsmith_db::SessionStore;

use crate::auth::session::{hash_session_token, read_cookie};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller of an API route.
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: DbId,
    /// Row id in `user_sessions`, used to revoke on logout.
    pub session_id: DbId,
}

/// Look up the session named by the request's cookie, if any.
async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<SessionUser>, AppError> {
    let Some(token) = read_cookie(&parts.headers, &state.config.session.cookie_name) else {
        return Ok(None);
    };

    let session = state
        .store
        .find_active_session(&hash_session_token(token))
        .await?;

    Ok(session.map(|s| SessionUser {
        user_id: s.user_id,
        session_id: s.id,
    }))
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not logged in".into()))
        })
    }
}

/// The authenticated caller of a browser page.
#[derive(Debug, Clone)]
pub struct PageUser(pub SessionUser);

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await {
            Ok(Some(user)) => Ok(PageUser(user)),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// The caller's session when one is present; never rejects for a missing one.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionUser>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(resolve(parts, state).await?))
    }
}
