//! Browser page handlers.
//!
//! Pages are plain HTML files under `STATIC_DIR`; the pages that show a
//! user's comics redirect to `/login` without a session.

use std::io::ErrorKind;

use axum::extract::State;
use axum::response::{Html, Redirect};
use comicsmith_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::session::{MaybeSession, PageUser};
use crate::state::AppState;

/// GET /
pub async fn index(MaybeSession(session): MaybeSession) -> Redirect {
    match session {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

/// GET /dashboard
pub async fn dashboard(State(state): State<AppState>, _user: PageUser) -> AppResult<Html<String>> {
    serve_page(&state, "dashboard.html").await
}

/// GET /create-comic
pub async fn comic_creator(
    State(state): State<AppState>,
    _user: PageUser,
) -> AppResult<Html<String>> {
    serve_page(&state, "comic-creator.html").await
}

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    serve_page(&state, "login.html").await
}

/// GET /register
pub async fn register_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    serve_page(&state, "register.html").await
}

async fn serve_page(state: &AppState, name: &'static str) -> AppResult<Html<String>> {
    let path = state.config.static_dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: name.to_string(),
        })),
        Err(e) => Err(AppError::InternalError(format!(
            "Failed to read {}: {e}",
            path.display()
        ))),
    }
}
