use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, pages};
use crate::state::AppState;

/// Registration, login and logout.
///
/// ```text
/// GET  /register    register page
/// POST /register    create account + session
/// GET  /login       login page
/// POST /login       start session
/// POST /logout      end session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(pages::register_page).post(auth::register))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}
