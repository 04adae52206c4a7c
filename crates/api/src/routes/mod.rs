pub mod auth;
pub mod comic;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All application routes, mounted at the root.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(comic::router())
}
