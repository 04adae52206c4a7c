use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comic, pages};
use crate::state::AppState;

/// Comic routes (session required).
///
/// ```text
/// GET  /dashboard           dashboard page
/// GET  /create-comic        creator page
/// POST /create-comic        generate + persist
/// POST /update-comic        partial update
/// GET  /get-comics          list own comics
/// GET  /load-comic/{id}     full comic document
/// POST /story-from-tiles    story for a tile sequence
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::dashboard))
        .route(
            "/create-comic",
            get(pages::comic_creator).post(comic::create_comic),
        )
        .route("/update-comic", post(comic::update_comic))
        .route("/get-comics", get(comic::get_comics))
        .route("/load-comic/{id}", get(comic::load_comic))
        .route("/story-from-tiles", post(comic::story_from_tiles))
}
