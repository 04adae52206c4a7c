//! Comic entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use comicsmith_core::comic::Tile;
use comicsmith_core::types::{ComicId, DbId, Timestamp};

/// Full comic row from the `comics` table.
///
/// `tiles` keeps narrative order exactly as written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comic {
    pub id: ComicId,
    pub user_id: DbId,
    pub title: String,
    pub prompt: String,
    pub story: String,
    #[sqlx(json)]
    pub tiles: Vec<Tile>,
    pub inspiration: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection for the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComicSummary {
    pub id: ComicId,
    pub title: String,
    pub created_at: Timestamp,
}

/// DTO for persisting a freshly generated comic.
#[derive(Debug, Clone)]
pub struct CreateComic {
    pub user_id: DbId,
    pub title: String,
    pub prompt: String,
    pub story: String,
    pub tiles: Vec<Tile>,
    pub inspiration: String,
}

/// DTO for a partial comic update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateComic {
    pub title: Option<String>,
    pub tiles: Option<Vec<Tile>>,
}

impl UpdateComic {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.tiles.is_none()
    }
}
