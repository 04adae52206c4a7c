//! Handlers for comic creation, editing and retrieval.
//!
//! Every route here needs a session; comics belonging to other users are
//! reported as not found.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use comicsmith_core::comic::{resolve_title, Tile};
use comicsmith_core::error::CoreError;
use comicsmith_core::types::ComicId;
use comicsmith_core::validation;
use comicsmith_db::models::comic::{Comic, ComicSummary, CreateComic, UpdateComic};
use comicsmith_db::ComicStore;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::session::SessionUser;
use crate::response::{message, Message, Success};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /create-comic`.
#[derive(Debug, Deserialize)]
pub struct CreateComicRequest {
    #[serde(default)]
    pub prompt: String,
    pub title: Option<String>,
}

/// Response body for `POST /create-comic`.
#[derive(Debug, Serialize)]
pub struct CreatedComic {
    pub comic_id: ComicId,
    pub title: String,
    pub story: String,
    pub tiles: Vec<Tile>,
    pub inspiration: String,
}

/// Request body for `POST /update-comic`.
///
/// An empty `title` or empty `tiles` counts as absent.
#[derive(Debug, Deserialize)]
pub struct UpdateComicRequest {
    pub comic_id: String,
    pub title: Option<String>,
    pub tiles: Option<Vec<Tile>>,
}

impl UpdateComicRequest {
    fn into_update(self) -> UpdateComic {
        UpdateComic {
            title: self.title.filter(|t| !t.is_empty()),
            tiles: self.tiles.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComicList {
    pub comics: Vec<ComicSummary>,
}

/// Request body for `POST /story-from-tiles`.
#[derive(Debug, Deserialize)]
pub struct StoryFromTilesRequest {
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedStory {
    pub story: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /create-comic
///
/// Run the full generation pipeline, persist the result and return it.
/// Nothing is stored if generation fails.
pub async fn create_comic(
    State(state): State<AppState>,
    user: SessionUser,
    ApiJson(input): ApiJson<CreateComicRequest>,
) -> AppResult<Json<Success<CreatedComic>>> {
    validation::validate_prompt(&input.prompt)?;
    let title = resolve_title(input.title.as_deref(), &input.prompt);

    tracing::info!(user_id = user.user_id, %title, "Creating comic");
    let draft = state.pipeline.run(&input.prompt).await?;

    let comic = state
        .store
        .create_comic(CreateComic {
            user_id: user.user_id,
            title,
            prompt: input.prompt,
            story: draft.story,
            tiles: draft.tiles,
            inspiration: draft.inspiration,
        })
        .await?;

    tracing::info!(
        user_id = user.user_id,
        comic_id = %comic.id,
        tile_count = comic.tiles.len(),
        "Comic persisted",
    );

    Ok(Json(Success::new(CreatedComic {
        comic_id: comic.id,
        title: comic.title,
        story: comic.story,
        tiles: comic.tiles,
        inspiration: comic.inspiration,
    })))
}

/// POST /update-comic
///
/// Apply a new title and/or tile order. With neither present the comic is
/// only checked for ownership.
pub async fn update_comic(
    State(state): State<AppState>,
    user: SessionUser,
    ApiJson(input): ApiJson<UpdateComicRequest>,
) -> AppResult<Json<Success<Message>>> {
    let id = parse_comic_id(&input.comic_id)?;
    let update = input.into_update();

    let found = if update.is_empty() {
        state.store.find_comic(id, user.user_id).await?.is_some()
    } else {
        state
            .store
            .update_comic(id, user.user_id, update)
            .await?
            .is_some()
    };

    if !found {
        return Err(comic_not_found(id));
    }

    tracing::info!(user_id = user.user_id, comic_id = %id, "Comic updated");
    Ok(Json(message("Comic updated successfully")))
}

/// GET /get-comics
///
/// The caller's comics, newest first.
pub async fn get_comics(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<Success<ComicList>>> {
    let comics = state.store.list_comics(user.user_id).await?;
    Ok(Json(Success::new(ComicList { comics })))
}

/// GET /load-comic/{id}
pub async fn load_comic(
    State(state): State<AppState>,
    user: SessionUser,
    Path(comic_id): Path<String>,
) -> AppResult<Json<Comic>> {
    let id = parse_comic_id(&comic_id)?;
    let comic = state
        .store
        .find_comic(id, user.user_id)
        .await?
        .ok_or_else(|| comic_not_found(id))?;
    Ok(Json(comic))
}

/// POST /story-from-tiles
///
/// Write a story connecting the given scenes. Nothing is persisted.
pub async fn story_from_tiles(
    State(state): State<AppState>,
    user: SessionUser,
    ApiJson(input): ApiJson<StoryFromTilesRequest>,
) -> AppResult<Json<Success<GeneratedStory>>> {
    if input.tiles.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one tile is required".into(),
        )));
    }

    tracing::info!(user_id = user.user_id, tile_count = input.tiles.len(), "Story from tiles");
    let story = state
        .pipeline
        .story_generator()
        .story_from_tiles(&input.tiles)
        .await?;

    Ok(Json(Success::new(GeneratedStory { story })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a comic id; a malformed id cannot name an existing comic.
fn parse_comic_id(raw: &str) -> AppResult<ComicId> {
    raw.parse::<ComicId>().map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id: raw.to_string(),
        })
    })
}

fn comic_not_found(id: ComicId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comic",
        id: id.to_string(),
    })
}
