//! Repository for the `comics` table.
//!
//! Every read and write is scoped by owner: a comic belonging to another
//! user behaves exactly like a missing one.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use comicsmith_core::types::{ComicId, DbId};

use crate::models::comic::{Comic, ComicSummary, CreateComic, UpdateComic};

const COLUMNS: &str =
    "id, user_id, title, prompt, story, tiles, inspiration, created_at, updated_at";

/// Provides CRUD operations for comics.
pub struct ComicRepo;

impl ComicRepo {
    /// Insert a comic under a freshly generated id, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let query = format!(
            "INSERT INTO comics (id, user_id, title, prompt, story, tiles, inspiration)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(Uuid::new_v4())
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.prompt)
            .bind(&input.story)
            .bind(Json(&input.tiles))
            .bind(&input.inspiration)
            .fetch_one(pool)
            .await
    }

    /// Find a comic by id, only if owned by `user_id`.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: ComicId,
        user_id: DbId,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's comics, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ComicSummary>, sqlx::Error> {
        sqlx::query_as::<_, ComicSummary>(
            "SELECT id, title, created_at FROM comics
             WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update title and/or tiles. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no comic with this id belongs to `user_id`.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: ComicId,
        user_id: DbId,
        input: &UpdateComic,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!(
            "UPDATE comics SET
                title = COALESCE($3, title),
                tiles = COALESCE($4, tiles),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.tiles.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }
}
