//! User session model and DTOs.

use sqlx::FromRow;
use comicsmith_core::types::{DbId, Timestamp};

/// A user session row from the `user_sessions` table.
///
/// Only the SHA-256 digest of the cookie token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
