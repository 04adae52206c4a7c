//! Persistence ports consumed by the HTTP layer and their PostgreSQL adapter.
//!
//! Handlers only see `Arc<dyn Store>`; tests swap in
//! [`MemoryStore`](crate::memory::MemoryStore) behind the `test-support`
//! feature.

use async_trait::async_trait;
use comicsmith_core::types::{ComicId, DbId};

use crate::error::StoreError;
use crate::models::comic::{Comic, ComicSummary, CreateComic, UpdateComic};
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ComicRepo, SessionRepo, UserRepo};
use crate::DbPool;

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A duplicate email yields [`StoreError::UniqueViolation`].
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Login session persistence, keyed by token digest.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, input: CreateSession) -> Result<UserSession, StoreError>;
    /// Look up a session that is not revoked and not yet expired.
    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSession>, StoreError>;
    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Owner-scoped comic persistence.
#[async_trait]
pub trait ComicStore: Send + Sync {
    async fn create_comic(&self, input: CreateComic) -> Result<Comic, StoreError>;
    /// `None` when the comic does not exist or belongs to someone else.
    async fn find_comic(&self, id: ComicId, owner: DbId) -> Result<Option<Comic>, StoreError>;
    /// Newest first.
    async fn list_comics(&self, owner: DbId) -> Result<Vec<ComicSummary>, StoreError>;
    async fn update_comic(
        &self,
        id: ComicId,
        owner: DbId,
        input: UpdateComic,
    ) -> Result<Option<Comic>, StoreError>;
}

/// Everything the application needs from persistence.
#[async_trait]
pub trait Store: UserStore + SessionStore + ComicStore {
    /// `true` when the backing store answers.
    async fn health_check(&self) -> bool;
}

/// [`Store`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, &input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, input: CreateSession) -> Result<UserSession, StoreError> {
        Ok(SessionRepo::create(&self.pool, &input).await?)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        Ok(SessionRepo::find_active_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }
}

#[async_trait]
impl ComicStore for PgStore {
    async fn create_comic(&self, input: CreateComic) -> Result<Comic, StoreError> {
        Ok(ComicRepo::create(&self.pool, &input).await?)
    }

    async fn find_comic(&self, id: ComicId, owner: DbId) -> Result<Option<Comic>, StoreError> {
        Ok(ComicRepo::find_for_owner(&self.pool, id, owner).await?)
    }

    async fn list_comics(&self, owner: DbId) -> Result<Vec<ComicSummary>, StoreError> {
        Ok(ComicRepo::list_for_owner(&self.pool, owner).await?)
    }

    async fn update_comic(
        &self,
        id: ComicId,
        owner: DbId,
        input: UpdateComic,
    ) -> Result<Option<Comic>, StoreError> {
        Ok(ComicRepo::update_for_owner(&self.pool, id, owner, &input).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> bool {
        match crate::health_check(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
