//! In-memory [`Store`] used by handler and pipeline tests.
//!
//! Mirrors the PostgreSQL semantics the application relies on: unique
//! emails, owner-scoped comic access, newest-first listing and
//! expiry-aware session lookup.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;
use comicsmith_core::types::{ComicId, DbId};

use crate::error::StoreError;
use crate::models::comic::{Comic, ComicSummary, CreateComic, UpdateComic};
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::{CreateUser, User};
use crate::store::{ComicStore, SessionStore, Store, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<UserSession>,
    comics: Vec<Comic>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Number of stored comics across all owners.
    pub fn comic_count(&self) -> usize {
        self.lock().comics.len()
    }

    /// Snapshot of every stored comic in insertion order.
    pub fn comics(&self) -> Vec<Comic> {
        self.lock().comics.clone()
    }

    /// Snapshot of every stored session in insertion order.
    pub fn sessions(&self) -> Vec<UserSession> {
        self.lock().sessions.clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation("uq_users_email".into()));
        }
        let user = User {
            id: tables.next_id(),
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, input: CreateSession) -> Result<UserSession, StoreError> {
        let mut tables = self.lock();
        if tables.sessions.iter().any(|s| s.token_hash == input.token_hash) {
            return Err(StoreError::UniqueViolation(
                "uq_user_sessions_token_hash".into(),
            ));
        }
        let session = UserSession {
            id: tables.next_id(),
            user_id: input.user_id,
            token_hash: input.token_hash,
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        let now = Utc::now();
        Ok(self
            .lock()
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_revoked && s.expires_at > now)
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.lock();
        match tables
            .sessions
            .iter_mut()
            .find(|s| s.id == id && !s.is_revoked)
        {
            Some(session) => {
                session.is_revoked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ComicStore for MemoryStore {
    async fn create_comic(&self, input: CreateComic) -> Result<Comic, StoreError> {
        let mut tables = self.lock();
        // Strictly increasing timestamps keep newest-first ordering stable
        // even when two inserts land within the clock's resolution.
        let mut now = Utc::now();
        if let Some(last) = tables.comics.iter().map(|c| c.created_at).max() {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        let comic = Comic {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title,
            prompt: input.prompt,
            story: input.story,
            tiles: input.tiles,
            inspiration: input.inspiration,
            created_at: now,
            updated_at: now,
        };
        tables.comics.push(comic.clone());
        Ok(comic)
    }

    async fn find_comic(&self, id: ComicId, owner: DbId) -> Result<Option<Comic>, StoreError> {
        Ok(self
            .lock()
            .comics
            .iter()
            .find(|c| c.id == id && c.user_id == owner)
            .cloned())
    }

    async fn list_comics(&self, owner: DbId) -> Result<Vec<ComicSummary>, StoreError> {
        let mut summaries: Vec<ComicSummary> = self
            .lock()
            .comics
            .iter()
            .filter(|c| c.user_id == owner)
            .map(|c| ComicSummary {
                id: c.id,
                title: c.title.clone(),
                created_at: c.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn update_comic(
        &self,
        id: ComicId,
        owner: DbId,
        input: UpdateComic,
    ) -> Result<Option<Comic>, StoreError> {
        let mut tables = self.lock();
        let Some(comic) = tables
            .comics
            .iter_mut()
            .find(|c| c.id == id && c.user_id == owner)
        else {
            return Ok(None);
        };
        if let Some(title) = input.title {
            comic.title = title;
        }
        if let Some(tiles) = input.tiles {
            comic.tiles = tiles;
        }
        comic.updated_at = Utc::now();
        Ok(Some(comic.clone()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> bool {
        true
    }
}
