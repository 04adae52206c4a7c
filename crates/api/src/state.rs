use std::sync::Arc;

use comicsmith_db::Store;
use comicsmith_pipeline::ComicPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Users, sessions and comics.
    pub store: Arc<dyn Store>,
    /// Comic generation, built once at startup around the model clients.
    pub pipeline: Arc<ComicPipeline>,
    pub config: Arc<ServerConfig>,
}
