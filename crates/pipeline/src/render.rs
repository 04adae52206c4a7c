//! Per-tile image rendering.

use std::sync::Arc;

use comicsmith_core::generation::RenderSettings;
use comicsmith_models::{ImageModel, ImageStore};

/// Result of rendering one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image was rendered and stored at `url`.
    Rendered { url: String },
    /// Rendering or storing failed; the caller decides what to show instead.
    Failed { reason: String },
}

/// Renders scenes with fixed settings and stores the results.
#[derive(Clone)]
pub struct TileRenderer {
    model: Arc<dyn ImageModel>,
    images: ImageStore,
    settings: RenderSettings,
}

impl TileRenderer {
    pub fn new(model: Arc<dyn ImageModel>, images: ImageStore) -> Self {
        Self {
            model,
            images,
            settings: RenderSettings::default(),
        }
    }

    /// Render a single scene. Never returns an error; failures are a
    /// [`RenderOutcome::Failed`] value.
    pub async fn render(&self, scene: &str) -> RenderOutcome {
        let bytes = match self.model.render(scene, &self.settings).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return RenderOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match self.images.save(&bytes).await {
            Ok(url) => RenderOutcome::Rendered { url },
            Err(e) => RenderOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
