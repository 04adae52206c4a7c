//! Clients for the external generative models and local image storage.
//!
//! The pipeline depends only on the [`TextModel`] and [`ImageModel`]
//! traits; [`GeminiClient`] and [`DiffusionClient`] are the production
//! adapters.

pub mod diffusion;
pub mod error;
pub mod gemini;
pub mod storage;

use async_trait::async_trait;
use comicsmith_core::generation::{RenderSettings, SamplingConfig};

pub use diffusion::DiffusionClient;
pub use error::ModelError;
pub use gemini::GeminiClient;
pub use storage::ImageStore;

/// A hosted text-generation model.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate text for `prompt`. `None` uses the model's own sampling defaults.
    async fn generate(
        &self,
        prompt: &str,
        sampling: Option<SamplingConfig>,
    ) -> Result<String, ModelError>;
}

/// A text-to-image diffusion model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Render one scene, returning the encoded image bytes.
    async fn render(&self, scene: &str, settings: &RenderSettings)
        -> Result<Vec<u8>, ModelError>;
}
