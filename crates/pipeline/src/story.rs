//! Language-model calls: story, tiles, inspiration and story-from-tiles.

use std::sync::Arc;

use comicsmith_core::comic::Tile;
use comicsmith_core::generation::SamplingConfig;
use comicsmith_core::prompts;
use comicsmith_core::segmenter::{self, Segmentation};
use comicsmith_models::TextModel;

use crate::error::{PipelineError, Stage};

/// Wraps a [`TextModel`] with the prompts and sampling the app uses.
#[derive(Clone)]
pub struct StoryGenerator {
    model: Arc<dyn TextModel>,
}

impl StoryGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Generate a story from the user's prompt.
    ///
    /// The text is returned as-is; an empty or truncated completion is not
    /// treated as an error here.
    pub async fn generate_story(&self, prompt: &str) -> Result<String, PipelineError> {
        self.model
            .generate(prompt, Some(SamplingConfig::story()))
            .await
            .map_err(|e| PipelineError::new(Stage::Story, e))
    }

    /// Split `story` into scene tiles, falling back to sentence chunking
    /// when the model's numbered list is short or malformed.
    pub async fn create_tiles(&self, story: &str) -> Result<Segmentation, PipelineError> {
        let output = self
            .model
            .generate(&prompts::tiles_prompt(story), None)
            .await
            .map_err(|e| PipelineError::new(Stage::Tiles, e))?;
        Ok(segmenter::segment(&output, story))
    }

    /// Ask for a real film the story resembles. The answer is not parsed.
    pub async fn find_inspiration(&self, story: &str) -> Result<String, PipelineError> {
        self.model
            .generate(&prompts::inspiration_prompt(story), None)
            .await
            .map_err(|e| PipelineError::new(Stage::Inspiration, e))
    }

    /// Write a story that covers the given scenes in order.
    pub async fn story_from_tiles(&self, tiles: &[Tile]) -> Result<String, PipelineError> {
        self.model
            .generate(
                &prompts::story_from_tiles_prompt(tiles),
                Some(SamplingConfig::story()),
            )
            .await
            .map_err(|e| PipelineError::new(Stage::StoryFromTiles, e))
    }
}
