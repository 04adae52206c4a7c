//! Single-pass comic orchestration.
//!
//! A run moves strictly forward: story, tiles, inspiration, then one image
//! per tile. Any language-model failure aborts the run; image failures are
//! replaced with the placeholder and never abort.

use comicsmith_core::comic::Tile;
use comicsmith_core::segmenter::{self, SegmentSource, MAX_TILE_COUNT};

use crate::error::PipelineError;
use crate::render::{RenderOutcome, TileRenderer};
use crate::story::StoryGenerator;

/// A fully generated comic that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct ComicDraft {
    pub story: String,
    pub tiles: Vec<Tile>,
    pub inspiration: String,
    pub segment_source: SegmentSource,
}

/// Orchestrates one comic generation.
#[derive(Clone)]
pub struct ComicPipeline {
    story: StoryGenerator,
    renderer: TileRenderer,
    placeholder_url: String,
    max_tiles: usize,
}

impl ComicPipeline {
    pub fn new(
        story: StoryGenerator,
        renderer: TileRenderer,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            story,
            renderer,
            placeholder_url: placeholder_url.into(),
            max_tiles: MAX_TILE_COUNT,
        }
    }

    pub fn story_generator(&self) -> &StoryGenerator {
        &self.story
    }

    /// Generate a complete comic from `prompt`.
    pub async fn run(&self, prompt: &str) -> Result<ComicDraft, PipelineError> {
        tracing::info!(prompt_len = prompt.len(), "Comic generation received");

        let story = self.story.generate_story(prompt).await?;
        tracing::info!(story_len = story.len(), "Story generated");

        let segmentation = self.story.create_tiles(&story).await?;
        let segment_source = segmentation.source;
        if segment_source == SegmentSource::SentenceFallback {
            tracing::warn!("Model tile list rejected, used sentence fallback");
        }
        tracing::info!(
            tile_count = segmentation.tiles.len(),
            source = ?segment_source,
            "Tiles segmented",
        );

        let inspiration = self.story.find_inspiration(&story).await?;

        let tiles = segmenter::clamp_tiles(segmentation.tiles, self.max_tiles);
        let tiles = self.render_tiles(tiles).await;
        tracing::info!(tile_count = tiles.len(), "Images rendered");

        Ok(ComicDraft {
            story,
            tiles,
            inspiration,
            segment_source,
        })
    }

    /// Render tiles one at a time, in order, substituting the placeholder
    /// for any tile whose render failed.
    async fn render_tiles(&self, tiles: Vec<Tile>) -> Vec<Tile> {
        let mut rendered = Vec::with_capacity(tiles.len());
        for (tile_index, tile) in tiles.into_iter().enumerate() {
            let image = match self.renderer.render(&tile.scene).await {
                RenderOutcome::Rendered { url } => url,
                RenderOutcome::Failed { reason } => {
                    tracing::warn!(tile_index, %reason, "Tile render failed, using placeholder");
                    self.placeholder_url.clone()
                }
            };
            rendered.push(tile.with_image(image));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use comicsmith_core::segmenter::{FILLER_SENTENCE, TARGET_TILE_COUNT};
    use comicsmith_models::ImageStore;

    use crate::error::Stage;
    use crate::testing::{FakeImage, ScriptedText};

    const PLACEHOLDER: &str = "https://placeholder.test/none.png";

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("{i}. Scene {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn pipeline(
        text: Arc<ScriptedText>,
        image: Arc<FakeImage>,
        dir: &std::path::Path,
    ) -> ComicPipeline {
        ComicPipeline::new(
            StoryGenerator::new(text),
            TileRenderer::new(image, ImageStore::new(dir, "http://localhost:3000")),
            PLACEHOLDER,
        )
    }

    #[tokio::test]
    async fn run_produces_rendered_tiles_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("A story.".to_string()),
            Ok(numbered(10)),
            Ok("Movie Title: Up (2009)".to_string()),
        ]));
        let image = Arc::new(FakeImage::working());

        let draft = pipeline(text, image.clone(), tmp.path())
            .run("a cat")
            .await
            .unwrap();

        assert_eq!(draft.story, "A story.");
        assert_eq!(draft.inspiration, "Movie Title: Up (2009)");
        assert_eq!(draft.tiles.len(), TARGET_TILE_COUNT);
        assert_eq!(draft.tiles[3].scene, "Scene 4");
        assert!(draft.tiles.iter().all(|t| t
            .image
            .as_deref()
            .is_some_and(|url| url.starts_with("http://localhost:3000/static/generated_images/"))));
        assert_eq!(image.rendered()[0], "Scene 1");
    }

    #[tokio::test]
    async fn at_most_fifteen_tiles_are_rendered() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("A story.".to_string()),
            Ok(numbered(22)),
            Ok("Inspiration".to_string()),
        ]));
        let image = Arc::new(FakeImage::working());

        let draft = pipeline(text, image.clone(), tmp.path())
            .run("a cat")
            .await
            .unwrap();

        assert_eq!(draft.tiles.len(), MAX_TILE_COUNT);
        assert_eq!(image.rendered().len(), MAX_TILE_COUNT);
    }

    #[tokio::test]
    async fn failed_render_gets_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("A story.".to_string()),
            Ok(numbered(10)),
            Ok("Inspiration".to_string()),
        ]));
        let image = Arc::new(FakeImage::failing_on("Scene 2"));

        let draft = pipeline(text, image, tmp.path()).run("a cat").await.unwrap();

        assert_eq!(draft.tiles[1].image.as_deref(), Some(PLACEHOLDER));
        assert_ne!(draft.tiles[0].image.as_deref(), Some(PLACEHOLDER));
    }

    #[tokio::test]
    async fn short_model_list_uses_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("First. Second. Third.".to_string()),
            Ok(numbered(7)),
            Ok("Inspiration".to_string()),
        ]));
        let image = Arc::new(FakeImage::working());

        let draft = pipeline(text, image, tmp.path()).run("a cat").await.unwrap();

        assert_eq!(draft.segment_source, SegmentSource::SentenceFallback);
        assert_eq!(draft.tiles.len(), TARGET_TILE_COUNT);
        assert_eq!(draft.tiles[0].scene, "First.");
    }

    #[tokio::test]
    async fn blank_story_still_yields_filler_comic() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok(String::new()),
            Ok(String::new()),
            Ok(String::new()),
        ]));
        let image = Arc::new(FakeImage::working());

        let draft = pipeline(text, image.clone(), tmp.path())
            .run("a cat")
            .await
            .unwrap();

        assert_eq!(draft.story, "");
        assert_eq!(draft.inspiration, "");
        assert_eq!(draft.segment_source, SegmentSource::SentenceFallback);
        assert_eq!(draft.tiles.len(), TARGET_TILE_COUNT);
        assert!(draft.tiles.iter().all(|t| t.scene == FILLER_SENTENCE));
        assert_eq!(image.rendered().len(), TARGET_TILE_COUNT);
    }

    #[tokio::test]
    async fn blank_tile_list_falls_back_to_sentences() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("One. Two.".to_string()),
            Ok("   ".to_string()),
            Ok("Inspiration".to_string()),
        ]));
        let image = Arc::new(FakeImage::working());

        let draft = pipeline(text, image, tmp.path()).run("a cat").await.unwrap();

        assert_eq!(draft.segment_source, SegmentSource::SentenceFallback);
        assert_eq!(draft.tiles[0].scene, "One.");
        assert_eq!(draft.tiles[1].scene, "Two.");
        assert_eq!(draft.tiles[2].scene, FILLER_SENTENCE);
    }

    #[tokio::test]
    async fn language_model_failure_aborts_before_rendering() {
        let tmp = tempfile::tempdir().unwrap();
        let text = Arc::new(ScriptedText::new([
            Ok("A story.".to_string()),
            Err(503),
        ]));
        let image = Arc::new(FakeImage::working());

        let err = pipeline(text, image.clone(), tmp.path())
            .run("a cat")
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::Tiles);
        assert!(image.rendered().is_empty());
    }
}
