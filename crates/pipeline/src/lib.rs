//! Comic generation pipeline.
//!
//! [`ComicPipeline::run`] drives a prompt through story generation, tile
//! segmentation, inspiration lookup and per-tile rendering, producing a
//! [`ComicDraft`] ready to persist. Model clients are injected, never
//! global.

pub mod comic;
pub mod error;
pub mod render;
pub mod story;

pub use comic::{ComicDraft, ComicPipeline};
pub use error::{PipelineError, Stage};
pub use render::{RenderOutcome, TileRenderer};
pub use story::StoryGenerator;

#[cfg(test)]
pub(crate) mod testing;
