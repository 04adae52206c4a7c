use std::fmt;

use comicsmith_models::ModelError;

/// The language-model step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Story,
    Tiles,
    Inspiration,
    StoryFromTiles,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Story => "story generation",
            Stage::Tiles => "tile segmentation",
            Stage::Inspiration => "inspiration lookup",
            Stage::StoryFromTiles => "story from tiles",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline run aborted. Nothing from the run should be persisted.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: ModelError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: ModelError) -> Self {
        Self { stage, source }
    }
}
