//! Scripted model doubles for pipeline unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use comicsmith_core::generation::{RenderSettings, SamplingConfig};
use comicsmith_models::{ImageModel, ModelError, TextModel};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Replays canned replies in order. `Err(status)` becomes an API error.
pub struct ScriptedText {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    calls: Mutex<Vec<(String, Option<SamplingConfig>)>>,
}

impl ScriptedText {
    pub fn new(replies: impl IntoIterator<Item = Result<String, u16>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<SamplingConfig>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedText {
    async fn generate(
        &self,
        prompt: &str,
        sampling: Option<SamplingConfig>,
    ) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push((prompt.to_string(), sampling));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(ModelError::Api {
                status,
                body: "scripted failure".into(),
            }),
            None => Err(ModelError::EmptyResponse),
        }
    }
}

/// Renders PNG bytes, failing for scenes containing `fail_on`.
pub struct FakeImage {
    fail_on: Option<String>,
    scenes: Mutex<Vec<String>>,
}

impl FakeImage {
    pub fn working() -> Self {
        Self {
            fail_on: None,
            scenes: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            scenes: Mutex::new(Vec::new()),
        }
    }

    pub fn rendered(&self) -> Vec<String> {
        self.scenes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageModel for FakeImage {
    async fn render(
        &self,
        scene: &str,
        _settings: &RenderSettings,
    ) -> Result<Vec<u8>, ModelError> {
        self.scenes.lock().unwrap().push(scene.to_string());
        match &self.fail_on {
            Some(marker) if scene.contains(marker.as_str()) => Err(ModelError::Api {
                status: 500,
                body: "render failed".into(),
            }),
            _ => Ok(PNG_BYTES.to_vec()),
        }
    }
}
