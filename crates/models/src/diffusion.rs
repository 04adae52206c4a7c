//! REST client for a Stable Diffusion server exposing `/sdapi/v1/txt2img`.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use comicsmith_core::generation::RenderSettings;

use crate::error::{ensure_success, ModelError};
use crate::ImageModel;

/// Default address of a locally running diffusion server.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:7860";

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    steps: u32,
    cfg_scale: f32,
    width: u32,
    height: u32,
    batch_size: u32,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

/// Decode the first base64 image of a txt2img response.
fn decode_first_image(response: Txt2ImgResponse) -> Result<Vec<u8>, ModelError> {
    let encoded = response
        .images
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyResponse)?;
    // Some servers prefix a data URL header.
    let payload = encoded
        .split_once(',')
        .map_or(encoded.as_str(), |(_, data)| data);
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ModelError::Decode(e.to_string()))
}

/// HTTP client for a diffusion server.
pub struct DiffusionClient {
    client: reqwest::Client,
    api_url: String,
}

impl DiffusionClient {
    /// Create a client for the server at `api_url`, e.g. `http://host:7860`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageModel for DiffusionClient {
    async fn render(
        &self,
        scene: &str,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>, ModelError> {
        let body = Txt2ImgRequest {
            prompt: scene,
            negative_prompt: &settings.negative_prompt,
            steps: settings.steps,
            cfg_scale: settings.guidance_scale,
            width: settings.width,
            height: settings.height,
            batch_size: 1,
        };

        let response = self
            .client
            .post(format!("{}/sdapi/v1/txt2img", self.api_url))
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        decode_first_image(response.json().await?)
    }
}
