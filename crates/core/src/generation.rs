//! Fixed generation parameters for the language and diffusion models.
//!
//! Every story and every tile uses the same values; there is no per-request
//! or per-tile tuning.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Language model sampling
// ---------------------------------------------------------------------------

/// Sampling temperature for story generation.
pub const STORY_TEMPERATURE: f32 = 0.8;

/// Nucleus sampling probability mass for story generation.
pub const STORY_TOP_P: f32 = 0.9;

/// Top-k cutoff for story generation.
pub const STORY_TOP_K: u32 = 40;

/// Output token cap for story generation.
pub const STORY_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling parameters sent with a language-model request.
///
/// Serialized with the camel-case field names the Gemini REST API expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl SamplingConfig {
    /// The fixed parameters used for story generation.
    pub const fn story() -> Self {
        Self {
            temperature: STORY_TEMPERATURE,
            top_p: STORY_TOP_P,
            top_k: STORY_TOP_K,
            max_output_tokens: STORY_MAX_OUTPUT_TOKENS,
        }
    }
}

// ---------------------------------------------------------------------------
// Diffusion rendering
// ---------------------------------------------------------------------------

/// Negative prompt applied to every tile.
pub const NEGATIVE_PROMPT: &str =
    "photorealistic, 3D rendering, smooth gradients, detailed textures, plain background";

/// Denoising steps per image.
pub const RENDER_STEPS: u32 = 10;

/// Classifier-free guidance scale.
pub const RENDER_GUIDANCE_SCALE: f32 = 7.5;

/// Output width in pixels.
pub const RENDER_WIDTH: u32 = 640;

/// Output height in pixels.
pub const RENDER_HEIGHT: u32 = 960;

/// Parameters for a single diffusion render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub negative_prompt: String,
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            steps: RENDER_STEPS,
            guidance_scale: RENDER_GUIDANCE_SCALE,
            width: RENDER_WIDTH,
            height: RENDER_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_sampling_serializes_camel_case() {
        let json = serde_json::to_value(SamplingConfig::story()).unwrap();
        assert_eq!(json["topK"], 40);
        assert_eq!(json["maxOutputTokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!((json["topP"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn default_render_settings_are_portrait() {
        let settings = RenderSettings::default();
        assert_eq!(settings.steps, 10);
        assert_eq!((settings.width, settings.height), (640, 960));
        assert!(settings.negative_prompt.starts_with("photorealistic"));
    }
}
