use std::path::PathBuf;
use std::time::Duration;

use comicsmith_core::validation::DEFAULT_MIN_PASSWORD_LENGTH;
use comicsmith_models::{diffusion, gemini};

use crate::auth::session::SessionConfig;

/// Image shown for a tile whose render failed.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/300x200?text=Image+Not+Available";

/// Connection settings for the two model backends.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub diffusion_api_url: String,
}

/// Server configuration loaded from environment variables.
///
/// Everything except the Gemini key has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout. `None` lets model calls run as long as they take.
    pub request_timeout: Option<Duration>,
    /// Scheme and host used to build rendered image URLs.
    pub public_base_url: String,
    /// Directory holding the browser pages and their scripts.
    pub static_dir: PathBuf,
    /// Directory rendered images are written to.
    pub image_dir: PathBuf,
    pub placeholder_image_url: String,
    pub min_password_length: usize,
    pub session: SessionConfig,
    pub models: ModelConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                                   |
    /// |-------------------------|-------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                 |
    /// | `PORT`                  | `3000`                                    |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                   |
    /// | `REQUEST_TIMEOUT_SECS`  | unset (no timeout)                        |
    /// | `PUBLIC_BASE_URL`       | `http://localhost:3000`                   |
    /// | `STATIC_DIR`            | `static`                                  |
    /// | `IMAGE_DIR`             | `static/generated_images`                 |
    /// | `PLACEHOLDER_IMAGE_URL` | via.placeholder.com "Image Not Available" |
    /// | `MIN_PASSWORD_LENGTH`   | `8`                                       |
    /// | `GEMINI_API_KEY`        | required                                  |
    /// | `GEMINI_MODEL`          | `gemini-1.5-flash`                        |
    /// | `GEMINI_API_BASE`       | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `DIFFUSION_API_URL`     | `http://127.0.0.1:7860`                   |
    /// | `SESSION_COOKIE_NAME`   | `comicsmith_session`                      |
    /// | `SESSION_EXPIRY_HOURS`  | `168`                                     |
    /// | `COOKIE_SECURE`         | `false`                                   |
    ///
    /// Panics on a missing required variable or an unparsable value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                let secs: u64 = s
                    .trim()
                    .parse()
                    .expect("REQUEST_TIMEOUT_SECS must be a valid u64");
                Duration::from_secs(secs)
            });

        let min_password_length: usize = var(
            "MIN_PASSWORD_LENGTH",
            &DEFAULT_MIN_PASSWORD_LENGTH.to_string(),
        )
        .parse()
        .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        let models = ModelConfig {
            gemini_api_key: lookup("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
            gemini_model: var("GEMINI_MODEL", gemini::DEFAULT_MODEL),
            gemini_api_base: var("GEMINI_API_BASE", gemini::DEFAULT_API_BASE),
            diffusion_api_url: var("DIFFUSION_API_URL", diffusion::DEFAULT_API_URL),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout,
            public_base_url: var("PUBLIC_BASE_URL", "http://localhost:3000"),
            static_dir: PathBuf::from(var("STATIC_DIR", "static")),
            image_dir: PathBuf::from(var("IMAGE_DIR", "static/generated_images")),
            placeholder_image_url: var("PLACEHOLDER_IMAGE_URL", DEFAULT_PLACEHOLDER_IMAGE_URL),
            min_password_length,
            session: SessionConfig::from_lookup(&lookup),
            models,
        }
    }
}
