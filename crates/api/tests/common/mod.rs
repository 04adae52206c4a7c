#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use comicsmith_api::auth::session::SessionConfig;
use comicsmith_api::config::{ModelConfig, ServerConfig};
use comicsmith_api::router::build_app_router;
use comicsmith_api::state::AppState;
use comicsmith_core::generation::{RenderSettings, SamplingConfig};
use comicsmith_db::memory::MemoryStore;
use comicsmith_models::{ImageModel, ImageStore, ModelError, TextModel};
use comicsmith_pipeline::{ComicPipeline, StoryGenerator, TileRenderer};

pub const PLACEHOLDER: &str = "https://placeholder.test/unavailable.png";
pub const PASSWORD: &str = "hunter2hunter2";

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

// ---------------------------------------------------------------------------
// Model doubles
// ---------------------------------------------------------------------------

/// Answers by prompt shape: the tile prompt gets `tile_list`, the
/// inspiration prompt a film, and anything else the story text.
pub struct FakeText {
    pub story: String,
    pub tile_list: String,
    pub fail_story: bool,
    prompts: Mutex<Vec<String>>,
}

impl FakeText {
    pub fn new(story: &str, tile_list: &str) -> Self {
        Self {
            story: story.to_string(),
            tile_list: tile_list.to_string(),
            fail_story: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_story: true,
            ..Self::new("", "")
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for FakeText {
    async fn generate(
        &self,
        prompt: &str,
        _sampling: Option<SamplingConfig>,
    ) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.starts_with("Convert the following story") {
            Ok(self.tile_list.clone())
        } else if prompt.starts_with("Based on the following comic book story") {
            Ok("Movie Title: Paddington 2 (2017)".to_string())
        } else if self.fail_story {
            Err(ModelError::Api {
                status: 503,
                body: "model overloaded".into(),
            })
        } else {
            Ok(self.story.clone())
        }
    }
}

/// Renders PNG bytes; scenes listed in `failing` raise an error.
#[derive(Default)]
pub struct FakeImage {
    pub failing: Vec<String>,
    rendered: Mutex<VecDeque<String>>,
}

impl FakeImage {
    pub fn failing_for(scenes: &[&str]) -> Self {
        Self {
            failing: scenes.iter().map(|s| s.to_string()).collect(),
            rendered: Mutex::new(VecDeque::new()),
        }
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageModel for FakeImage {
    async fn render(
        &self,
        scene: &str,
        _settings: &RenderSettings,
    ) -> Result<Vec<u8>, ModelError> {
        self.rendered.lock().unwrap().push_back(scene.to_string());
        if self.failing.iter().any(|s| s == scene) {
            return Err(ModelError::Api {
                status: 500,
                body: "CUDA out of memory".into(),
            });
        }
        Ok(PNG_BYTES.to_vec())
    }
}

/// A numbered tile list with `count` lines.
pub fn numbered_tiles(count: usize) -> String {
    (1..=count)
        .map(|i| format!("{i}. Scene number {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub text: Arc<FakeText>,
    pub image: Arc<FakeImage>,
    pub dir: TempDir,
}

/// Build a test `ServerConfig` rooted at `dir`.
pub fn test_config(dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout: Some(Duration::from_secs(30)),
        public_base_url: "http://localhost:3000".to_string(),
        static_dir: dir.join("static"),
        image_dir: dir.join("static/generated_images"),
        placeholder_image_url: PLACEHOLDER.to_string(),
        min_password_length: 8,
        session: SessionConfig::default(),
        models: ModelConfig {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "test-model".to_string(),
            gemini_api_base: "http://127.0.0.1:9".to_string(),
            diffusion_api_url: "http://127.0.0.1:9".to_string(),
        },
    }
}

/// Build the full router over an in-memory store and the given model doubles.
pub fn build_test_app_with(text: FakeText, image: FakeImage) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let static_dir: PathBuf = config.static_dir.clone();
    std::fs::create_dir_all(&static_dir).unwrap();
    for page in ["login.html", "register.html", "dashboard.html", "comic-creator.html"] {
        std::fs::write(static_dir.join(page), format!("<html>{page}</html>")).unwrap();
    }

    let store = Arc::new(MemoryStore::new());
    let text = Arc::new(text);
    let image = Arc::new(image);

    let pipeline = ComicPipeline::new(
        StoryGenerator::new(text.clone()),
        TileRenderer::new(
            image.clone(),
            ImageStore::new(config.image_dir.clone(), config.public_base_url.clone()),
        ),
        config.placeholder_image_url.clone(),
    );

    let state = AppState {
        store: store.clone(),
        pipeline: Arc::new(pipeline),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        text,
        image,
        dir,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(
        FakeText::new("A cat boards a rocket. It flies to the moon.", &numbered_tiles(10)),
        FakeImage::default(),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), cookie).await
}

/// POST an arbitrary body labelled as JSON, valid or not.
pub async fn post_raw(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `name=value` pair from a response's `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response must set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

/// Register `email` and return the session cookie pair.
pub async fn register(app: &Router, email: &str) -> String {
    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "username": "reader", "email": email, "password": PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
    session_cookie(&response)
}
