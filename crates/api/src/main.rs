use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comicsmith_api::config::ServerConfig;
use comicsmith_api::router::build_app_router;
use comicsmith_api::state::AppState;
use comicsmith_db::PgStore;
use comicsmith_models::{DiffusionClient, GeminiClient, ImageStore};
use comicsmith_pipeline::{ComicPipeline, StoryGenerator, TileRenderer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "comicsmith_api=debug,comicsmith_pipeline=debug,tower_http=debug".into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = comicsmith_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    comicsmith_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    comicsmith_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Model clients ---
    let http = reqwest::Client::new();
    let text_model = Arc::new(GeminiClient::with_client(
        http.clone(),
        config.models.gemini_api_base.clone(),
        config.models.gemini_model.clone(),
        config.models.gemini_api_key.clone(),
    ));
    let image_model = Arc::new(DiffusionClient::with_client(
        http,
        config.models.diffusion_api_url.clone(),
    ));
    let images = ImageStore::new(config.image_dir.clone(), config.public_base_url.clone());
    tracing::info!(
        model = %config.models.gemini_model,
        diffusion = %config.models.diffusion_api_url,
        image_dir = %config.image_dir.display(),
        "Model clients configured",
    );

    let pipeline = ComicPipeline::new(
        StoryGenerator::new(text_model),
        TileRenderer::new(image_model, images),
        config.placeholder_image_url.clone(),
    );

    // --- App state ---
    let state = AppState {
        store: Arc::new(PgStore::new(pool.clone())),
        pipeline: Arc::new(pipeline),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
