mod ai;
mod cart;
mod catalog;
mod config;
mod db;
mod errors;
mod library;
mod llm_client;
mod models;
mod progress;
mod reader;
mod routes;
mod state;
mod store;
mod users;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema, seed_catalog};
use crate::llm_client::LlmClient;
use crate::reader::fetch::ContentFetcher;
use crate::reader::MarkerSet;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::notify::ProgressNotifier;
use crate::store::pg::{PgCartStore, PgLibraryStore, PgProgressStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EBookVerse API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    seed_catalog(&db).await?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Load the boilerplate marker set (defaults unless MARKERS_PATH is set)
    let markers = match &config.markers_path {
        Some(path) => Arc::new(MarkerSet::from_json_file(path)?),
        None => Arc::new(MarkerSet::default()),
    };
    info!(
        "Marker set loaded: {} start / {} end markers",
        markers.start_markers.len(),
        markers.end_markers.len()
    );

    // Content fetcher shares the Redis and S3 handles
    let fetcher = ContentFetcher::new(redis, s3.clone(), &config);

    // Postgres-backed stores; progress publishes to in-process subscribers
    let notifier = ProgressNotifier::new();
    let cart = Arc::new(PgCartStore::new(db.clone()));
    let library = Arc::new(PgLibraryStore::new(db.clone()));
    let progress = Arc::new(PgProgressStore::new(db.clone(), notifier));

    // Build app state
    let state = AppState {
        db,
        s3,
        llm,
        config: config.clone(),
        fetcher,
        markers,
        cart,
        library,
        progress,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "ebookverse-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
