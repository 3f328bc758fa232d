use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::reader::{fetch::ContentFetcher, MarkerSet};
use crate::store::{CartStore, LibraryStore, ProgressStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Loads, cleans and caches raw book text (Gutenberg or uploaded).
    pub fetcher: ContentFetcher,
    /// Boilerplate marker set, loaded once at startup.
    pub markers: Arc<MarkerSet>,
    pub cart: Arc<dyn CartStore>,
    pub library: Arc<dyn LibraryStore>,
    pub progress: Arc<dyn ProgressStore>,
}
