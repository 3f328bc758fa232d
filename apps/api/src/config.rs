use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    /// Base URL of the Project Gutenberg mirror used for catalog classics.
    pub gutenberg_base_url: String,
    /// Page size (in characters) used when the reader does not ask for one.
    pub default_page_size: usize,
    /// TTL for cleaned book text cached in Redis.
    pub book_text_cache_ttl_secs: u64,
    /// Optional path to a JSON file overriding the boilerplate marker set.
    pub markers_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            gutenberg_base_url: std::env::var("GUTENBERG_BASE_URL")
                .unwrap_or_else(|_| "https://www.gutenberg.org".to_string()),
            default_page_size: std::env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "1800".to_string())
                .parse::<usize>()
                .context("DEFAULT_PAGE_SIZE must be a positive integer")?,
            book_text_cache_ttl_secs: std::env::var("BOOK_TEXT_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse::<u64>()
                .context("BOOK_TEXT_CACHE_TTL_SECS must be an integer number of seconds")?,
            markers_path: std::env::var("MARKERS_PATH").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
