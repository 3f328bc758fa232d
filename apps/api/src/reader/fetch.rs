//! Book text retrieval with a Redis cache in front.
//!
//! Catalog classics come from a Project Gutenberg mirror; uploaded books
//! come from object storage, where the publish flow stored their extracted
//! text. Both cache and sources hold RAW text; the cleaner runs in the
//! handler.
//!
//! Redis being down degrades to a fetch on every request, never to an error.

use aws_sdk_s3::Client as S3Client;
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::book::BookRow;

#[derive(Clone)]
pub struct ContentFetcher {
    http: reqwest::Client,
    redis: redis::Client,
    s3: S3Client,
    s3_bucket: String,
    gutenberg_base_url: String,
    cache_ttl_secs: u64,
}

impl ContentFetcher {
    pub fn new(redis: redis::Client, s3: S3Client, config: &Config) -> Self {
        ContentFetcher {
            http: reqwest::Client::new(),
            redis,
            s3,
            s3_bucket: config.s3_bucket.clone(),
            gutenberg_base_url: config.gutenberg_base_url.clone(),
            cache_ttl_secs: config.book_text_cache_ttl_secs,
        }
    }

    /// Returns the raw text for a book, from cache when possible.
    pub async fn load(&self, book: &BookRow) -> Result<String, AppError> {
        let cache_key = format!("book_text:{}", book.id);

        if let Some(text) = self.cache_get(&cache_key).await {
            debug!("Book text cache hit for {}", book.id);
            return Ok(text);
        }

        let text = match (book.gutenberg_id, book.text_key.as_deref()) {
            (Some(gutenberg_id), _) => self.fetch_gutenberg(gutenberg_id).await?,
            (None, Some(text_key)) => self.fetch_object(text_key).await?,
            (None, None) => {
                return Err(AppError::UnprocessableEntity(format!(
                    "Book {} has no content source",
                    book.id
                )))
            }
        };

        self.cache_put(&cache_key, &text).await;
        Ok(text)
    }

    async fn fetch_gutenberg(&self, gutenberg_id: i32) -> Result<String, AppError> {
        let url = gutenberg_text_url(&self.gutenberg_base_url, gutenberg_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ContentFetch(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ContentFetch(format!(
                "GET {url} returned {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::ContentFetch(format!("Reading body of {url} failed: {e}")))
    }

    async fn fetch_object(&self, text_key: &str) -> Result<String, AppError> {
        let object = self
            .s3
            .get_object()
            .bucket(&self.s3_bucket)
            .key(text_key)
            .send()
            .await
            .map_err(|e| AppError::S3(format!("get_object {text_key} failed: {e}")))?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| AppError::S3(format!("Reading body of {text_key} failed: {e}")))?
            .into_bytes();

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn cache_get(&self, key: &str) -> Option<String> {
        let mut conn = match self.redis.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis unavailable, skipping cache read: {e}");
                return None;
            }
        };
        match conn.get::<_, Option<String>>(key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Redis GET {key} failed: {e}");
                None
            }
        }
    }

    async fn cache_put(&self, key: &str, text: &str) {
        let mut conn = match self.redis.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis unavailable, skipping cache write: {e}");
                return;
            }
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(key, text, self.cache_ttl_secs)
            .await
        {
            warn!("Redis SETEX {key} failed: {e}");
        }
    }
}

/// Plain-text URL layout used by gutenberg.org and its mirrors.
fn gutenberg_text_url(base_url: &str, gutenberg_id: i32) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/cache/epub/{gutenberg_id}/pg{gutenberg_id}.txt")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutenberg_text_url_layout() {
        assert_eq!(
            gutenberg_text_url("https://www.gutenberg.org", 1342),
            "https://www.gutenberg.org/cache/epub/1342/pg1342.txt"
        );
    }

    #[test]
    fn test_gutenberg_text_url_tolerates_trailing_slash() {
        assert_eq!(
            gutenberg_text_url("https://mirror.example/", 84),
            "https://mirror.example/cache/epub/84/pg84.txt"
        );
    }
}
