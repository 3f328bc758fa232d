//! Per-user storefront state behind get/put/subscribe repository traits.
//!
//! Handlers and the checkout flow only see these traits; `AppState` carries
//! `Arc<dyn CartStore>` (and friends), so the Postgres backends can be
//! swapped for the in-memory ones in unit tests without touching callers.
//! Subscriptions exist only where something consumes them: reading progress
//! feeds the SSE endpoint, cart and library are plain get/put.

pub mod memory;
pub mod notify;
pub mod pg;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::book::{BookQuery, BookRow};
use crate::models::cart::CartLine;
use crate::models::progress::ReadingProgressRow;

/// Shopping cart contents for a user. One copy per title; e-books have no
/// quantity selector, so `put` always stores quantity 1.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Vec<CartLine>, AppError>;
    async fn put(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError>;
    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError>;
    /// Returns false when the book was not in the cart.
    async fn remove(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError>;
    async fn clear(&self, user_id: Uuid) -> Result<(), AppError>;
}

/// Books a user owns. `add` is idempotent so checkout can retry safely.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn add(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError>;
    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError>;
    async fn list(&self, user_id: Uuid, query: &BookQuery) -> Result<Vec<BookRow>, AppError>;
}

/// Reading positions, one row per (user, book). `subscribe` yields a watch
/// receiver that observes every `put` for that pair; the SSE endpoint turns
/// it into a live event stream.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ReadingProgressRow>, AppError>;
    async fn put(&self, progress: ReadingProgressRow) -> Result<(), AppError>;
    /// Most recently read first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ReadingProgressRow>, AppError>;
    fn subscribe(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> watch::Receiver<Option<ReadingProgressRow>>;
}
