use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::book::BookRow;
use crate::reader::cleaner::clean;
use crate::reader::paginator::{paginate, resolve_page_index};
use crate::state::AppState;

/// Bounds on the client-supplied page size, in characters. Out-of-range
/// values clamp rather than error.
const MIN_PAGE_SIZE: usize = 200;
const MAX_PAGE_SIZE: usize = 20_000;

#[derive(Deserialize)]
pub struct PagesQuery {
    pub page_size: Option<usize>,
    /// When present, the stored percentage for this user resolves to
    /// `resume_page` against the freshly computed page list.
    pub user_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct PagesResponse {
    pub book_id: Uuid,
    pub page_size: usize,
    pub total_pages: usize,
    pub resume_page: usize,
    pub has_content: bool,
    pub pages: Vec<String>,
}

/// GET /api/v1/books/:book_id/pages
pub async fn handle_get_pages(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Query(query): Query<PagesQuery>,
) -> Result<Json<PagesResponse>, AppError> {
    let book: BookRow = sqlx::query_as("SELECT * FROM books WHERE id = $1")
        .bind(book_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {book_id} not found")))?;

    let page_size = query
        .page_size
        .unwrap_or(state.config.default_page_size)
        .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

    let raw = state.fetcher.load(&book).await?;

    // Cleaning and paginating a full novel is CPU-bound work; keep it off
    // the async executor.
    let markers = state.markers.clone();
    let pages = tokio::task::spawn_blocking(move || {
        let text = clean(&raw, &markers);
        paginate(&text, page_size)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}")))?;

    let resume_page = match query.user_id {
        Some(user_id) => state
            .progress
            .get(user_id, book_id)
            .await?
            .map(|progress| resolve_page_index(pages.len(), progress.percentage))
            .unwrap_or(0),
        None => 0,
    };

    Ok(Json(PagesResponse {
        book_id,
        page_size,
        total_pages: pages.len(),
        resume_page,
        has_content: !pages.is_empty(),
        pages,
    }))
}
