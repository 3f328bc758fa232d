//! Reading-progress endpoints.
//!
//! Clients send page coordinates; the server derives the percentage and
//! stores it as the authoritative position. Page numbers are only meaningful
//! for the page size they were computed at; the percentage is what survives
//! font changes and device switches.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use chrono::Utc;
use futures_util::stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::progress::ReadingProgressRow;
use crate::state::AppState;

/// GET /api/v1/users/:user_id/progress
pub async fn handle_list_progress(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ReadingProgressRow>>, AppError> {
    let rows = state.progress.list(user_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/users/:user_id/progress/:book_id
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ReadingProgressRow>, AppError> {
    let row = state
        .progress
        .get(user_id, book_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No progress for book {book_id}")))?;
    Ok(Json(row))
}

#[derive(Deserialize)]
pub struct ProgressUpdate {
    pub current_page: i32,
    pub total_pages: i32,
}

/// PUT /api/v1/users/:user_id/progress/:book_id
pub async fn handle_put_progress(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<ReadingProgressRow>, AppError> {
    validate_position(update.current_page, update.total_pages)?;

    let row = ReadingProgressRow {
        user_id,
        book_id,
        current_page: update.current_page,
        total_pages: update.total_pages,
        percentage: derive_percentage(update.current_page, update.total_pages),
        last_read_at: Utc::now(),
    };
    state.progress.put(row.clone()).await?;
    Ok(Json(row))
}

/// GET /api/v1/users/:user_id/progress/:book_id/events
///
/// Streams the progress row as SSE: the current state immediately, then one
/// event per update. Every event carries the full row, so clients can join
/// or reconnect at any time without replaying history.
pub async fn handle_progress_events(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    // Subscribe before reading so an update between the two is not lost.
    let rx = state.progress.subscribe(user_id, book_id);
    let stored = state.progress.get(user_id, book_id).await?;
    let initial = rx.borrow().clone().or(stored);

    let s = stream::unfold((rx, Some(initial)), move |(mut rx, pending)| async move {
        if let Some(initial) = pending {
            return Some((
                Ok::<Event, Infallible>(progress_event(&initial)),
                (rx, None),
            ));
        }
        match rx.changed().await {
            Ok(()) => {
                let row = rx.borrow_and_update().clone();
                Some((Ok(progress_event(&row)), (rx, None)))
            }
            Err(_) => None,
        }
    });

    Ok(Sse::new(s).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}

fn progress_event(row: &Option<ReadingProgressRow>) -> Event {
    let data = serde_json::to_string(row).unwrap_or_else(|_| "null".to_string());
    Event::default().data(data).event("progress")
}

/// Percentage for a 0-based page position: page N of M means N+1 pages seen.
/// The last page always lands on exactly 100.
pub fn derive_percentage(current_page: i32, total_pages: i32) -> f64 {
    (f64::from(current_page) + 1.0) / f64::from(total_pages) * 100.0
}

pub fn validate_position(current_page: i32, total_pages: i32) -> Result<(), AppError> {
    if total_pages < 1 {
        return Err(AppError::Validation(
            "total_pages must be at least 1".to_string(),
        ));
    }
    if current_page < 0 || current_page >= total_pages {
        return Err(AppError::Validation(format!(
            "current_page must be within 0..{total_pages}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_percentage_first_page() {
        // Page 0 of 4 means one page seen: 25%.
        assert!((derive_percentage(0, 4) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_derive_percentage_last_page_is_exactly_100() {
        assert_eq!(derive_percentage(9, 10), 100.0);
        assert_eq!(derive_percentage(0, 1), 100.0);
    }

    #[test]
    fn test_derive_percentage_midpoint() {
        assert!((derive_percentage(4, 10) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_position_accepts_valid_range() {
        assert!(validate_position(0, 1).is_ok());
        assert!(validate_position(5, 10).is_ok());
        assert!(validate_position(9, 10).is_ok());
    }

    #[test]
    fn test_validate_position_rejects_out_of_range() {
        assert!(validate_position(-1, 10).is_err());
        assert!(validate_position(10, 10).is_err());
        assert!(validate_position(0, 0).is_err());
        assert!(validate_position(0, -3).is_err());
    }
}
