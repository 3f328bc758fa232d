use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{book::BookRow, progress::ReadingProgressRow, user::UserRow};
use crate::state::AppState;

/// Dashboard shows at most this many in-progress books.
const CONTINUE_READING_LIMIT: usize = 3;

/// GET /api/v1/users/:user_id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} has no profile")))?;

    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// PATCH /api/v1/users/:user_id/profile
///
/// Creates the profile row on first write. Absent fields keep their stored
/// values.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserRow>, AppError> {
    if let Some(name) = &update.display_name {
        let len = name.trim().chars().count();
        if !(2..=50).contains(&len) {
            return Err(AppError::Validation(
                "Display name must be between 2 and 50 characters".to_string(),
            ));
        }
    }
    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(AppError::Validation(
                "Email must be a valid address".to_string(),
            ));
        }
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, display_name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET
            display_name = COALESCE(EXCLUDED.display_name, users.display_name),
            email = COALESCE(EXCLUDED.email, users.email),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(update.display_name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(str::trim))
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, "Profile updated");
    Ok(Json(user))
}

#[derive(Debug, Serialize)]
pub struct ContinueReadingEntry {
    pub book: BookRow,
    pub progress: ReadingProgressRow,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Number of books the user has finished (progress at 100%).
    pub books_read: i64,
    /// Up to three in-progress books, most recently read first.
    pub continue_reading: Vec<ContinueReadingEntry>,
}

/// GET /api/v1/users/:user_id/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, AppError> {
    // 1. All progress rows, most recent first.
    let rows = state.progress.list(user_id).await?;

    let books_read = books_read_count(&rows);
    let in_progress = continue_reading_rows(&rows);

    // 2. Join the in-progress rows with their books. A row whose book has
    //    been removed from the catalog is dropped rather than erroring.
    let book_ids: Vec<Uuid> = in_progress.iter().map(|r| r.book_id).collect();
    let books = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = ANY($1)")
        .bind(&book_ids)
        .fetch_all(&state.db)
        .await?;

    let continue_reading = in_progress
        .into_iter()
        .filter_map(|progress| {
            books
                .iter()
                .find(|b| b.id == progress.book_id)
                .cloned()
                .map(|book| ContinueReadingEntry { book, progress })
        })
        .collect();

    Ok(Json(DashboardResponse {
        books_read,
        continue_reading,
    }))
}

fn books_read_count(rows: &[ReadingProgressRow]) -> i64 {
    rows.iter().filter(|r| r.percentage >= 100.0).count() as i64
}

/// Rows strictly between 0% and 100%, capped at the dashboard limit.
/// Input order (most recent first) is preserved.
fn continue_reading_rows(rows: &[ReadingProgressRow]) -> Vec<ReadingProgressRow> {
    rows.iter()
        .filter(|r| r.percentage > 0.0 && r.percentage < 100.0)
        .take(CONTINUE_READING_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_progress(percentage: f64) -> ReadingProgressRow {
        ReadingProgressRow {
            user_id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            current_page: 0,
            total_pages: 10,
            percentage,
            last_read_at: Utc::now(),
        }
    }

    #[test]
    fn test_books_read_counts_only_completed() {
        let rows = vec![
            make_progress(100.0),
            make_progress(50.0),
            make_progress(100.0),
            make_progress(0.0),
        ];
        assert_eq!(books_read_count(&rows), 2);
    }

    #[test]
    fn test_continue_reading_excludes_unstarted_and_finished() {
        let rows = vec![
            make_progress(0.0),
            make_progress(25.0),
            make_progress(100.0),
            make_progress(75.0),
        ];
        let picked = continue_reading_rows(&rows);
        assert_eq!(picked.len(), 2);
        assert!((picked[0].percentage - 25.0).abs() < f64::EPSILON);
        assert!((picked[1].percentage - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_continue_reading_caps_at_three_preserving_order() {
        let rows: Vec<ReadingProgressRow> =
            [10.0, 20.0, 30.0, 40.0, 50.0].map(make_progress).into();
        let picked = continue_reading_rows(&rows);
        assert_eq!(picked.len(), 3);
        assert!((picked[2].percentage - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_progress_yields_empty_dashboard_parts() {
        assert_eq!(books_read_count(&[]), 0);
        assert!(continue_reading_rows(&[]).is_empty());
    }
}
