use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::book::{BookQuery, BookRow};
use crate::state::AppState;

/// GET /api/v1/users/:user_id/library
///
/// Accepts the same q/genre/sort filter as the catalog listing.
pub async fn handle_list_library(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<BookQuery>,
) -> Result<Json<Vec<BookRow>>, AppError> {
    let books = state.library.list(user_id, &query).await?;
    Ok(Json(books))
}
