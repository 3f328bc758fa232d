use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::ai::recommend::{recommend_books, RecommendationInput, RecommendationsResult};
use crate::ai::search::{search_books, AiBook, SearchResult};
use crate::errors::AppError;
use crate::models::book::BookRow;
use crate::state::AppState;

/// POST /api/v1/ai/recommendations
///
/// Requires at least one signal; an all-empty input would just prompt the
/// model to guess.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(input): Json<RecommendationInput>,
) -> Result<Json<RecommendationsResult>, AppError> {
    if input.is_empty() {
        return Err(AppError::Validation(
            "Provide reading_history, genre_preferences, or ratings".to_string(),
        ));
    }

    let result = recommend_books(&input, &state.llm).await?;
    info!(
        history_len = input.reading_history.len(),
        recommended = result.recommended_books.len(),
        "Recommendation flow complete"
    );
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// POST /api/v1/ai/search
///
/// A blank query skips the model and returns the full catalog instead.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResult>, AppError> {
    let query = request.query.trim();
    if query.is_empty() {
        let rows = sqlx::query_as::<_, BookRow>("SELECT * FROM books ORDER BY title ASC")
            .fetch_all(&state.db)
            .await?;
        let books: Vec<AiBook> = rows.into_iter().map(AiBook::from).collect();
        return Ok(Json(SearchResult { books }));
    }

    let result = search_books(query, &state.llm).await?;
    info!(
        query_len = query.len(),
        results = result.books.len(),
        "Search flow complete"
    );
    Ok(Json(result))
}
