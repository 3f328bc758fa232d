//! Natural-language search flow — asks the LLM for real books matching a
//! free-text query.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{SEARCH_PROMPT_TEMPLATE, SEARCH_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{COVER_IMAGE_INSTRUCTION, REAL_BOOKS_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::book::BookRow;

/// A book as produced by the search flow. Unlike `BookRow` the id is a free
/// string (model results are not catalog rows) and price is only present for
/// results that came from the catalog fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub image_hint: String,
    pub genre: String,
    pub rating: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<BookRow> for AiBook {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            author: row.author,
            cover_image: row.cover_image,
            image_hint: row.image_hint,
            genre: row.genre,
            rating: row.rating,
            description: row.description,
            price: Some(row.price),
        }
    }
}

/// Structured output of the search flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub books: Vec<AiBook>,
}

/// Asks the LLM for up to 10 real books matching the query.
/// Callers are expected to handle the blank-query case before calling this.
pub async fn search_books(query: &str, llm: &LlmClient) -> Result<SearchResult, AppError> {
    let prompt = SEARCH_PROMPT_TEMPLATE
        .replace("{real_books_instruction}", REAL_BOOKS_INSTRUCTION)
        .replace("{cover_image_instruction}", COVER_IMAGE_INSTRUCTION)
        .replace("{query}", query);
    llm.call_json::<SearchResult>(&prompt, SEARCH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Search flow failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_row() -> BookRow {
        BookRow {
            id: Uuid::new_v4(),
            title: "Moby Dick".to_string(),
            author: "Herman Melville".to_string(),
            cover_image: "https://picsum.photos/seed/moby-dick/300/450".to_string(),
            image_hint: "white whale".to_string(),
            genre: "Adventure".to_string(),
            rating: 4.5,
            description: "A whaling voyage.".to_string(),
            price: 9.99,
            gutenberg_id: Some(2701),
            text_key: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ai_book_deserializes_without_price() {
        let json = r#"{
            "id": "gutenberg-2701",
            "title": "Moby Dick",
            "author": "Herman Melville",
            "cover_image": "https://picsum.photos/seed/moby-dick/300/450",
            "image_hint": "white whale",
            "genre": "Adventure",
            "rating": 4.5,
            "description": "A whaling voyage."
        }"#;
        let book: AiBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.title, "Moby Dick");
        assert!(book.price.is_none());
    }

    #[test]
    fn test_ai_book_without_price_serializes_without_key() {
        let book = AiBook {
            id: "gutenberg-2701".to_string(),
            title: "Moby Dick".to_string(),
            author: "Herman Melville".to_string(),
            cover_image: "x".to_string(),
            image_hint: "white whale".to_string(),
            genre: "Adventure".to_string(),
            rating: 4.5,
            description: "d".to_string(),
            price: None,
        };
        let json = serde_json::to_string(&book).unwrap();
        assert!(!json.contains("price"), "got: {json}");
    }

    #[test]
    fn test_catalog_row_maps_to_ai_book_with_price() {
        let row = make_row();
        let id = row.id;
        let book = AiBook::from(row);
        assert_eq!(book.id, id.to_string());
        assert_eq!(book.author, "Herman Melville");
        assert_eq!(book.price, Some(9.99));
    }

    #[test]
    fn test_search_result_deserializes() {
        let json = r#"{"books": [{
            "id": "dracula",
            "title": "Dracula",
            "author": "Bram Stoker",
            "cover_image": "https://picsum.photos/seed/dracula/300/450",
            "image_hint": "dark castle",
            "genre": "Gothic",
            "rating": 4.2,
            "description": "An epistolary vampire novel."
        }]}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.books.len(), 1);
        assert_eq!(result.books[0].genre, "Gothic");
    }
}
