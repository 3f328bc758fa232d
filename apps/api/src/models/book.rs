#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub image_hint: String,
    pub genre: String,
    pub rating: f64,
    pub description: String,
    pub price: f64,
    /// Project Gutenberg e-text number for catalog classics; None for uploads.
    pub gutenberg_id: Option<i32>,
    /// Object-storage key of the extracted text; None when the text lives upstream.
    pub text_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Shared catalog/library listing filter. `sort` only accepts the four
/// whitelisted orderings; anything else fails deserialization with a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub q: Option<String>,
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: SortOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    TitleDesc,
    #[serde(rename = "author-asc")]
    AuthorAsc,
    #[serde(rename = "author-desc")]
    AuthorDesc,
}

impl SortOption {
    /// ORDER BY clause for the whitelisted sorts. Never interpolate raw
    /// client input into SQL; this enum is the only path to the clause.
    pub fn order_by_sql(self) -> &'static str {
        match self {
            SortOption::TitleAsc => "b.title ASC",
            SortOption::TitleDesc => "b.title DESC",
            SortOption::AuthorAsc => "b.author ASC",
            SortOption::AuthorDesc => "b.author DESC",
        }
    }
}
