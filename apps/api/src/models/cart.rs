#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::book::BookRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemRow {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Cart item joined with its catalog row, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub book: BookRow,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}
