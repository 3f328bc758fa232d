#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One reading position per (user, book). `percentage` is derived from the
/// page fields at write time and is the authoritative value for restoring a
/// position across devices and page-size changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReadingProgressRow {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: i32,
    pub percentage: f64,
    pub last_read_at: DateTime<Utc>,
}
