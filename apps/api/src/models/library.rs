#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LibraryEntryRow {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub purchased_at: DateTime<Utc>,
}
