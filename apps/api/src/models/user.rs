#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    /// Identifier from the external auth provider, when the account was
    /// created through one.
    pub auth_id: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// "reader" or "author". Authors can publish books.
    pub tier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
