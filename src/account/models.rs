//! Data models for user accounts

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// Display format of `created_at` in the profile endpoint.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User account, one row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    /// UTC, second precision (SQLite `CURRENT_TIMESTAMP`)
    #[sqlx(rename = "created_date")]
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Public view of a user returned by `GET /info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserProfile {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    /// Creation time as `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2024-05-01 12:30:00")]
    pub create_at: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            create_at: user.created_at.format(CREATED_AT_FORMAT).to_string(),
        }
    }
}
