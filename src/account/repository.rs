//! Repository layer for the credential store

use sqlx::SqlitePool;

use super::models::User;

/// Credential store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User repository: lookup and creation of user records
pub struct UserRepository;

impl UserRepository {
    /// Get user by username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, password_hash, created_date
               FROM users WHERE username = ?1"#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, password_hash, created_date
               FROM users WHERE id = ?1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Create a new user
    ///
    /// A single `INSERT ... RETURNING` statement: the `UNIQUE` constraint on
    /// `username` decides between concurrent registrations, and the loser
    /// gets `DuplicateUsername`.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, password_hash) VALUES (?1, ?2)
               RETURNING id, username, password_hash, created_date"#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Number of registered users
    pub async fn count(pool: &SqlitePool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
