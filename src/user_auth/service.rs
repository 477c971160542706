use anyhow::Context;
use sqlx::SqlitePool;

use super::password::{self, PasswordScheme};
use crate::account::{Password, StoreError, User, UserRepository, Username, ValidationError};

/// Registration failures
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("username already taken")]
    UsernameTaken,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Login failures
///
/// Unknown username and wrong password are the same variant on purpose.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct UserAuthService {
    db: SqlitePool,
    scheme: PasswordScheme,
}

impl UserAuthService {
    pub fn new(db: SqlitePool, scheme: PasswordScheme) -> Self {
        Self { db, scheme }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Register a new user
    ///
    /// Does not touch the session; the caller establishes it on success.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, RegistrationError> {
        // 1. Validate lengths before anything reaches the store
        let username = Username::new(username)?;
        let password = Password::new(password)?;

        // 2. Hash password off the async workers
        let scheme = self.scheme;
        let plaintext = password.as_str().to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(scheme, &plaintext))
                .await
                .context("Password hashing task failed")??;

        // 3. Insert; the UNIQUE constraint settles races
        match UserRepository::create(&self.db, username.as_str(), &password_hash).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "User registered");
                Ok(user)
            }
            Err(StoreError::DuplicateUsername(name)) => {
                tracing::warn!(username = %name, "Registration attempt for existing user");
                Err(RegistrationError::UsernameTaken)
            }
            Err(StoreError::Database(e)) => {
                Err(anyhow::Error::new(e).context("Failed to insert user").into())
            }
        }
    }

    /// Check a username/password pair
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = UserRepository::find_by_username(&self.db, username)
            .await
            .context("User lookup failed")?;

        let scheme = self.scheme;
        let plaintext = password.to_owned();
        let verified = tokio::task::spawn_blocking(move || match user {
            Some(user) => {
                let ok = password::verify_password(&plaintext, &user.password_hash);
                ok.then_some(user)
            }
            None => {
                password::dummy_verify(scheme, &plaintext);
                None
            }
        })
        .await
        .context("Password verification task failed")?;

        match verified {
            Some(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "User logged in");
                Ok(user)
            }
            None => {
                tracing::warn!(username = %username, "Login failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Load the record behind an authenticated session
    pub async fn current_user(&self, username: &str) -> anyhow::Result<Option<User>> {
        UserRepository::find_by_username(&self.db, username)
            .await
            .context("User lookup failed")
    }
}
