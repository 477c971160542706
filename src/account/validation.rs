//! Input validation for registration credentials
//!
//! This module provides validated types that enforce the length rules for
//! usernames and passwords. All fields are private to force validation
//! through the public API.
//!
//! Lengths are counted in characters, not bytes, so `"用户名"` is a valid
//! three-character username.

use std::fmt;

use validator::ValidateLength;

// ============================================================================
// Limits
// ============================================================================

pub const USERNAME_MIN_LEN: u64 = 3;
pub const USERNAME_MAX_LEN: u64 = 20;
pub const PASSWORD_MIN_LEN: u64 = 6;
pub const PASSWORD_MAX_LEN: u64 = 20;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for registration input
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid length for {field}: expected {min}-{max}, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: u64,
        max: u64,
        actual: usize,
    },
}

fn check_length(
    field: &'static str,
    value: &str,
    min: u64,
    max: u64,
) -> Result<(), ValidationError> {
    if value.validate_length(Some(min), Some(max), None) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLength {
            field,
            min,
            max,
            actual: value.chars().count(),
        })
    }
}

// ============================================================================
// Username - Validated Username (Private Fields)
// ============================================================================

/// Validated username (3-20 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new validated Username
    ///
    /// # Examples
    /// ```
    /// use authgate::account::validation::Username;
    ///
    /// let alice = Username::new("alice").unwrap();
    /// assert_eq!(alice.as_str(), "alice");
    ///
    /// assert!(Username::new("al").is_err()); // too short
    /// ```
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        check_length("username", name, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Password - Validated Plaintext Password
// ============================================================================

/// Validated plaintext password (6-20 characters)
///
/// `Debug` is redacted so the plaintext never reaches a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: &str) -> Result<Self, ValidationError> {
        check_length("password", password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN)?;
        Ok(Self(password.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

// ============================================================================
// Tests
// ============================================================================
