//! Account management module
//!
//! SQLite-backed credential store: user records and input validation.

pub mod models;
pub mod repository;
pub mod validation;

// Re-export commonly used types
pub use models::{User, UserProfile};
pub use repository::{StoreError, UserRepository};
pub use validation::{Password, Username, ValidationError};

// Re-export Database from top-level db module
pub use crate::db::Database;
