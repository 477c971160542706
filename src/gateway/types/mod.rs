//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`error_codes`]: Standard error code constants
//! - [`WebError`]: Handler error rendered as an `ApiResponse`

pub mod error;
pub mod response;

// Re-export commonly used types at module root
pub use error::WebError;
pub use response::{ApiResponse, HealthResponse, error_codes};
