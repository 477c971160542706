//! User authentication: registration, login and the access gate middleware.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;

pub use middleware::access_gate;
pub use password::PasswordScheme;
pub use service::{AuthError, RegistrationError, UserAuthService};
