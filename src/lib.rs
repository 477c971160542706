//! authgate - session-gated login service
//!
//! Registration, login and a logged-in profile endpoint over axum and an
//! embedded SQLite credential store.
//!
//! # Modules
//!
//! - [`account`] - User records, validation and the credential store
//! - [`user_auth`] - Registration/login rules, password hashing, access gate middleware
//! - [`session`] - Per-client session store and signed session cookie
//! - [`gateway`] - HTTP router, pages and JSON endpoints
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod account;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod session;
pub mod user_auth;

// Convenient re-exports at crate root
pub use account::{Database, User, UserProfile};
pub use config::AppConfig;
pub use gateway::{build_router, run_server, state::AppState};
pub use session::{Session, SessionId, SessionStore};
pub use user_auth::{AuthError, PasswordScheme, RegistrationError, UserAuthService};
