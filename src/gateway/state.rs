use std::sync::Arc;
use std::time::Duration;

use crate::account::Database;
use crate::config::{AuthConfig, SessionConfig};
use crate::session::{CookieCodec, SessionStore};
use crate::user_auth::UserAuthService;

/// Shared application state
pub struct AppState {
    /// Credential store connection pool
    pub db: Database,
    /// Registration / login rules
    pub user_auth: UserAuthService,
    /// Per-client session records
    pub sessions: Arc<SessionStore>,
    /// Session cookie signing and parsing
    pub cookies: CookieCodec,
}

impl AppState {
    pub fn new(db: Database, session: &SessionConfig, auth: &AuthConfig) -> Self {
        let user_auth = UserAuthService::new(db.pool().clone(), auth.password_scheme);
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            session.idle_timeout_secs,
        )));
        let cookies = CookieCodec::new(
            &session.secret,
            &session.cookie_name,
            session.secure_cookie,
        );
        Self {
            db,
            user_auth,
            sessions,
            cookies,
        }
    }
}
