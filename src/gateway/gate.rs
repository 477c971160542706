//! Access gate: which paths need a logged-in session.
//!
//! [`evaluate`] is a pure function of the path and the session; the axum
//! wrapper lives in `user_auth::middleware`.

use crate::session::Session;

/// Pages reachable without logging in
pub const UNRESTRICTED_PATHS: &[&str] = &["/login", "/"];

/// Internal assets (stylesheet, health, API document), always public
pub const INTERNAL_PREFIX: &str = "/_authgate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Location of the login page to send the client to
    Redirected(String),
}

pub fn is_unrestricted(path: &str) -> bool {
    UNRESTRICTED_PATHS.contains(&path) || is_internal(path)
}

fn is_internal(path: &str) -> bool {
    path.strip_prefix(INTERNAL_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn evaluate(path: &str, session: &Session) -> GateDecision {
    if session.authenticated || is_unrestricted(path) {
        GateDecision::Allowed
    } else {
        GateDecision::Redirected(login_location(path))
    }
}

/// `/login?redirect_to=<path>`
pub fn login_location(path: &str) -> String {
    format!("/login?redirect_to={}", path)
}

/// Post-login destination: only local paths are honoured.
///
/// The value ends up in a `Location` header verbatim, so it must be
/// visible ASCII: decoded control characters or non-ASCII text fall back
/// to `/` like any off-site target.
pub fn sanitize_redirect(target: Option<&str>) -> &str {
    match target {
        Some(t) if is_local_path(t) => t,
        _ => "/",
    }
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && target.bytes().all(|b| b.is_ascii_graphic())
}
