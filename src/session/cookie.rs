//! Session cookie codec.
//!
//! The cookie value is the session id, signed (HMAC-SHA256) with a key
//! derived from the configured secret. Unsigned, tampered or malformed
//! cookies decode to `None` and the caller starts a fresh session.

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};

use super::SessionId;

pub const DEFAULT_COOKIE_NAME: &str = "authgate_session";

#[derive(Clone)]
pub struct CookieCodec {
    key: Key,
    name: String,
    secure: bool,
}

impl CookieCodec {
    /// `secret` may have any length; it is stretched to the 64-byte signing key.
    pub fn new(secret: &str, name: impl Into<String>, secure: bool) -> Self {
        let master = Sha512::digest(secret.as_bytes());
        Self {
            key: Key::from(master.as_slice()),
            name: name.into(),
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session id carried by the request, if its signature checks out
    pub fn decode(&self, headers: &HeaderMap) -> Option<SessionId> {
        let jar = SignedCookieJar::from_headers(headers, self.key.clone());
        let cookie = jar.get(&self.name)?;
        cookie.value().parse().ok()
    }

    /// Attach a `Set-Cookie` for `id` to the response
    pub fn attach(&self, id: SessionId, response: Response) -> Response {
        let cookie = Cookie::build((self.name.clone(), id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        let jar = SignedCookieJar::new(self.key.clone()).add(cookie);
        (jar, response).into_response()
    }
}
