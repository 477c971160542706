//! OpenAPI documentation
//!
//! Describes the JSON endpoints. Served at `/_authgate/openapi.json` and
//! exported by the `export_openapi` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::UserProfile;
use crate::gateway::types::HealthResponse;
use crate::session::cookie::DEFAULT_COOKIE_NAME;

pub const SESSION_SCHEME: &str = "session_cookie";

fn session_cookie_scheme(cookie_name: &str) -> SecurityScheme {
    SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
        cookie_name,
        "Signed session cookie issued by POST /login",
    )))
}

/// Signed session cookie security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components
                .add_security_scheme(SESSION_SCHEME, session_cookie_scheme(DEFAULT_COOKIE_NAME));
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "authgate API",
        version = "0.1.0",
        description = "Session-gated profile endpoint and service health.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::info::get_info,
    ),
    components(
        schemas(
            HealthResponse,
            UserProfile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "User", description = "Logged-in user endpoints (session required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Document whose security scheme names the cookie the server issues
    ///
    /// The derived document (and the exported file) assume the default name.
    pub fn with_cookie_name(cookie_name: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(components) = doc.components.as_mut() {
            components.add_security_scheme(SESSION_SCHEME, session_cookie_scheme(cookie_name));
        }
        doc
    }
}
