//! Home and login pages

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::super::gate::sanitize_redirect;
use super::super::views;
use crate::session::SessionContext;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

/// GET /
pub async fn home(Extension(ctx): Extension<SessionContext>) -> Html<String> {
    Html(views::home_page(ctx.session.user()))
}

/// GET /login
///
/// Logged-in visitors go straight back to the home page.
pub async fn login_page(
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<LoginQuery>,
) -> Response {
    if ctx.session.authenticated {
        return Redirect::to("/").into_response();
    }
    let redirect_to = sanitize_redirect(query.redirect_to.as_deref());
    Html(views::login_page(redirect_to, "", None)).into_response()
}

/// Unknown paths; only reached by logged-in clients, the gate redirects
/// everyone else.
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>"))
}
