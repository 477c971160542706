//! Internal assets served under `/_authgate`

use std::sync::Arc;

use axum::{Json, extract::State, http::header, response::IntoResponse};

use super::super::openapi::ApiDoc;
use super::super::state::AppState;
use super::super::views::STYLESHEET;

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

pub async fn openapi_json(State(state): State<Arc<AppState>>) -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::with_cookie_name(state.cookies.name()))
}
