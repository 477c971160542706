//! Profile of the logged-in user

use std::sync::Arc;

use axum::{Extension, Json, extract::State};

use super::super::state::AppState;
use super::super::types::WebError;
use crate::account::UserProfile;
use crate::session::SessionContext;

/// Current user's profile
///
/// GET /info
#[utoipa::path(
    get,
    path = "/info",
    responses(
        (status = 200, description = "Profile of the session's user", body = UserProfile),
        (status = 303, description = "Not logged in, redirected to /login"),
        (status = 404, description = "Session user no longer exists")
    ),
    security(("session_cookie" = [])),
    tag = "User"
)]
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<UserProfile>, WebError> {
    let username = ctx.session.user().ok_or(WebError::Unauthenticated)?;

    let user = state
        .user_auth
        .current_user(username)
        .await?
        .ok_or(WebError::UserNotFound)?;

    Ok(Json(user.profile()))
}
