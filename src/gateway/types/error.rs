//! Handler error type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::{ApiResponse, error_codes};

/// Errors surfaced by JSON handlers
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Unauthenticated => error_codes::AUTH_REQUIRED,
            Self::UserNotFound => error_codes::USER_NOT_FOUND,
            Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // Internal details stay in the log
        let msg = match &self {
            Self::Internal(e) => {
                tracing::error!("Request failed: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(ApiResponse::<()>::error(self.code(), msg))).into_response()
    }
}
