use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::service::{AuthError, RegistrationError};
use crate::gateway::gate::sanitize_redirect;
use crate::gateway::state::AppState;
use crate::gateway::views::{self, Notice};
use crate::session::{IssuedSession, SessionContext, SessionId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    #[default]
    Login,
    Register,
}

/// Body of the login / register form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub action: FormAction,
    pub redirect_to: Option<String>,
}

/// Log in or register
///
/// POST /login
///
/// On success the client is bound to a freshly issued session id marked as
/// authenticated, then redirected to `redirect_to`. Failures re-render the
/// form with a notice.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Form(form): Form<LoginForm>,
) -> Response {
    let redirect_to = sanitize_redirect(form.redirect_to.as_deref()).to_string();

    let outcome = match form.action {
        FormAction::Login => state
            .user_auth
            .login(&form.username, &form.password)
            .await
            .map_err(|e| match e {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, Notice::InvalidCredentials)
                }
                AuthError::Internal(e) => {
                    tracing::error!("Login failed: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, Notice::Unavailable)
                }
            }),
        FormAction::Register => state
            .user_auth
            .register(&form.username, &form.password)
            .await
            .map_err(|e| match e {
                RegistrationError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, Notice::InvalidLength)
                }
                RegistrationError::UsernameTaken => (StatusCode::CONFLICT, Notice::UsernameTaken),
                RegistrationError::Internal(e) => {
                    tracing::error!("Registration failed: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, Notice::Unavailable)
                }
            }),
    };

    match outcome {
        Ok(user) => {
            // New id on privilege change; the old one is dropped
            let new_id = SessionId::new();
            state.sessions.clear(&ctx.id);
            state.sessions.set_authenticated(&new_id, &user.username);

            let mut response = Redirect::to(&redirect_to).into_response();
            response.extensions_mut().insert(IssuedSession(new_id));
            response
        }
        Err((status, notice)) => (
            status,
            Html(views::login_page(&redirect_to, &form.username, Some(notice))),
        )
            .into_response(),
    }
}

/// Log out
///
/// POST /logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Redirect {
    if let Some(username) = ctx.session.user() {
        tracing::info!(username = %username, "User logged out");
    }
    state.sessions.clear(&ctx.id);
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let form: LoginForm = parse_form("username=alice&password=secret1");
        assert_eq!(form.action, FormAction::Login);
        assert!(form.redirect_to.is_none());

        let form: LoginForm = parse_form("action=register&redirect_to=%2Finfo");
        assert_eq!(form.action, FormAction::Register);
        assert_eq!(form.username, "");
        assert_eq!(form.redirect_to.as_deref(), Some("/info"));
    }

    fn parse_form(body: &str) -> LoginForm {
        // Same deserializer axum's `Form` uses, reached through a query string
        let uri: axum::http::Uri = format!("/login?{body}").parse().unwrap();
        axum::extract::Query::<LoginForm>::try_from_uri(&uri).unwrap().0
    }
}
