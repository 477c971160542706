use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use super::{Session, SessionId};
use crate::gateway::state::AppState;

/// Resolved session of the current request, handed to every handler
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: SessionId,
    pub session: Session,
}

/// Response extension: a handler bound the client to a new session id
/// (login rotates the id); the session layer sends the cookie for it.
#[derive(Debug, Clone, Copy)]
pub struct IssuedSession(pub SessionId);

/// Resolve the session cookie into a [`SessionContext`] request extension.
///
/// Clients without a valid cookie get a fresh id, sent back on the response.
pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let (id, fresh) = match state.cookies.decode(request.headers()) {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };

    let session = state.sessions.get(&id);
    request
        .extensions_mut()
        .insert(SessionContext { id, session });

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<IssuedSession>() {
        Some(IssuedSession(new_id)) => state.cookies.attach(new_id, response),
        None if fresh => state.cookies.attach(id, response),
        None => response,
    }
}
