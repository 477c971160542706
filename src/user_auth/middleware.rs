use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::gateway::gate::{self, GateDecision};
use crate::session::{Session, SessionContext};

/// Axum middleware enforcing the access gate.
///
/// Runs inside the session layer; a request without a resolved session is
/// treated as anonymous.
pub async fn access_gate(request: Request<Body>, next: Next) -> Response {
    let anonymous = Session::default();
    let session = request
        .extensions()
        .get::<SessionContext>()
        .map(|ctx| &ctx.session)
        .unwrap_or(&anonymous);

    match gate::evaluate(request.uri().path(), session) {
        GateDecision::Allowed => next.run(request).await,
        GateDecision::Redirected(location) => {
            tracing::debug!(path = request.uri().path(), "Unauthenticated request redirected");
            Redirect::to(&location).into_response()
        }
    }
}
