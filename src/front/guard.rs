//! Session gate for protected front routes.

use crate::session::{self, USER_TOKEN_KEY};
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::debug;

use super::FrontState;

/// Short-circuit with 401 before the handler runs unless the session holds a
/// non-empty bearer token. Consults only the current request's session.
pub async fn require_session(
    Extension(state): Extension<FrontState>,
    request: Request,
    next: Next,
) -> Response {
    let token = match session::session_id_from_headers(request.headers()) {
        Some(session_id) => state.sessions.get(&session_id, USER_TOKEN_KEY).await,
        None => None,
    };

    match token {
        Some(token) if !token.is_empty() => next.run(request).await,
        _ => {
            debug!("request without a session token rejected");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}
