//! Account page and password reset (gated routes).

use crate::{
    front::{views, FrontState},
    session::{self, USER_EMAIL_KEY},
};
use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::error;

pub async fn account_page() -> Response {
    views::account(None).into_response()
}

/// Reset requires a stored session email; a session without one is a
/// precondition failure, so the provider is never called for it.
pub async fn reset_password(
    Extension(state): Extension<FrontState>,
    headers: HeaderMap,
) -> Response {
    let email = match session::session_id_from_headers(&headers) {
        Some(session_id) => state.sessions.get(&session_id, USER_EMAIL_KEY).await,
        None => None,
    };

    let Some(email) = email else {
        error!("password reset requested without a stored session email");
        return views::account(Some("Problem with your user session")).into_response();
    };

    match state.auth.send_password_reset(&email).await {
        Ok(()) => views::account(Some(
            "An email with instructions to change your password has been sent to your email address",
        ))
        .into_response(),
        Err(err) => {
            error!("password reset failed: {err}");
            views::account(Some("Unknown error")).into_response()
        }
    }
}
