//! Sign-in and logout: the only transitions between anonymous and
//! authenticated sessions.

use super::{sign_in_message, validate_form, AccountForm};
use crate::{
    front::{views, FrontState},
    session::{self, SessionStore, USER_EMAIL_KEY, USER_TOKEN_KEY},
};
use axum::{
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use tracing::{error, info};

pub async fn sign_in_form() -> Response {
    views::sign_in("", None).into_response()
}

/// On success the session owns the returned token and email; on failure the
/// session is left untouched and the form re-renders with one mapped message.
pub async fn sign_in(
    Extension(state): Extension<FrontState>,
    headers: HeaderMap,
    Form(form): Form<AccountForm>,
) -> Response {
    if let Some(message) = validate_form(&form) {
        return views::sign_in(&form.email, Some(message)).into_response();
    }

    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(link) => {
            let session_id = session::session_id_from_headers(&headers)
                .unwrap_or_else(SessionStore::new_id);

            state
                .sessions
                .put(&session_id, USER_TOKEN_KEY, link.token)
                .await;
            state
                .sessions
                .put(&session_id, USER_EMAIL_KEY, link.email)
                .await;

            info!("sign-in succeeded");

            let mut response_headers = HeaderMap::new();
            if let Ok(cookie) =
                session::session_cookie(&session_id, state.sessions.idle_timeout())
            {
                response_headers.insert(SET_COOKIE, cookie);
            }

            (response_headers, Redirect::to("/Home/Index")).into_response()
        }
        Err(err) => {
            let reason = err.reason();
            error!("sign-in failed: {err}");
            views::sign_in(&form.email, Some(sign_in_message(reason))).into_response()
        }
    }
}

/// Clears both session entries unconditionally.
pub async fn log_out(Extension(state): Extension<FrontState>, headers: HeaderMap) -> Redirect {
    if let Some(session_id) = session::session_id_from_headers(&headers) {
        state.sessions.remove(&session_id, USER_TOKEN_KEY).await;
        state.sessions.remove(&session_id, USER_EMAIL_KEY).await;
    }

    Redirect::to("/Home/Index")
}
