use crate::{
    front::{views, FrontState},
    session::{self, USER_EMAIL_KEY},
};
use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension,
};

pub async fn index(Extension(state): Extension<FrontState>, headers: HeaderMap) -> Response {
    let email = match session::session_id_from_headers(&headers) {
        Some(session_id) => state.sessions.get(&session_id, USER_EMAIL_KEY).await,
        None => None,
    };

    views::index(email.as_deref()).into_response()
}

pub async fn error_page(headers: HeaderMap) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("none");

    views::error(request_id).into_response()
}
