//! Gated data page and the bearer-token relay to the backend API.

use crate::{
    front::{views, FrontState},
    session::{self, USER_TOKEN_KEY},
};
use axum::{
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use tracing::{error, info};

pub async fn post_data() -> Response {
    views::post_data().into_response()
}

/// Relay one call to the API with the session's bearer token. The API's
/// answer only steers the redirect; its body is logged, never rendered.
pub async fn post_data_send(
    Extension(state): Extension<FrontState>,
    headers: HeaderMap,
) -> Response {
    let token = match session::session_id_from_headers(&headers) {
        Some(session_id) => state.sessions.get(&session_id, USER_TOKEN_KEY).await,
        None => None,
    };

    let Some(token) = token else {
        return Redirect::to("/Home/PostData").into_response();
    };

    let url = match state.api_base_url.join("TestAuth") {
        Ok(url) => url,
        Err(err) => {
            error!("invalid API relay URL: {err}");
            return Redirect::to("/Home/PostData").into_response();
        }
    };

    match state.http.get(url).bearer_auth(&token).send().await {
        Ok(response) => {
            if response.status().is_success() {
                match response.text().await {
                    Ok(body) => info!("API call succeeded: {body}"),
                    Err(err) => error!("failed to read API response: {err}"),
                }
            } else {
                error!("API call failed: {}", response.status());
            }
            Redirect::to("/Home/Index").into_response()
        }
        Err(err) => {
            error!("API call error: {err}");
            Redirect::to("/Home/PostData").into_response()
        }
    }
}
