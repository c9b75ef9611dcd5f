use crate::api::auth::Principal;
use axum::{http::StatusCode, response::IntoResponse, Extension};
use tracing::debug;

#[utoipa::path(
    get,
    path = "/TestAuth",
    responses(
        (status = 200, description = "Caller presented a provider-verified bearer token", body = String),
        (status = 401, description = "Missing, malformed, or unverifiable bearer token")
    ),
    tag = "auth"
)]
// The bearer gate runs before this handler and inserts the principal.
pub async fn test_auth(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    debug!(subject = %principal.subject, "authenticated request");

    (StatusCode::OK, "Hello World")
}
