//! OpenAPI document for the API service.

use axum::response::Json;
use utoipa::OpenApi;

use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(description = "Walk-guide backend API"),
    paths(handlers::test_auth::test_auth, handlers::health::health),
    components(schemas(handlers::health::Health)),
    tags(
        (name = "auth", description = "Bearer-token protected endpoints"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// The generated OpenAPI document.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
