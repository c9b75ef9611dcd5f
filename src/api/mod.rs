//! Backend API service, authenticated by provider-verified bearer tokens.

pub mod auth;
pub mod handlers;
// OpenAPI document and its route live in openapi.rs.
mod openapi;

pub use openapi::openapi;

use crate::firebase::TokenVerifier;
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

/// Shared API-service context.
#[derive(Clone)]
pub struct ApiState {
    pub verifier: Arc<dyn TokenVerifier>,
    /// Provider REST base, reported by `/health`.
    pub identity_url: String,
}

/// API routes; everything except `/health` and `/openapi.json` sits behind
/// the bearer gate.
#[must_use]
pub fn router(state: ApiState) -> Router {
    let protected = Router::new()
        .route("/TestAuth", get(handlers::test_auth::test_auth))
        .route_layer(middleware::from_fn(auth::require_bearer));

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/openapi.json", get(openapi::serve))
        .merge(protected)
        .layer(Extension(state))
}

/// Start the API server.
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn new(port: u16, state: ApiState) -> Result<()> {
    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("API listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
