//! Front service: HTML views over the session-backed auth flows.

pub mod guard;
pub mod handlers;
pub mod views;

use crate::{firebase::AuthenticationManager, session::SessionStore};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;

const SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Shared front-service context: the provider capability, the session store,
/// and the relay client for the backend API.
#[derive(Clone)]
pub struct FrontState {
    pub auth: Arc<dyn AuthenticationManager>,
    pub sessions: SessionStore,
    pub api_base_url: Url,
    pub http: reqwest::Client,
}

impl FrontState {
    /// # Errors
    /// Returns an error if the API base URL is invalid or the relay client
    /// cannot be built.
    pub fn new(
        auth: Arc<dyn AuthenticationManager>,
        sessions: SessionStore,
        api_base_url: &str,
    ) -> Result<Self> {
        let api_base_url = Url::parse(api_base_url)
            .with_context(|| format!("Invalid API base URL: {api_base_url}"))?;

        let http = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build API relay client")?;

        Ok(Self {
            auth,
            sessions,
            api_base_url,
            http,
        })
    }
}

/// Front routes; the account and data pages sit behind the session gate.
#[must_use]
pub fn router(state: FrontState) -> Router {
    let gated = Router::new()
        .route(
            "/Home/AccountPage",
            get(handlers::account::account_page).post(handlers::account::reset_password),
        )
        .route("/Home/PostData", get(handlers::post_data::post_data))
        .route("/Home/PostDataSend", post(handlers::post_data::post_data_send))
        .route_layer(middleware::from_fn(guard::require_session));

    Router::new()
        .route("/", get(handlers::home::index))
        .route("/Home/Index", get(handlers::home::index))
        .route(
            "/Home/SignIn",
            get(handlers::sign_in::sign_in_form).post(handlers::sign_in::sign_in),
        )
        .route("/Home/LogOut", get(handlers::sign_in::log_out))
        .route(
            "/Home/CreateUser",
            get(handlers::create_user::create_user_form).post(handlers::create_user::create_user),
        )
        .route("/Home/Error", get(handlers::home::error_page))
        .route("/health", get(handlers::health::health))
        .merge(gated)
        .layer(Extension(state))
}

/// Start the front server.
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn new(port: u16, state: FrontState) -> Result<()> {
    state
        .sessions
        .spawn_sweeper(Duration::from_secs(SWEEP_INTERVAL_SECONDS));

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

    info!("Front listening on [::]:{}", port);

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
