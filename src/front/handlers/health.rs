use crate::front::FrontState;
use crate::GIT_COMMIT_HASH;
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    active_sessions: usize,
}

// axum handler for front health
pub async fn health(Extension(state): Extension<FrontState>) -> impl IntoResponse {
    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.active_count().await,
    };

    let mut headers = HeaderMap::new();
    match x_app_header(&health) {
        Ok(value) => {
            headers.insert("X-App", value);
        }
        Err(err) => {
            error!("Failed to build X-App header: {}", err);
        }
    }

    (StatusCode::OK, headers, Json(health))
}

fn x_app_header(health: &Health) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    format!("{}:{}:{}", health.name, health.version, short_hash).parse::<HeaderValue>()
}
