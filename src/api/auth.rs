//! Token verification bridge: `Authorization` header → provider check →
//! request-scoped principal.

use crate::firebase::TokenVerifier;
use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::{debug, error};

use super::ApiState;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified identity for one request, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub email: String,
}

/// Outcome of inspecting one request's credential.
#[derive(Debug)]
pub enum AuthOutcome {
    /// No `Authorization` header at all; another scheme could still apply.
    NoCredential,
    /// Header present but not using the bearer scheme.
    InvalidScheme,
    /// The provider rejected the token (expired, malformed, revoked) or was
    /// unreachable. Reasons are not distinguished further.
    VerificationFailed(String),
    Authenticated(Principal),
}

pub async fn authenticate(headers: &HeaderMap, verifier: &dyn TokenVerifier) -> AuthOutcome {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return AuthOutcome::NoCredential;
    };

    let Ok(value) = header.to_str() else {
        return AuthOutcome::InvalidScheme;
    };

    let Some(token) = value.strip_prefix(BEARER_PREFIX) else {
        return AuthOutcome::InvalidScheme;
    };

    match verifier.verify(token).await {
        Ok(verified) => AuthOutcome::Authenticated(Principal {
            subject: verified.subject,
            email: verified.email,
        }),
        Err(err) => AuthOutcome::VerificationFailed(err.to_string()),
    }
}

/// Gate for protected API routes. Every non-authenticated outcome answers a
/// uniform 401; the reason is logged and never reaches the response body.
pub async fn require_bearer(
    Extension(state): Extension<ApiState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), state.verifier.as_ref()).await {
        AuthOutcome::Authenticated(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        AuthOutcome::NoCredential => {
            debug!("no credential supplied");
            StatusCode::UNAUTHORIZED.into_response()
        }
        AuthOutcome::InvalidScheme => {
            debug!("invalid authorization scheme");
            StatusCode::UNAUTHORIZED.into_response()
        }
        AuthOutcome::VerificationFailed(reason) => {
            error!("token verification failed: {reason}");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{router, ApiState},
        firebase::{ProviderError, VerifiedToken},
    };
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{HeaderValue, Request as HttpRequest},
    };
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct MockVerifier {
        result: Mutex<Option<Result<VerifiedToken, ProviderError>>>,
    }

    impl MockVerifier {
        fn queued(result: Result<VerifiedToken, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
            })
        }
    }

    #[async_trait]
    impl TokenVerifier for MockVerifier {
        async fn verify(&self, _token: &str) -> Result<VerifiedToken, ProviderError> {
            self.result
                .lock()
                .expect("lock")
                .take()
                .expect("verify result not queued")
        }
    }

    fn verified() -> VerifiedToken {
        VerifiedToken {
            subject: "abc123".to_string(),
            email: "validemail@test.com".to_string(),
        }
    }

    fn test_state(verifier: Arc<MockVerifier>) -> ApiState {
        let verifier: Arc<dyn TokenVerifier> = verifier;
        ApiState {
            verifier,
            identity_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_header_is_no_credential() {
        let verifier = MockVerifier::default();
        let outcome = authenticate(&HeaderMap::new(), &verifier).await;
        assert!(matches!(outcome, AuthOutcome::NoCredential));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_invalid() {
        let verifier = MockVerifier::default();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));

        let outcome = authenticate(&headers, &verifier).await;
        assert!(matches!(outcome, AuthOutcome::InvalidScheme));
    }

    #[tokio::test]
    async fn verified_token_becomes_a_principal() {
        let verifier = MockVerifier::queued(Ok(verified()));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer firebaseToken"));

        let outcome = authenticate(&headers, verifier.as_ref()).await;
        match outcome {
            AuthOutcome::Authenticated(principal) => {
                assert_eq!(principal.subject, "abc123");
                assert_eq!(principal.email, "validemail@test.com");
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_auth_with_verified_token_answers_hello_world() -> Result<()> {
        let state = test_state(MockVerifier::queued(Ok(verified())));

        let response = router(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/TestAuth")
                    .header(AUTHORIZATION, "Bearer firebaseToken")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"Hello World");
        Ok(())
    }

    #[tokio::test]
    async fn test_auth_without_header_is_unauthorized() -> Result<()> {
        let state = test_state(Arc::new(MockVerifier::default()));

        let response = router(state)
            .oneshot(HttpRequest::builder().uri("/TestAuth").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_auth_with_wrong_scheme_is_unauthorized() -> Result<()> {
        let state = test_state(Arc::new(MockVerifier::default()));

        let response = router(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/TestAuth")
                    .header(AUTHORIZATION, "Basic dXNlcg==")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_auth_with_rejected_token_is_unauthorized() -> Result<()> {
        let state = test_state(MockVerifier::queued(Err(ProviderError::Rejected {
            raw: "TOKEN_EXPIRED".to_string(),
        })));

        let response = router(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/TestAuth")
                    .header(AUTHORIZATION, "Bearer expiredToken")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        // The rejection reason stays in the logs, never in the body.
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }
}
