//! Identity-provider bridge (Firebase Authentication REST endpoints).
//!
//! The provider owns everything sensitive: password hashing, token issuance,
//! token checking, and reset-email delivery. This module only shapes the
//! requests, holds the API key, and surfaces failures as [`ProviderError`]
//! for classification. No cryptography happens here.

mod error;

pub use error::{classify, ProviderError, Reason};

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

/// Public REST base of the provider's identity endpoints.
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Bearer token plus account email returned on sign-in or sign-up.
#[derive(Debug, Clone)]
pub struct AuthLink {
    pub token: String,
    pub email: String,
}

/// Claims subset extracted from a provider-verified token.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub subject: String,
    pub email: String,
}

/// Capability surface the front service uses to reach the identity provider.
///
/// Swappable so handler tests can observe calls without any network.
#[async_trait]
pub trait AuthenticationManager: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthLink, ProviderError>;

    async fn create_account(&self, email: &str, password: &str)
        -> Result<AuthLink, ProviderError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;
}

/// Capability surface the API service uses to verify bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, ProviderError>;
}

/// REST client for the provider; implements both capability traits so the
/// front and API services share one configuration surface.
#[derive(Debug, Clone)]
pub struct FirebaseAuthenticator {
    base_url: Url,
    api_key: SecretString,
    client: Client,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    email: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

impl FirebaseAuthenticator {
    /// Build a provider client for the given REST base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, api_key: SecretString) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| anyhow::anyhow!("Invalid identity provider URL {base_url}: {err}"))?;

        let client = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Provider operation URL: `{base}/{operation}?key={api_key}`.
    fn endpoint(&self, operation: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Rejected {
                raw: format!("identity provider URL cannot be a base: {}", self.base_url),
            })?
            .push(operation);
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());
        Ok(url)
    }

    async fn post_json<T, B>(&self, operation: &str, body: &B) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.endpoint(operation)?;
        let response = self.client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            // An unreadable body still classifies (to Unknown) downstream.
            let raw = response.text().await.unwrap_or_default();

            error!("identity provider call {operation} failed: {status}");
            debug!("provider error payload: {raw}");

            return Err(ProviderError::Rejected { raw });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthenticationManager for FirebaseAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthLink, ProviderError> {
        let response: TokenResponse = self
            .post_json(
                "accounts:signInWithPassword",
                &PasswordCredentials {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        Ok(AuthLink {
            token: response.id_token,
            email: response.email,
        })
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthLink, ProviderError> {
        let response: TokenResponse = self
            .post_json(
                "accounts:signUp",
                &PasswordCredentials {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        Ok(AuthLink {
            token: response.id_token,
            email: response.email,
        })
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let _: serde_json::Value = self
            .post_json(
                "accounts:sendOobCode",
                &OobRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl TokenVerifier for FirebaseAuthenticator {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, ProviderError> {
        let response: LookupResponse = self
            .post_json("accounts:lookup", &LookupRequest { id_token: token })
            .await?;

        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Rejected {
                raw: "token verified but no matching account returned".to_string(),
            })?;

        Ok(VerifiedToken {
            subject: user.local_id,
            email: user.email.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn authenticator() -> Result<FirebaseAuthenticator> {
        Ok(FirebaseAuthenticator::new(
            DEFAULT_IDENTITY_URL,
            SecretString::from("test-key".to_string()),
        )?)
    }

    #[test]
    fn endpoint_appends_operation_and_key() -> Result<()> {
        let authenticator = authenticator()?;
        let url = authenticator.endpoint("accounts:signUp")?;

        assert_eq!(
            url.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=test-key"
        );
        Ok(())
    }

    #[test]
    fn new_rejects_unparseable_url() {
        let result = FirebaseAuthenticator::new("not a url", SecretString::from(String::new()));
        assert!(result.is_err());
    }

    #[test]
    fn password_credentials_serialize_to_provider_field_names() -> Result<()> {
        let value = serde_json::to_value(PasswordCredentials {
            email: "user@example.com",
            password: "Test123",
            return_secure_token: true,
        })?;

        assert_eq!(
            value.get("email").and_then(serde_json::Value::as_str),
            Some("user@example.com")
        );
        assert_eq!(
            value
                .get("returnSecureToken")
                .and_then(serde_json::Value::as_bool),
            Some(true)
        );
        Ok(())
    }

    #[test]
    fn token_response_reads_provider_field_names() -> Result<()> {
        let response: TokenResponse = serde_json::from_value(serde_json::json!({
            "idToken": "firebaseToken",
            "email": "validemail@test.com",
            "refreshToken": "ignored",
            "expiresIn": "3600"
        }))?;

        assert_eq!(response.id_token, "firebaseToken");
        assert_eq!(response.email, "validemail@test.com");
        Ok(())
    }

    #[test]
    fn lookup_response_reads_first_user() -> Result<()> {
        let response: LookupResponse = serde_json::from_value(serde_json::json!({
            "users": [
                { "localId": "abc123", "email": "validemail@test.com" }
            ]
        }))?;

        let user = response.users.into_iter().next().expect("one user");
        assert_eq!(user.local_id, "abc123");
        assert_eq!(user.email.as_deref(), Some("validemail@test.com"));
        Ok(())
    }
}
