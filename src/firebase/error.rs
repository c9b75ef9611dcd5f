//! Provider error surface and reason-code classification.

use regex::Regex;
use thiserror::Error;

/// Failure reported by the identity provider or the transport below it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with an error payload.
    #[error("identity provider rejected the request: {raw}")]
    Rejected { raw: String },
    /// The request never produced a provider answer.
    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// Classify this failure; total, never panics.
    #[must_use]
    pub fn reason(&self) -> Reason {
        match self {
            Self::Rejected { raw } => classify(raw),
            Self::Transport(_) => Reason::Unknown,
        }
    }
}

/// Machine-readable reason extracted from a raw provider error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    EmailExists,
    InvalidEmail,
    InvalidCredentials,
    Unknown,
}

/// Total classification over raw provider error text: any input, parseable
/// or not, maps to exactly one `Reason`.
///
/// The provider wraps failures in a JSON error envelope whose outer `message`
/// field carries the reason code. The nested `errors[].message` entries can
/// repeat a different code, so only the first match counts; the outer field
/// always precedes the nested ones in the payload.
#[must_use]
pub fn classify(raw: &str) -> Reason {
    match extract_reason_code(raw).as_deref() {
        Some("EMAIL_EXISTS") => Reason::EmailExists,
        Some("INVALID_EMAIL") => Reason::InvalidEmail,
        Some(
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED",
        ) => Reason::InvalidCredentials,
        _ => Reason::Unknown,
    }
}

fn extract_reason_code(raw: &str) -> Option<String> {
    let pattern = Regex::new(r#""message"\s*:\s*"([^"]*)""#).ok()?;
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().to_string())
}
