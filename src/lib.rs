//! # Promeni (walk-guide front + API)
//!
//! Two cooperating HTTP services around a delegated identity provider:
//!
//! - the **front** service renders HTML views, signs users in against the
//!   provider, and keeps the returned bearer token in a cookie-keyed
//!   server-side session;
//! - the **api** service authenticates each request by sending the presented
//!   bearer token back to the provider for verification, exposing the
//!   resulting claims as a request-scoped principal.
//!
//! All credential handling (password hashing, token issuance and checking,
//! reset emails) belongs to the provider. This crate only bridges provider
//! tokens into sessions, gates protected routes on those sessions, and
//! classifies provider failures into user-facing outcomes.

pub mod api;
pub mod cli;
pub mod firebase;
pub mod front;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
