//! Server-side session store keyed by a browser-presented cookie.
//!
//! Sessions hold a small set of string entries (the provider bearer token and
//! the account email) and expire on a sliding idle timeout. Expiry is the
//! store's own concern: reads evict lazily and a background sweeper keeps the
//! map from accumulating abandoned sessions.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use ulid::Ulid;

pub const SESSION_COOKIE_NAME: &str = "promeni_session";

/// Entry holding the provider-issued bearer token.
pub const USER_TOKEN_KEY: &str = "_UserToken";
/// Entry holding the signed-in account email.
pub const USER_EMAIL_KEY: &str = "_UserEmail";

pub const DEFAULT_IDLE_TIMEOUT_SECONDS: u64 = 7200;

#[derive(Debug)]
struct Entry {
    values: HashMap<String, String>,
    last_seen: Instant,
}

impl Entry {
    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.last_seen.elapsed() >= idle_timeout
    }
}

/// Keyed store with explicit read/write/remove/expire operations.
///
/// Each session id is effectively a single-writer partition; concurrent
/// requests from the same browser race and the last write wins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    idle_timeout: Duration,
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fresh opaque session id for a browser that presented none.
    #[must_use]
    pub fn new_id() -> String {
        Ulid::new().to_string()
    }

    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Read one entry; touches the session, evicting it first if idle-expired.
    pub async fn get(&self, session_id: &str, key: &str) -> Option<String> {
        let mut sessions = self.sessions.write().await;

        if sessions
            .get(session_id)
            .is_some_and(|entry| entry.is_expired(self.idle_timeout))
        {
            sessions.remove(session_id);
            return None;
        }

        sessions.get_mut(session_id).and_then(|entry| {
            entry.last_seen = Instant::now();
            entry.values.get(key).cloned()
        })
    }

    /// Write one entry, creating the session if needed.
    pub async fn put(&self, session_id: &str, key: &str, value: String) {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Entry {
                values: HashMap::new(),
                last_seen: Instant::now(),
            });
        entry.last_seen = Instant::now();
        entry.values.insert(key.to_string(), value);
    }

    /// Remove one entry; the session itself stays until it idles out.
    pub async fn remove(&self, session_id: &str, key: &str) {
        if let Some(entry) = self.sessions.write().await.get_mut(session_id) {
            entry.last_seen = Instant::now();
            entry.values.remove(key);
        }
    }

    /// Number of sessions that have not idled out.
    pub async fn active_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(self.idle_timeout))
            .count()
    }

    /// Drop idle-expired sessions; returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let idle_timeout = self.idle_timeout;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(idle_timeout));
        before - sessions.len()
    }

    /// Periodic eviction worker; correctness never depends on it because
    /// reads also expire lazily.
    pub fn spawn_sweeper(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "idle sessions purged");
                }
            }
        });
    }
}

/// Extract the session id presented by the browser, if any.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(COOKIE)?.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME && !val.trim().is_empty() {
            return Some(val.trim().to_string());
        }
    }
    None
}

/// Session cookie for the response. `HttpOnly` stays off: the front's page
/// scripts read the cookie (long-standing behavior carried over as-is).
///
/// # Errors
/// Returns an error if the session id produces an invalid header value.
pub fn session_cookie(
    session_id: &str,
    idle_timeout: Duration,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = idle_timeout.as_secs();
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={session_id}; Path=/; SameSite=Lax; Max-Age={max_age}"
    ))
}
