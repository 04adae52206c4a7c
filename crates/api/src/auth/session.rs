//! Session tokens and cookies.
//!
//! The cookie carries a random token; the database stores only its SHA-256
//! hex digest.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 168;

/// Longest accepted session lifetime in hours (ten years).
pub const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365 * 10;

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "comicsmith_session";

/// Cookie settings for browser sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub expiry_hours: i64,
    /// Add the `Secure` attribute (HTTPS deployments).
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            expiry_hours: DEFAULT_SESSION_EXPIRY_HOURS,
            secure: false,
        }
    }
}

impl SessionConfig {
    /// Read `SESSION_COOKIE_NAME`, `SESSION_EXPIRY_HOURS` and `COOKIE_SECURE`.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let cookie_name = lookup("SESSION_COOKIE_NAME")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let expiry_hours: i64 = lookup("SESSION_EXPIRY_HOURS")
            .map(|s| {
                s.parse()
                    .expect("SESSION_EXPIRY_HOURS must be a valid i64")
            })
            .unwrap_or(DEFAULT_SESSION_EXPIRY_HOURS);
        assert!(
            (1..=MAX_SESSION_EXPIRY_HOURS).contains(&expiry_hours),
            "SESSION_EXPIRY_HOURS must be between 1 and {MAX_SESSION_EXPIRY_HOURS}, got {expiry_hours}"
        );

        let secure = lookup("COOKIE_SECURE")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            cookie_name,
            expiry_hours,
            secure,
        }
    }

    pub fn max_age_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Generate a session token, returning `(plaintext, sha256_hex_hash)`.
///
/// The plaintext goes into the cookie; the hash goes into the database.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `Set-Cookie` value that starts a session.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        config.max_age_secs()
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find the value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
