//! Login and the cached session cookie.
//!
//! The upstream authenticates with a form POST and answers a raw 302 whose
//! `Set-Cookie` header carries the session token. The 302 itself is the
//! success signal, so the HTTP client must not follow redirects; a 200 here
//! means the login page was re-rendered, i.e. rejected credentials.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, SET_COOKIE};

use crate::config::BotConfig;
use crate::error::QueryError;

/// Cookie token name issued by the upstream on a successful login.
const SESSION_COOKIE_NAME: &str = "session_user";

/// Cache for the login cookie.
///
/// Holds at most one cookie at a time; a successful login replaces the
/// previous one wholesale. A failed login never touches the cache, so an
/// error here cannot destroy a still-valid cookie.
pub struct SessionCache {
    cookie: Option<String>,
    cached_at: Option<Instant>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cookie: None,
            cached_at: None,
            ttl,
        }
    }

    /// Get the cached cookie if still valid.
    pub fn get(&self) -> Option<&str> {
        match (&self.cookie, self.cached_at) {
            (Some(cookie), Some(cached_at)) => {
                if cached_at.elapsed() < self.ttl {
                    Some(cookie.as_str())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Replace the cached cookie and restart its lifetime.
    pub fn set(&mut self, cookie: String) {
        self.cookie = Some(cookie);
        self.cached_at = Some(Instant::now());
    }
}

/// Log in and return the `session_user=<token>` cookie pair.
///
/// Does not touch any cache; the caller stores the result on success.
/// Fails without a network call when credentials are not configured.
pub async fn login(http: &reqwest::Client, config: &BotConfig) -> Result<String, QueryError> {
    if !config.has_credentials() {
        return Err(QueryError::MissingCredentials);
    }

    let url = format!("{}/login", config.base_url);
    let response = http
        .post(&url)
        .form(&[
            ("username", config.account.as_str()),
            ("password", config.password.as_str()),
        ])
        .send()
        .await?;

    let status = response.status().as_u16();
    if status != 302 {
        log::warn!("Login: expected 302, got {}", status);
        return Err(QueryError::LoginRejected(status));
    }

    let cookie = session_cookie_from_headers(response.headers())?;
    log::info!("Login: obtained fresh session cookie");
    Ok(cookie)
}

/// Pull the `session_user=<token>` pair out of the login response headers.
/// Cookie attributes such as `Path` or `HttpOnly` are discarded; only the
/// `name=value` pair is kept for replay on the usage request.
fn session_cookie_from_headers(headers: &HeaderMap) -> Result<String, QueryError> {
    let mut saw_set_cookie = false;

    for value in headers.get_all(SET_COOKIE) {
        saw_set_cookie = true;
        let Ok(value) = value.to_str() else { continue };
        if let Some(cookie) = extract_session_token(value) {
            return Ok(cookie);
        }
    }

    if saw_set_cookie {
        Err(QueryError::MissingSessionCookie)
    } else {
        Err(QueryError::MissingCookie)
    }
}

/// `"session_user=abc; Path=/"` -> `"session_user=abc"`.
fn extract_session_token(header: &str) -> Option<String> {
    for (start, _) in header.match_indices(SESSION_COOKIE_NAME) {
        let rest = &header[start..];
        let end = rest.find(';').unwrap_or(rest.len());
        let token = rest[..end].trim();
        // Require an actual `name=value` pair, not a bare mention of the name.
        let value = token
            .strip_prefix(SESSION_COOKIE_NAME)
            .and_then(|t| t.strip_prefix('='));
        match value {
            Some(v) if !v.is_empty() => return Some(token.to_string()),
            _ => continue,
        }
    }
    None
}
