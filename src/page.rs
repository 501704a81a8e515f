//! The cached usage page and its fetch.
//!
//! The page body is cached raw; extraction happens on every query so a
//! cache hit and a fresh fetch go through the same code path afterwards.
//! Page freshness is independent of cookie freshness: one login cookie
//! typically serves many page refetches over its hour of validity.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, COOKIE, USER_AGENT};

use crate::config::BotConfig;
use crate::error::QueryError;

/// The upstream serves the dashboard only to browser-looking clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Cache for the raw usage page body.
pub struct PageCache {
    body: Option<String>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            body: None,
            fetched_at: None,
            ttl,
        }
    }

    /// Get the cached body if still fresh.
    pub fn get(&self) -> Option<&str> {
        match (&self.body, self.fetched_at) {
            (Some(body), Some(fetched_at)) => {
                if fetched_at.elapsed() < self.ttl {
                    Some(body.as_str())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Replace the cached body and restart its freshness window.
    pub fn set(&mut self, body: String) {
        self.body = Some(body);
        self.fetched_at = Some(Instant::now());
    }
}

/// Fetch the usage page with a valid session cookie attached.
///
/// Does not touch any cache; the caller stores the result on success.
pub async fn fetch_usage_page(
    http: &reqwest::Client,
    config: &BotConfig,
    cookie: &str,
) -> Result<String, QueryError> {
    let url = format!("{}/usage", config.base_url);
    let response = http
        .get(&url)
        .header(COOKIE, cookie)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header(ACCEPT, "text/html")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Usage fetch failed with status {}", status.as_u16());
        return Err(QueryError::FetchFailed(status.as_u16()));
    }

    let body = response.text().await?;
    log::debug!("Usage fetch: {} bytes", body.len());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cache_round_trip() {
        let mut cache = PageCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());

        cache.set("<html>usage</html>".to_string());
        assert_eq!(cache.get(), Some("<html>usage</html>"));
    }

    #[test]
    fn test_page_cache_expires() {
        let mut cache = PageCache::new(Duration::ZERO);
        cache.set("<html>usage</html>".to_string());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_page_cache_set_replaces_previous_body() {
        let mut cache = PageCache::new(Duration::from_secs(60));
        cache.set("old".to_string());
        cache.set("new".to_string());
        assert_eq!(cache.get(), Some("new"));
    }
}
