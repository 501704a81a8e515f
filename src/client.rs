//! The usage client: one shared HTTP client plus both caches.

use reqwest::redirect::Policy;
use tokio::sync::Mutex;

use crate::config::BotConfig;
use crate::error::QueryError;
use crate::extract::{self, UsageReport};
use crate::page::{self, PageCache};
use crate::session::{self, SessionCache};

/// Caching client for the upstream usage dashboard.
///
/// One instance per configured account, owning the session-cookie cache and
/// the page cache. Both caches live behind a single lock spanning the whole
/// check-then-refresh sequence, so concurrent cache misses collapse into one
/// upstream call instead of racing each other.
pub struct UsageClient {
    http: reqwest::Client,
    config: BotConfig,
    caches: Mutex<Caches>,
}

struct Caches {
    session: SessionCache,
    page: PageCache,
}

impl UsageClient {
    /// Build a client for the given configuration.
    ///
    /// Redirects stay disabled for the client's whole lifetime: the login
    /// 302 is itself the success signal and must not be followed (see
    /// [`session::login`]).
    pub fn new(config: BotConfig) -> Self {
        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        let caches = Mutex::new(Caches {
            session: SessionCache::new(config.session_ttl),
            page: PageCache::new(config.page_ttl),
        });

        Self {
            http,
            config,
            caches,
        }
    }

    /// Whether a requester id matches the configured master.
    /// An unset master id authorizes nobody.
    pub fn is_master(&self, requester_id: &str) -> bool {
        !self.config.master_id.is_empty() && requester_id == self.config.master_id
    }

    /// Raw usage page, served from cache within its freshness window.
    ///
    /// On a page miss the session cookie is re-validated first (usually a
    /// cache hit); errors from the login or the fetch propagate unchanged.
    pub async fn usage_page(&self) -> Result<String, QueryError> {
        let mut caches = self.caches.lock().await;

        if let Some(body) = caches.page.get() {
            log::debug!("Usage page served from cache");
            return Ok(body.to_string());
        }

        let cookie = match caches.session.get() {
            Some(cookie) => cookie.to_string(),
            None => {
                let cookie = session::login(&self.http, &self.config).await?;
                caches.session.set(cookie.clone());
                cookie
            }
        };

        let body = page::fetch_usage_page(&self.http, &self.config, &cookie).await?;
        caches.page.set(body.clone());
        Ok(body)
    }

    /// Run one usage query: fetch (or reuse) the page, extract the five
    /// statistics and render the fixed-order report.
    pub async fn query_usage(&self) -> Result<String, QueryError> {
        let body = self.usage_page().await?;
        let report = extract::extract(&body);
        Ok(render_report(&report))
    }
}

/// Fixed-order, fixed-label rendering of the five statistics.
fn render_report(report: &UsageReport) -> String {
    [
        "Usage statistics:".to_string(),
        format!("Total requests: {}", report.total_requests),
        format!("Used traffic: {}", report.used_traffic),
        format!("Quota: {}", report.quota),
        format!("Expires: {}", report.expire_time),
        format!("Success rate today: {}", report.success_rate),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NOT_FOUND;

    #[test]
    fn test_render_report_fixed_order() {
        let report = UsageReport {
            total_requests: "12345".to_string(),
            used_traffic: "1.5 GB".to_string(),
            quota: "10 GB".to_string(),
            expire_time: "2026-12-31".to_string(),
            success_rate: "99.2%".to_string(),
        };

        let rendered = render_report(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Usage statistics:",
                "Total requests: 12345",
                "Used traffic: 1.5 GB",
                "Quota: 10 GB",
                "Expires: 2026-12-31",
                "Success rate today: 99.2%",
            ]
        );
    }

    #[test]
    fn test_render_report_keeps_sentinel_fields() {
        let report = UsageReport {
            total_requests: "42".to_string(),
            used_traffic: NOT_FOUND.to_string(),
            quota: NOT_FOUND.to_string(),
            expire_time: NOT_FOUND.to_string(),
            success_rate: NOT_FOUND.to_string(),
        };

        let rendered = render_report(&report);
        assert_eq!(rendered.lines().count(), 6);
        assert!(rendered.contains("Total requests: 42"));
        assert_eq!(rendered.matches(NOT_FOUND).count(), 4);
    }

    #[test]
    fn test_is_master_exact_match_only() {
        let client = UsageClient::new(BotConfig {
            master_id: "10001".to_string(),
            ..BotConfig::default()
        });
        assert!(client.is_master("10001"));
        assert!(!client.is_master("10002"));
        assert!(!client.is_master(""));
    }

    #[test]
    fn test_unset_master_authorizes_nobody() {
        let client = UsageClient::new(BotConfig::default());
        assert!(!client.is_master(""));
        assert!(!client.is_master("10001"));
    }
}
