//! Runtime configuration for the usage client.
//!
//! Everything is supplied through environment variables (with `.env` support
//! in the binary for development convenience). Credentials are intentionally
//! allowed to be empty at load time: missing credentials are a configuration
//! error surfaced on the first login attempt, before any request goes out.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://loping151.com:9151";

/// Default bound on each network call. The upstream gives no latency
/// guarantee, so an unresponsive connection must not hang a query forever.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Lifetime of a login cookie (1 hour).
const SESSION_TTL: Duration = Duration::from_secs(3600);

/// Lifetime of a fetched usage page (1 minute).
const PAGE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Login account for the upstream dashboard.
    pub account: String,
    /// Login password for the upstream dashboard.
    pub password: String,

    /// The only requester id allowed to run the usage command.
    pub master_id: String,

    /// Scheme/host/port of the upstream, without a trailing slash.
    pub base_url: String,

    /// Bound on each login/fetch network call.
    pub timeout: Duration,

    /// How long a login cookie is reused before logging in again.
    pub session_ttl: Duration,

    /// How long a fetched page body is served from cache.
    pub page_ttl: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            password: String::new(),
            master_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            session_ttl: SESSION_TTL,
            page_ttl: PAGE_TTL,
        }
    }
}

impl BotConfig {
    /// Build a configuration from the environment.
    ///
    /// Recognized variables: `USAGE_ACCOUNT`, `USAGE_PASSWORD`,
    /// `USAGE_MASTER_ID`, `USAGE_BASE_URL`, `USAGE_TIMEOUT_SECS`.
    /// Unset variables keep their defaults; a malformed timeout is logged
    /// and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("USAGE_ACCOUNT") {
            config.account = v;
        }
        if let Ok(v) = std::env::var("USAGE_PASSWORD") {
            config.password = v;
        }
        if let Ok(v) = std::env::var("USAGE_MASTER_ID") {
            config.master_id = v;
        }
        if let Ok(v) = std::env::var("USAGE_BASE_URL") {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = std::env::var("USAGE_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => log::warn!("Config: invalid USAGE_TIMEOUT_SECS {:?}: {}", v, e),
            }
        }

        config
    }

    /// Whether both credential fields are present.
    pub fn has_credentials(&self) -> bool {
        !self.account.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.page_ttl, Duration::from_secs(60));
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_has_credentials_requires_both_fields() {
        let mut config = BotConfig {
            account: "alice".to_string(),
            ..BotConfig::default()
        };
        assert!(!config.has_credentials());

        config.password = "hunter2".to_string();
        assert!(config.has_credentials());
    }
}
