//! Errors that can occur while logging in or fetching the usage page.
//!
//! Extraction misses are not errors; a statistic whose pattern fails to
//! match degrades to a sentinel value inside an otherwise successful reply
//! (see [`crate::extract`]).

/// Failure of a single usage query. Every variant is terminal for the
/// invocation that hit it; nothing in this crate retries.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Account or password missing from configuration.
    /// Raised before any network call is attempted.
    #[error("account or password not configured")]
    MissingCredentials,

    /// Login did not answer with the expected 302 redirect.
    #[error("login rejected with status {0}")]
    LoginRejected(u16),

    /// Login answered 302 but carried no Set-Cookie header at all.
    #[error("login response carried no Set-Cookie header")]
    MissingCookie,

    /// Set-Cookie was present but held no `session_user` token.
    #[error("no session_user cookie in login response")]
    MissingSessionCookie,

    /// Usage page request came back non-2xx.
    #[error("usage request failed with status {0}")]
    FetchFailed(u16),

    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejected_mentions_status() {
        let err = QueryError::LoginRejected(200);
        assert!(err.to_string().contains("200"));
    }

    #[test]
    fn test_fetch_failed_mentions_status() {
        let err = QueryError::FetchFailed(503);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_missing_credentials_display() {
        let err = QueryError::MissingCredentials;
        assert!(err.to_string().contains("not configured"));
    }
}
