//! Command entry point: trigger match, authorization gate, reply rendering.
//!
//! This is the seam towards the host chat framework. The framework hands in
//! the requester id and message text; the return value is the reply to send,
//! or `None` when no reply should go out at all.

use crate::client::UsageClient;

/// Exact trigger the host framework routes to this handler.
pub const COMMAND: &str = "#usage";

/// Prefix on the reply when an authorized query fails.
const FAILURE_PREFIX: &str = "❌ Query failed";

/// Handle one inbound message.
///
/// Returns `None` when the text is not exactly the usage command or the
/// requester is not the configured master. Unauthorized attempts are dropped without
/// any reply so the command's existence stays hidden, but they are logged
/// at debug level for auditing. An authorized query that fails gets a
/// visible failure reply, and the error is logged for the operator.
pub async fn handle_message(
    client: &UsageClient,
    requester_id: &str,
    text: &str,
) -> Option<String> {
    if text != COMMAND {
        return None;
    }

    if !client.is_master(requester_id) {
        log::debug!(
            "Dropping usage command from unauthorized requester {}",
            requester_id
        );
        return None;
    }

    match client.query_usage().await {
        Ok(report) => Some(report),
        Err(e) => {
            log::error!("Usage query failed: {}", e);
            Some(format!("{}: {}", FAILURE_PREFIX, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;

    fn client_with_master(master_id: &str) -> UsageClient {
        UsageClient::new(BotConfig {
            master_id: master_id.to_string(),
            ..BotConfig::default()
        })
    }

    #[tokio::test]
    async fn test_non_command_text_gets_no_reply() {
        let client = client_with_master("10001");
        assert_eq!(handle_message(&client, "10001", "hello").await, None);
        assert_eq!(handle_message(&client, "10001", "#usage stats").await, None);
    }

    #[tokio::test]
    async fn test_padded_command_is_not_the_trigger() {
        // The trigger is an exact match; even the master gets no reply for
        // a whitespace-padded command.
        let client = client_with_master("10001");
        assert_eq!(handle_message(&client, "10001", " #usage").await, None);
        assert_eq!(handle_message(&client, "10001", "#usage ").await, None);
    }

    #[tokio::test]
    async fn test_unauthorized_requester_gets_silence() {
        // Silence, not a failure message: the reply must be `None` even
        // though an authorized query would have failed on configuration.
        let client = client_with_master("10001");
        assert_eq!(handle_message(&client, "99999", COMMAND).await, None);
    }

    #[tokio::test]
    async fn test_authorized_failure_gets_visible_reply() {
        // Credentials are unset, so the query fails before any network
        // call; the master still gets a visible failure message.
        let client = client_with_master("10001");
        let reply = handle_message(&client, "10001", COMMAND).await.unwrap();
        assert!(reply.starts_with(FAILURE_PREFIX));
        assert!(reply.contains("not configured"));
    }
}
