//! One-shot query runner.
//!
//! Stands in for the chat framework that would normally route the usage
//! command here: loads configuration from the environment, runs a single
//! query and prints the report.

use usage_watch::{BotConfig, UsageClient};

#[tokio::main]
async fn main() {
    // .env is optional; deployments set plain environment variables.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env();
    let client = UsageClient::new(config);

    match client.query_usage().await {
        Ok(report) => println!("{}", report),
        Err(e) => {
            log::error!("Usage query failed: {}", e);
            eprintln!("❌ Query failed: {}", e);
            std::process::exit(1);
        }
    }
}
