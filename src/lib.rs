//! Caching authenticated client for a proxy usage dashboard.
//!
//! This crate logs in to the upstream with configured credentials, keeps the
//! resulting session cookie for an hour, fetches the usage page under that
//! cookie, keeps the raw page for a minute, and extracts five named
//! statistics from the page markup for a single authorized requester.
//!
//! Layers, inner to outer:
//! - [`session`]: login and the cached session cookie
//! - [`page`]: the cached raw page and its fetch
//! - [`extract`]: pure pattern extraction into a [`UsageReport`]
//! - [`client`]: [`UsageClient`] tying the caches to one HTTP client
//! - [`handler`]: command trigger + authorization gate for the host framework

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod page;
pub mod session;

pub use client::UsageClient;
pub use config::BotConfig;
pub use error::QueryError;
pub use extract::{extract, UsageReport, NOT_FOUND};
pub use handler::{handle_message, COMMAND};
