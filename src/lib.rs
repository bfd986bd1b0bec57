//! Library root for `qiita-review-bot`.
//!
//! Qiita-review-bot is an OpenAI-powered proofreading assistant for Slack
//! designed to:
//! - Receive Slack Events API webhooks and verify their request signatures
//! - Deduplicate redelivered events with a short-TTL marker
//! - Fetch a linked Qiita article and strip embedded article links
//! - Request a proofreading review from an LLM
//! - Post the review back as a threaded reply
//!
//! The bot integrates with Slack for chat, Qiita for article content, and
//! OpenAI for the reviews. The architecture is built around extensible
//! traits that allow for different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod webhook;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the review-bot runtime:
/// - Creates the runtime context with cache, article, LLM, and chat clients
/// - Binds the webhook server and serves inbound events
pub async fn start(config: Config) -> Void {
    info!("Starting qiita-review-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
