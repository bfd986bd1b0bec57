//! Slack Web API chat client.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{ChatClient, GenericChatClient};

/// Slack Web API base URL.
const SLACK_API_BASE: &str = "https://slack.com/api";

// Extra methods on `ChatClient` applied by the Slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Slack client implementation.
#[derive(Clone)]
pub struct SlackChatClient {
    http: reqwest::Client,
    bot_token: String,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(config.gateway_timeout_secs)).build()?;

        Ok(Self {
            http,
            bot_token: config.slack_bot_token.clone(),
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(skip(self, text))]
    async fn send_message(&self, channel: &str, thread_ts: &str, text: &str) -> Void {
        let payload = json!({
            "channel": channel,
            "thread_ts": thread_ts,
            "text": text,
        });

        // Fire-and-forget: transport errors propagate, the response body is
        // not inspected for success.
        self.http
            .post(format!("{SLACK_API_BASE}/chat.postMessage"))
            .bearer_auth(&self.bot_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {e}"))?;

        Ok(())
    }
}
