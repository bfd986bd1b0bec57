//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default OpenAI model used for reviews.
fn default_openai_model() -> String {
    "gpt-4".to_string()
}

/// Default sampling temperature for the review model.
///
/// Kept low so repeated reviews of the same article stay close to deterministic.
fn default_openai_temperature() -> f32 {
    0.2
}

/// Default webhook listen address.
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default replay-protection window for request signatures, in seconds.
fn default_signature_tolerance_secs() -> u64 {
    300
}

/// Default TTL for event dedup markers, in seconds.
fn default_dedup_ttl_secs() -> u64 {
    300
}

/// Default per-call budget for outbound gateway requests, in seconds.
fn default_gateway_timeout_secs() -> u64 {
    30
}

/// Configuration for the review bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared inner configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Deserialized configuration values for the review bot.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Qiita API v2 access token (`QIITA_TOKEN`).
    pub qiita_token: String,
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// OpenAI model to use for reviews (`OPENAI_MODEL`).
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Sampling temperature for the review model (`OPENAI_TEMPERATURE`).
    /// Value between 0 and 2. Higher values like 0.8 make output more random,
    /// while lower values like 0.2 make it more focused and deterministic.
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,
    /// Slack bot token used for `chat.postMessage` (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack signing secret used to verify inbound webhooks (`SLACK_SIGNING_SECRET`).
    pub slack_signing_secret: String,
    /// Address the webhook server binds to (`BIND_ADDR`).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Maximum allowed age of a request timestamp, in seconds
    /// (`SIGNATURE_TOLERANCE_SECS`). Requests further from the current time
    /// than this, in either direction, fail verification.
    #[serde(default = "default_signature_tolerance_secs")]
    pub signature_tolerance_secs: u64,
    /// Lifetime of an event dedup marker, in seconds (`DEDUP_TTL_SECS`).
    /// Slack redelivers events it believes timed out; a marker within this
    /// window short-circuits the redelivery.
    #[serde(default = "default_dedup_ttl_secs")]
    pub dedup_ttl_secs: u64,
    /// Timeout for each outbound gateway call, in seconds
    /// (`GATEWAY_TIMEOUT_SECS`).
    #[serde(default = "default_gateway_timeout_secs")]
    pub gateway_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables and an optional TOML file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("REVIEW_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.openai_temperature < 0.0 || result.openai_temperature > 2.0 {
            return Err(anyhow::anyhow!("OpenAI temperature must be between 0 and 2."));
        }

        if result.signature_tolerance_secs == 0 {
            return Err(anyhow::anyhow!("Signature tolerance must be at least 1 second."));
        }

        if result.gateway_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Gateway timeout must be at least 1 second."));
        }

        Ok(result)
    }
}
