//! OpenAI chat-completions client for proofreading reviews.
//!
//! One chat-completions call per review: the proofreading instructions as
//! the system message, the cleaned article markdown as the user message, and
//! a low temperature so results stay close to deterministic. The call runs
//! under the configured gateway timeout and is not retried; redelivery from
//! the chat platform is the only retry path the pipeline accepts.

use std::{sync::Arc, time::Duration};

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::instrument;

use crate::base::{config::Config, prompts, types::Res};

use super::{GenericLlmClient, LlmClient};

// Extra methods on `LlmClient` applied by the OpenAI implementation.

impl LlmClient {
    /// Creates a new OpenAI LLM client.
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self::new(Arc::new(client))
    }
}

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    config: Config,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let cfg = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());

        Self {
            client: Client::with_config(cfg),
            config: config.clone(),
        }
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    #[instrument(name = "OpenAiLlmClient::review", skip_all)]
    async fn review(&self, markdown: &str) -> Res<Option<String>> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.config.openai_model.as_str())
            .temperature(self.config.openai_temperature)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default().content(prompts::REVIEW_SYSTEM_PROMPT).build()?.into(),
                ChatCompletionRequestUserMessageArgs::default().content(markdown).build()?.into(),
            ])
            .build()?;

        let budget = Duration::from_secs(self.config.gateway_timeout_secs);

        let response = timeout(budget, self.client.chat().create(request))
            .await
            .map_err(|_| anyhow::anyhow!("Review request timed out after {}s", self.config.gateway_timeout_secs))??;

        Ok(response.choices.into_iter().next().and_then(|choice| choice.message.content))
    }
}
