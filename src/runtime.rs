//! Runtime services and shared state for the review bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{article::ArticleClient, cache::CacheClient, chat::ChatClient, llm::LlmClient},
    webhook,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the dedup cache, article, LLM,
/// and chat clients. It is designed to be trivially cloneable, allowing it
/// to be passed around (and into axum state) without the need for `Arc` or
/// `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The event dedup cache instance.
    pub cache: CacheClient,
    /// The article source client instance.
    pub article: ArticleClient,
    /// The LLM client instance.
    pub llm: LlmClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the dedup cache.
        let cache = CacheClient::memory();

        // Initialize the article client.
        let article = ArticleClient::qiita(&config)?;

        // Initialize the LLM client.
        let llm = LlmClient::openai(&config);

        // Initialize the chat client.
        let chat = ChatClient::slack(&config)?;

        Ok(Self { config, cache, article, llm, chat })
    }

    pub async fn start(&self) -> Void {
        webhook::serve(self.clone()).await
    }
}
