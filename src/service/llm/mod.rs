pub mod openai;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// This trait defines the one piece of model functionality the bot needs.
/// Implementing it allows different LLM providers to be used for reviews.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Request a proofreading review of the given markdown text.
    ///
    /// Returns the model's review text, or `None` when the completion came
    /// back without usable content. The caller decides what to substitute.
    async fn review(&self, markdown: &str) -> Res<Option<String>>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
