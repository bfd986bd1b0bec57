pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the one outbound chat operation the bot performs.
/// Implementing it allows different chat platforms to receive the replies.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Send a message to a channel thread.
    ///
    /// Used to post the review (or a cancellation acknowledgment) as a reply
    /// anchored to the triggering message.
    async fn send_message(&self, channel: &str, thread_ts: &str, text: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// This is trivially cloneable and can be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
