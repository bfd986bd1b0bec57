//! Common types and result aliases shared across the crate.

use serde::Deserialize;

/// Crate-wide error type.
pub type Err = anyhow::Error;
/// Crate-wide result type.
pub type Res<T> = Result<T, Err>;
/// Result type for operations that return nothing on success.
pub type Void = Res<()>;

/// Parsed Slack Events API payload, discriminated by its `type` field.
///
/// Anything other than a URL-verification handshake or an event callback is
/// treated as a no-op by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// Slack's URL-verification handshake carrying the challenge to echo.
    UrlVerification {
        /// Challenge string to echo back in the response.
        challenge: String,
    },
    /// A delivered event wrapping one chat message notification.
    EventCallback {
        /// The inner chat event.
        event: ChatEvent,
    },
    /// Any other payload type; treated as a no-op.
    #[serde(other)]
    Other,
}

/// One inbound chat message notification.
///
/// `ts` doubles as the event's unique identifier and the thread anchor for
/// any reply the bot posts.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEvent {
    /// Event timestamp; unique identifier and thread anchor.
    pub ts: String,
    /// Channel the message was posted in.
    pub channel: String,
    /// Message text, if any.
    #[serde(default)]
    pub text: Option<String>,
}

/// Result of offering an event timestamp to the dedup cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting within the TTL window; the marker is now set.
    Fresh,
    /// A marker for this key already exists; the event was redelivered.
    Duplicate,
}

/// A Qiita article identifier extracted from message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    /// 20 lowercase-alphanumeric characters from the article URL path.
    pub id: String,
}

/// What the message text asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A cancel keyword; acknowledge and stop.
    Cancel,
    /// A recognized article link; run the review pipeline.
    Trigger(ArticleRef),
    /// Nothing addressed to the bot.
    Ignore,
}

/// Terminal state of one dispatched webhook request.
///
/// Mapped to an HTTP response exactly once, at the handler boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Signature verification failed.
    Unauthorized,
    /// URL-verification handshake; echo the challenge string.
    Challenge(String),
    /// Redelivered event short-circuited by the dedup cache.
    Duplicate,
    /// Cancel keyword acknowledged.
    Cancelled,
    /// Nothing addressed to the bot.
    Ignored,
    /// Review pipeline ran and the reply was posted.
    Reviewed,
}
