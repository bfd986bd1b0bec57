#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use mockall::{mock, predicate::eq};
use sha2::Sha256;

use qiita_review_bot::{
    base::{
        config::{Config, ConfigInner},
        prompts,
        types::{Outcome, Res, Void},
    },
    runtime::Runtime,
    service::{
        article::{ArticleClient, GenericArticleClient},
        cache::CacheClient,
        chat::{ChatClient, GenericChatClient},
        llm::{GenericLlmClient, LlmClient},
    },
    webhook,
};

const SIGNING_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
const CHANNEL: &str = "C01TEST";

// Mocks.

mock! {
    pub Article {}

    #[async_trait]
    impl GenericArticleClient for Article {
        async fn fetch_body(&self, id: &str) -> Res<String>;
    }
}

mock! {
    pub Llm {}

    #[async_trait]
    impl GenericLlmClient for Llm {
        async fn review(&self, markdown: &str) -> Res<Option<String>>;
    }
}

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        async fn send_message(&self, channel: &str, thread_ts: &str, text: &str) -> Void;
    }
}

// Helpers.

/// Build a runtime around the given mocks and a real in-memory dedup cache.
///
/// Mocks with no expectations panic on any call, so tests that assert "zero
/// downstream calls" simply pass fresh mocks.
fn runtime_with(article: MockArticle, llm: MockLlm, chat: MockChat) -> Runtime {
    let config = Config {
        inner: Arc::new(ConfigInner {
            qiita_token: "qiita-test".to_string(),
            openai_api_key: "sk-test".to_string(),
            openai_model: "gpt-4".to_string(),
            openai_temperature: 0.2,
            slack_bot_token: "xoxb-test".to_string(),
            slack_signing_secret: SIGNING_SECRET.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            signature_tolerance_secs: 300,
            dedup_ttl_secs: 300,
            gateway_timeout_secs: 5,
        }),
    };

    Runtime {
        config,
        cache: CacheClient::memory(),
        article: ArticleClient::new(Arc::new(article)),
        llm: LlmClient::new(Arc::new(llm)),
        chat: ChatClient::new(Arc::new(chat)),
    }
}

/// Compute the `v0=` signature for a request body.
fn sign(timestamp: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(SIGNING_SECRET.as_bytes()).expect("hmac key");
    mac.update(format!("v0:{timestamp}:{body}").as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

/// Headers for a correctly signed request stamped with the current time.
fn signed_headers(body: &str) -> HeaderMap {
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = sign(&timestamp, body);

    let mut headers = HeaderMap::new();
    headers.insert(webhook::TIMESTAMP_HEADER, timestamp.parse().unwrap());
    headers.insert(webhook::SIGNATURE_HEADER, signature.parse().unwrap());
    headers
}

/// An `event_callback` body for a message with the given text and ts.
fn event_body(ts: &str, text: &str) -> String {
    serde_json::json!({
        "type": "event_callback",
        "event": {
            "ts": ts,
            "channel": CHANNEL,
            "text": text,
        },
    })
    .to_string()
}

// Authentication.

#[tokio::test]
async fn forged_signature_is_rejected_with_no_downstream_calls() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000100", "やめる");

    let timestamp = chrono::Utc::now().timestamp().to_string();
    let mut headers = HeaderMap::new();
    headers.insert(webhook::TIMESTAMP_HEADER, timestamp.parse().unwrap());
    headers.insert(webhook::SIGNATURE_HEADER, "v0=0000000000000000000000000000000000000000000000000000000000000000".parse().unwrap());

    let outcome = webhook::dispatch(&runtime, &headers, body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Unauthorized);
}

#[tokio::test]
async fn missing_signature_headers_are_rejected() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000101", "hello");

    let outcome = webhook::dispatch(&runtime, &HeaderMap::new(), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Unauthorized);
}

#[tokio::test]
async fn stale_timestamp_is_rejected_even_with_a_valid_signature() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000102", "hello");

    let timestamp = (chrono::Utc::now().timestamp() - 600).to_string();
    let signature = sign(&timestamp, &body);
    let mut headers = HeaderMap::new();
    headers.insert(webhook::TIMESTAMP_HEADER, timestamp.parse().unwrap());
    headers.insert(webhook::SIGNATURE_HEADER, signature.parse().unwrap());

    let outcome = webhook::dispatch(&runtime, &headers, body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Unauthorized);
}

// Challenge handshake.

#[tokio::test]
async fn url_verification_echoes_the_challenge() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = serde_json::json!({
        "type": "url_verification",
        "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P",
    })
    .to_string();

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Challenge("3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P".to_string()));
}

// Deduplication.

#[tokio::test]
async fn redelivered_event_short_circuits_as_duplicate() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000103", "ただの雑談");

    let first = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();
    let second = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(first, Outcome::Ignored);
    assert_eq!(second, Outcome::Duplicate);
}

// Classification.

#[tokio::test]
async fn cancel_keyword_posts_exactly_one_acknowledgment() {
    let mut chat = MockChat::new();
    chat.expect_send_message()
        .withf(|channel, thread_ts, text| channel == CHANNEL && thread_ts == "1700000000.000104" && text == prompts::CANCEL_ACK)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), chat);
    let body = event_body("1700000000.000104", "やっぱりやめる");

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
}

#[tokio::test]
async fn cancel_wins_when_the_text_also_carries_an_article_link() {
    let mut chat = MockChat::new();
    chat.expect_send_message().times(1).returning(|_, _, _| Ok(()));

    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), chat);
    let body = event_body("1700000000.000105", "キャンセル https://qiita.com/alice/items/abcdefghij1234567890");

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
}

#[tokio::test]
async fn plain_chatter_is_ignored_without_any_calls() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000106", "おはようございます");

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Ignored);
}

#[tokio::test]
async fn event_without_text_is_ignored() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = serde_json::json!({
        "type": "event_callback",
        "event": { "ts": "1700000000.000107", "channel": CHANNEL },
    })
    .to_string();

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Ignored);
}

// Review pipeline.

#[tokio::test]
async fn article_link_runs_one_fetch_one_review_and_one_threaded_reply() {
    let mut article = MockArticle::new();
    article
        .expect_fetch_body()
        .with(eq("abcdefghij1234567890"))
        .times(1)
        .returning(|_| Ok("本文です。[前回](https://qiita.com/alice/items/aaaaaaaaaabbbbbbbbbb)も参照。".to_string()));

    let mut llm = MockLlm::new();
    llm.expect_review()
        .withf(|markdown| markdown == "本文です。も参照。")
        .times(1)
        .returning(|_| Ok(Some("【修正前】本文です。".to_string())));

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .withf(|channel, thread_ts, text| channel == CHANNEL && thread_ts == "1700000000.000108" && text == "【修正前】本文です。")
        .times(1)
        .returning(|_, _, _| Ok(()));

    let runtime = runtime_with(article, llm, chat);
    let body = event_body("1700000000.000108", "レビューお願いします https://qiita.com/alice/items/abcdefghij1234567890");

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Reviewed);
}

#[tokio::test]
async fn empty_model_output_posts_the_fallback_reply() {
    let mut article = MockArticle::new();
    article.expect_fetch_body().times(1).returning(|_| Ok("本文です。".to_string()));

    let mut llm = MockLlm::new();
    llm.expect_review().times(1).returning(|_| Ok(None));

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .withf(|_, _, text| text == prompts::REVIEW_UNAVAILABLE)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let runtime = runtime_with(article, llm, chat);
    let body = event_body("1700000000.000109", "https://qiita.com/alice/items/abcdefghij1234567890");

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Reviewed);
}

#[tokio::test]
async fn review_gateway_failure_surfaces_as_an_error_with_no_reply() {
    let mut article = MockArticle::new();
    article.expect_fetch_body().times(1).returning(|_| Ok("本文です。".to_string()));

    let mut llm = MockLlm::new();
    llm.expect_review().times(1).returning(|_| Err(anyhow::anyhow!("review request timed out")));

    // No send_message expectation: any reply post would panic the mock.
    let runtime = runtime_with(article, llm, MockChat::new());
    let body = event_body("1700000000.000110", "https://qiita.com/alice/items/abcdefghij1234567890");

    let result = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn fetch_failure_surfaces_as_an_error_with_no_reply() {
    let mut article = MockArticle::new();
    article.expect_fetch_body().times(1).returning(|_| Err(anyhow::anyhow!("404 Not Found")));

    let runtime = runtime_with(article, MockLlm::new(), MockChat::new());
    let body = event_body("1700000000.000111", "https://qiita.com/alice/items/abcdefghij1234567890");

    let result = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await;

    assert!(result.is_err());
}

// Malformed payloads.

#[tokio::test]
async fn unparseable_json_surfaces_as_an_error() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = "not json at all";

    let result = webhook::dispatch(&runtime, &signed_headers(body), body.as_bytes()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unknown_payload_type_is_ignored() {
    let runtime = runtime_with(MockArticle::new(), MockLlm::new(), MockChat::new());
    let body = serde_json::json!({ "type": "app_rate_limited" }).to_string();

    let outcome = webhook::dispatch(&runtime, &signed_headers(&body), body.as_bytes()).await.unwrap();

    assert_eq!(outcome, Outcome::Ignored);
}
