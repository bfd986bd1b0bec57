//! Review orchestration: fetch → strip links → review → threaded reply.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, instrument};

use crate::{
    base::{
        prompts,
        types::{ArticleRef, Void},
    },
    service::{article::ArticleClient, chat::ChatClient, llm::LlmClient},
};

static ARTICLE_LINK_RE: OnceLock<Regex> = OnceLock::new();

fn article_link_regex() -> &'static Regex {
    ARTICLE_LINK_RE.get_or_init(|| Regex::new(r"(?i)\[.*?\]\(https://qiita\.com/.+?/items/[a-z0-9]{20}\)").expect("Invalid article link pattern"))
}

/// Remove embedded Qiita article links (`[label](https://qiita.com/.../items/...)`)
/// from markdown. They are noise for the reviewer and must not reach the
/// prompt; all other text passes through unchanged.
pub fn strip_article_links(markdown: &str) -> String {
    article_link_regex().replace_all(markdown, "").into_owned()
}

/// Run the review pipeline for a triggered article.
///
/// Strictly sequential: each step's input depends on the prior step's
/// output. Any failure propagates to the dispatcher without posting a
/// partial reply; no step is retried.
#[instrument(skip_all, fields(article_id = %article.id))]
pub async fn run(article_client: &ArticleClient, llm: &LlmClient, chat: &ChatClient, channel: &str, thread_ts: &str, article: &ArticleRef) -> Void {
    let body = article_client.fetch_body(&article.id).await?;
    let cleaned = strip_article_links(&body);

    info!("Fetched article {} ({} chars after link stripping)", article.id, cleaned.chars().count());

    let review = llm.review(&cleaned).await?.unwrap_or_else(|| prompts::REVIEW_UNAVAILABLE.to_string());

    chat.send_message(channel, thread_ts, &review).await?;

    Ok(())
}
