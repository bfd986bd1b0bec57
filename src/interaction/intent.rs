//! Intent classification for inbound message text.

use std::sync::OnceLock;

use regex::Regex;

use crate::base::types::{ArticleRef, Intent};

static CANCEL_RE: OnceLock<Regex> = OnceLock::new();
static ARTICLE_RE: OnceLock<Regex> = OnceLock::new();

fn cancel_regex() -> &'static Regex {
    CANCEL_RE.get_or_init(|| Regex::new(r"(?i)やめる|キャンセル|stop").expect("Invalid cancel pattern"))
}

fn article_regex() -> &'static Regex {
    ARTICLE_RE.get_or_init(|| Regex::new(r"https://qiita\.com/[^/\s]+/items/([a-z0-9]{20})").expect("Invalid article URL pattern"))
}

/// Classify message text into a cancel request, a review trigger, or noise.
///
/// The cancel check runs first: a message that carries both a cancel keyword
/// and an article link is a cancel. Pure function; absent or empty text is
/// always `Ignore`.
pub fn classify(text: Option<&str>) -> Intent {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Intent::Ignore;
    };

    if cancel_regex().is_match(text) {
        return Intent::Cancel;
    }

    if let Some(caps) = article_regex().captures(text) {
        return Intent::Trigger(ArticleRef { id: caps[1].to_string() });
    }

    Intent::Ignore
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_text_is_ignored() {
        assert_eq!(classify(None), Intent::Ignore);
        assert_eq!(classify(Some("")), Intent::Ignore);
    }

    #[test]
    fn plain_chatter_is_ignored() {
        assert_eq!(classify(Some("おはようございます")), Intent::Ignore);
        assert_eq!(classify(Some("see https://example.com/items/abcdefghij1234567890")), Intent::Ignore);
    }

    #[test]
    fn cancel_keywords_match_in_any_case() {
        assert_eq!(classify(Some("やめる")), Intent::Cancel);
        assert_eq!(classify(Some("キャンセルして")), Intent::Cancel);
        assert_eq!(classify(Some("please STOP")), Intent::Cancel);
    }

    #[test]
    fn article_link_triggers_with_the_extracted_id() {
        let intent = classify(Some("レビューお願いします https://qiita.com/alice/items/abcdefghij1234567890"));

        assert_eq!(
            intent,
            Intent::Trigger(ArticleRef {
                id: "abcdefghij1234567890".to_string()
            })
        );
    }

    #[test]
    fn cancel_wins_over_a_trigger_in_the_same_text() {
        let intent = classify(Some("やめる https://qiita.com/alice/items/abcdefghij1234567890"));

        assert_eq!(intent, Intent::Cancel);
    }

    #[test]
    fn short_or_uppercase_ids_do_not_trigger() {
        assert_eq!(classify(Some("https://qiita.com/alice/items/tooshort")), Intent::Ignore);
        assert_eq!(classify(Some("https://qiita.com/alice/items/ABCDEFGHIJ1234567890")), Intent::Ignore);
    }

    #[test]
    fn bare_profile_links_do_not_trigger() {
        assert_eq!(classify(Some("https://qiita.com/alice")), Intent::Ignore);
    }
}
