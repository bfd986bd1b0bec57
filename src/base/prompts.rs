//! Prompt templates and fixed reply strings.

/// System prompt for the proofreading review.
///
/// The cleaned article markdown is sent separately as the user message.
pub const REVIEW_SYSTEM_PROMPT: &str = r#####"
Please proofread the following Japanese text written in Markdown format.
Check carefully for the following issues:

- Typos or misspellings (including incorrect kanji conversions)
- Incorrect or unnatural grammar, especially particles and conjunctions
- Inconsistent sentence endings (e.g., mixing "です・ます" with "だ・である")
- Redundant, unclear, or awkward phrasing
- Any unnatural expressions that hinder readability or clarity
- You can ignore Markdown syntax and hyperlinks (e.g., [text](https://qiita.com/...)).

If any issues are found, list up to 5 corrections in the following format:

【修正前】
【修正後】
【理由】

You can ignore Markdown syntax (such as #, **, etc.) when checking the content.
I want the output to be in Japanese.
"#####;

/// Posted when the model returned no usable content.
pub const REVIEW_UNAVAILABLE: &str = "レビュー結果が取得できませんでした。";

/// Threaded acknowledgment for a cancel keyword.
pub const CANCEL_ACK: &str = "レビューを中止しました 🛑";
