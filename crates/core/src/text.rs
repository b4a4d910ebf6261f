//! Text helpers shared by extraction, translation and layout.
//!
//! Tokenization here defines what a "word" is for the line wrapper: runs of
//! Unicode whitespace separate tokens and are never themselves part of one.

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching one run of whitespace (Unicode-aware).
static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Split `text` into whitespace-delimited tokens, dropping empty ones.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    WHITESPACE_RUN_REGEX.split(text).filter(|t| !t.is_empty())
}

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    tokens(text).collect::<Vec<_>>().join(" ")
}

/// Return at most the first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so the cut never lands inside a
/// multi-byte character.
pub fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Split a translated `title + "\n\n" + body` payload back into its parts.
///
/// The title is the first line. An empty translated title falls back to
/// `original_title`, and an empty translated body falls back to
/// `original_body`.
pub fn split_translated(
    translated: &str,
    original_title: &str,
    original_body: &str,
) -> (String, String) {
    let (head, rest) = translated.split_once('\n').unwrap_or((translated, ""));

    let title = match head.trim() {
        "" => original_title.trim(),
        t => t,
    };
    let body = match rest.trim() {
        "" => original_body,
        b => b,
    };

    (title.to_string(), body.to_string())
}
