//! Shared utility functions.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Runs of characters that are neither word characters nor CJK ideographs.
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\x{4E00}-\x{9FFF}]+").unwrap());

/// Lower-case `s` and collapse every run of non-word, non-CJK characters
/// into a single `-`, trimming hyphens at both ends.
///
/// "Hello, World! 测试" -> "hello-world-测试"
pub fn slug_words(s: &str) -> String {
    NON_SLUG_RE
        .replace_all(&s.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Remove every markup tag from an HTML fragment, keeping the text between them.
///
/// "<p>Hello <em>there</em></p>" -> "Hello there"
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Decode the handful of entities HTML renderers emit for text content.
///
/// `&amp;` is decoded last so "&amp;lt;" stays "&lt;".
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Truncate to at most `max` characters (not bytes).
///
/// Returns the truncated string and whether anything was cut off.
pub fn truncate_chars(s: &str, max: usize) -> (&str, bool) {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => (&s[..byte_idx], true),
        None => (s, false),
    }
}
