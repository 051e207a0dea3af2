//! Heading anchors and table of contents extraction.
//!
//! Works on the HTML fragment produced by either backend. Only `<h2>` and
//! `<h3>` take part: `<h1>` is the post title, deeper levels are too fine
//! for the sidebar.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::util::{decode_entities, slug_words, strip_tags};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(h[23])(\s[^>]*)?>(.*?)</h[23]>").unwrap());

static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sid\s*=\s*["']([^"']*)["']"#).unwrap());

/// Heading level of a table of contents entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TocLevel {
    H2,
    H3,
}

impl TocLevel {
    fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("h3") {
            TocLevel::H3
        } else {
            TocLevel::H2
        }
    }
}

/// A table of contents entry for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// The heading level
    pub level: TocLevel,
    /// The heading id (for anchor links)
    pub id: String,
    /// The heading text, tags stripped
    pub text: String,
}

/// Compute the anchor id for a heading's inner HTML.
///
/// Tags are stripped and entities decoded before slugging, so
/// `A <code>b</code> &amp; c` becomes `a-b-c`.
pub fn anchor_id(inner_html: &str) -> String {
    slug_words(&decode_entities(&strip_tags(inner_html)))
}

fn existing_id(attrs: Option<&str>) -> Option<&str> {
    attrs
        .and_then(|attrs| ID_ATTR_RE.captures(attrs))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Give every `<h2>`/`<h3>` without an `id` one derived from its text.
///
/// Headings that already carry an id are left as they are, so running this
/// twice changes nothing. Colliding anchors get `-1`, `-2`, ... suffixes.
pub fn add_heading_ids(html: &str) -> String {
    let mut used: HashSet<String> = HEADING_RE
        .captures_iter(html)
        .filter_map(|caps| existing_id(caps.get(2).map(|m| m.as_str())))
        .map(str::to_string)
        .collect();

    HEADING_RE
        .replace_all(html, |caps: &Captures| {
            let attrs = caps.get(2).map(|m| m.as_str());
            if existing_id(attrs).is_some() {
                return caps[0].to_string();
            }

            let tag = &caps[1];
            let content = &caps[3];

            let mut base_id = anchor_id(content);
            if base_id.is_empty() {
                base_id = "section".to_string();
            }
            let mut id = base_id.clone();
            let mut suffix = 1;
            while used.contains(&id) {
                id = format!("{}-{}", base_id, suffix);
                suffix += 1;
            }
            used.insert(id.clone());

            format!(
                "<{tag} id=\"{id}\"{attrs}>{content}</{tag}>",
                attrs = attrs.unwrap_or("")
            )
        })
        .into_owned()
}

/// Collect anchored `<h2>`/`<h3>` headings in document order.
///
/// Headings without an id are skipped; run [`add_heading_ids`] first.
pub fn extract_toc(html: &str) -> Vec<TocEntry> {
    HEADING_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let id = existing_id(caps.get(2).map(|m| m.as_str()))?;
            Some(TocEntry {
                level: TocLevel::from_tag(&caps[1]),
                id: id.to_string(),
                text: decode_entities(&strip_tags(&caps[3])).trim().to_string(),
            })
        })
        .collect()
}
