//! Registering a published post in the site's listing page.
//!
//! The listing is a hand-maintained HTML file. New entries are spliced in
//! as text right after a marker string, so the newest post comes first.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::render::{IndexEntryContext, RenderError, Renderer, tag_chips};
use crate::util::truncate_chars;

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[error("failed to read index {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write index {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What happened to the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// Entry inserted and file rewritten
    Updated(PathBuf),
    /// No listing page at the expected path; nothing written
    NotFound(PathBuf),
    /// Listing page lacks the marker; file left untouched
    MarkerMissing(PathBuf),
    /// Update disabled for this run
    Skipped,
}

/// The post data shown in a listing entry.
pub struct IndexEntry<'a> {
    pub filename: &'a str,
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub tags: &'a [String],
    pub date: NaiveDate,
}

/// Listing page settings.
pub struct IndexOptions<'a> {
    pub marker: &'a str,
    pub excerpt_chars: usize,
    pub highlighted_tags: usize,
}

/// Abstract cut to `max` characters, with `…` appended if anything was cut.
pub fn excerpt(abstract_text: &str, max: usize) -> String {
    match truncate_chars(abstract_text, max) {
        (cut, true) => format!("{cut}…"),
        (whole, false) => whole.to_string(),
    }
}

/// Month and day as shown in the listing: `02 · 01`.
pub fn date_display(date: NaiveDate) -> String {
    date.format("%m · %d").to_string()
}

/// Render the listing fragment for one post.
pub fn render_entry(
    renderer: &Renderer,
    entry: &IndexEntry,
    options: &IndexOptions,
) -> Result<String, RenderError> {
    let context = IndexEntryContext {
        href: entry.filename.to_string(),
        title: entry.title.to_string(),
        excerpt: excerpt(entry.abstract_text, options.excerpt_chars),
        date_display: date_display(entry.date),
        tags: tag_chips(entry.tags, options.highlighted_tags),
        tags_joined: entry.tags.join(" "),
    };
    let rendered = renderer.render_index_entry(&context)?;
    Ok(rendered.trim_end_matches(['\r', '\n']).to_string())
}

/// Insert `fragment` on a new line right after the first `marker`.
///
/// Returns `None` when the marker is absent. Everything before and after
/// the insertion point is kept byte for byte.
pub fn splice_after_marker(document: &str, marker: &str, fragment: &str) -> Option<String> {
    let pos = document.find(marker)? + marker.len();
    let mut spliced = String::with_capacity(document.len() + fragment.len() + 1);
    spliced.push_str(&document[..pos]);
    spliced.push('\n');
    spliced.push_str(fragment);
    spliced.push_str(&document[pos..]);
    Some(spliced)
}

/// Add an entry for the post to the listing page at `index_path`.
///
/// A missing file or a missing marker is reported through the outcome,
/// not as an error: the post itself is already published.
pub fn update_index(
    index_path: &Path,
    renderer: &Renderer,
    entry: &IndexEntry,
    options: &IndexOptions,
) -> Result<IndexOutcome, IndexError> {
    if !index_path.exists() {
        return Ok(IndexOutcome::NotFound(index_path.to_path_buf()));
    }

    let document = std::fs::read_to_string(index_path).map_err(|source| IndexError::Read {
        path: index_path.display().to_string(),
        source,
    })?;

    let fragment = render_entry(renderer, entry, options)?;

    let Some(updated) = splice_after_marker(&document, options.marker, &fragment) else {
        return Ok(IndexOutcome::MarkerMissing(index_path.to_path_buf()));
    };

    std::fs::write(index_path, updated).map_err(|source| IndexError::Write {
        path: index_path.display().to_string(),
        source,
    })?;

    Ok(IndexOutcome::Updated(index_path.to_path_buf()))
}
