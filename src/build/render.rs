//! Page and index entry rendering with Tera.
//!
//! Both templates are embedded in the binary. A templates directory may
//! replace either of them by providing a file with the same name.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

use super::article::Article;
use super::headings::TocEntry;
use crate::util::strip_tags;

pub const POST_TEMPLATE: &str = "post.html";
pub const INDEX_ENTRY_TEMPLATE: &str = "index_entry.html";

const DEFAULT_TEMPLATES: [(&str, &str); 2] = [
    (POST_TEMPLATE, include_str!("../../templates/post.html")),
    (
        INDEX_ENTRY_TEMPLATE,
        include_str!("../../templates/index_entry.html"),
    ),
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("templates directory not found: {0}")]
    TemplatesNotFound(String),

    #[error("failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The template renderer, wrapping Tera.
///
/// Templates are registered under `.html` names, so Tera autoescapes every
/// interpolated value; only the body HTML is marked `safe`.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer with the embedded templates, optionally overridden
    /// by files from `templates_dir`.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(DEFAULT_TEMPLATES)?;

        if let Some(dir) = templates_dir {
            if !dir.is_dir() {
                return Err(RenderError::TemplatesNotFound(dir.display().to_string()));
            }
            for name in [POST_TEMPLATE, INDEX_ENTRY_TEMPLATE] {
                let path = dir.join(name);
                if !path.exists() {
                    continue;
                }
                let source = std::fs::read_to_string(&path).map_err(|source| RenderError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                tracing::debug!(template = name, path = %path.display(), "using template override");
                tera.add_raw_template(name, &source)?;
            }
        }

        Ok(Self { tera })
    }

    /// Render a full post page.
    pub fn render_page(&self, context: &PageContext) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("post", &context.post);
        tera_context.insert("content", &context.content);
        tera_context.insert("toc", &context.toc);
        tera_context.insert("index_href", &context.index_href);
        tera_context.insert("theme", &theme_or_empty(&context.theme));

        Ok(self.tera.render(POST_TEMPLATE, &tera_context)?)
    }

    /// Render the listing entry for a post.
    pub fn render_index_entry(&self, context: &IndexEntryContext) -> Result<String, RenderError> {
        let tera_context = Context::from_serialize(context)?;
        Ok(self.tera.render(INDEX_ENTRY_TEMPLATE, &tera_context)?)
    }
}

/// Templates may test `theme.*` keys even when no settings were given.
fn theme_or_empty(theme: &serde_json::Value) -> serde_json::Value {
    if theme.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        theme.clone()
    }
}

/// Context passed to the post template.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub site: SiteContext,
    pub post: PostInfo,
    /// Rendered body HTML, inserted unescaped
    pub content: String,
    /// Table of contents for the current page
    pub toc: Vec<TocEntry>,
    /// Link back to the listing page
    pub index_href: String,
    /// Theme settings from config, accessible as `theme.*` in templates
    pub theme: serde_json::Value,
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub lang: String,
}

/// Information about the post being rendered.
#[derive(Debug, Serialize)]
pub struct PostInfo {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub reading_minutes: usize,
    pub tags: Vec<TagChip>,
}

/// A tag as shown on a page or listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub name: String,
    /// Leading tags get the accent style
    pub highlighted: bool,
}

/// Context passed to the index entry template.
#[derive(Debug, Serialize)]
pub struct IndexEntryContext {
    /// Post filename, relative to the listing page
    pub href: String,
    pub title: String,
    pub excerpt: String,
    /// `MM · DD`
    pub date_display: String,
    pub tags: Vec<TagChip>,
    /// All tags joined by spaces, for client-side filtering
    pub tags_joined: String,
}

/// Mark the first `highlighted` tags as accented.
pub fn tag_chips(tags: &[String], highlighted: usize) -> Vec<TagChip> {
    tags.iter()
        .enumerate()
        .map(|(i, name)| TagChip {
            name: name.clone(),
            highlighted: i < highlighted,
        })
        .collect()
}

/// Estimated reading time in whole minutes, never less than one.
///
/// Counts the characters of the body with markup removed. Halves round
/// to the even neighbour, so 750 characters at 300 a minute is 2 minutes.
pub fn reading_minutes(body_html: &str, chars_per_minute: usize) -> usize {
    let chars = strip_tags(body_html).chars().count();
    let minutes = (chars as f64 / chars_per_minute.max(1) as f64).round_ties_even() as usize;
    minutes.max(1)
}

/// Everything the composer needs besides the article itself.
pub struct ComposeOptions<'a> {
    pub site: SiteContext,
    pub date: NaiveDate,
    pub tags: &'a [String],
    pub highlighted_tags: usize,
    pub reading_speed: usize,
    pub index_href: String,
    pub theme: &'a serde_json::Value,
}

/// Build the page context for an article and render it.
pub fn compose_page(
    renderer: &Renderer,
    article: &Article,
    body_html: &str,
    toc: &[TocEntry],
    options: ComposeOptions,
) -> Result<String, RenderError> {
    let context = PageContext {
        site: options.site,
        post: PostInfo {
            title: article.title.clone(),
            abstract_text: article.abstract_text.clone(),
            date: options.date.format("%Y-%m-%d").to_string(),
            reading_minutes: reading_minutes(body_html, options.reading_speed),
            tags: tag_chips(options.tags, options.highlighted_tags),
        },
        content: body_html.to_string(),
        toc: toc.to_vec(),
        index_href: options.index_href,
        theme: options.theme.clone(),
    };

    renderer.render_page(&context)
}
