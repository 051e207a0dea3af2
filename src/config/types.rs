//! Configuration type definitions.
//!
//! This module contains all the data structures used in the docpost
//! configuration file. These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Root config
// =============================================================================

/// Publishing configuration, loaded from `docpost.yaml` and `DOCPOST_*`
/// environment variables. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub post: PostConfig,
    #[serde(default)]
    pub index: IndexConfig,
    /// Directory whose `post.html` / `index_entry.html` replace the embedded templates
    #[serde(default)]
    pub templates: Option<PathBuf>,
    /// Arbitrary settings passed to templates as `theme.*`
    #[serde(default)]
    pub theme: serde_json::Value,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name, appended to every post's `<title>`
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Value of the page's `lang` attribute
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_site_name() -> String {
    "深渊研究室".to_string()
}

fn default_lang() -> String {
    "zh".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            lang: default_lang(),
        }
    }
}

// =============================================================================
// Converter configuration
// =============================================================================

/// Which backend turns body markdown into HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HtmlBackend {
    /// The external converter (same program that reads the source document)
    #[default]
    Pandoc,
    /// pulldown-cmark, in process
    Builtin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// External converter executable
    #[serde(default = "default_program")]
    pub program: String,
    /// Backend for the markdown -> HTML step
    #[serde(default)]
    pub renderer: HtmlBackend,
}

fn default_program() -> String {
    "pandoc".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            renderer: HtmlBackend::default(),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for the builtin renderer
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}

// =============================================================================
// Post page configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostConfig {
    /// Characters read per minute, for the reading time estimate
    #[serde(default = "default_reading_speed")]
    pub reading_speed: usize,
    /// How many leading tags get the highlighted chip style
    #[serde(default = "default_highlighted_tags")]
    pub highlighted_tags: usize,
}

fn default_reading_speed() -> usize {
    300
}

fn default_highlighted_tags() -> usize {
    2
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            reading_speed: default_reading_speed(),
            highlighted_tags: default_highlighted_tags(),
        }
    }
}

// =============================================================================
// Index configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Listing page, relative to the output directory
    #[serde(default = "default_index_file")]
    pub file: PathBuf,
    /// New entries are inserted right after the first occurrence of this string
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Abstracts longer than this are cut and get a trailing ellipsis
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

fn default_index_file() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_marker() -> String {
    r#"<div class="post-list">"#.to_string()
}

fn default_excerpt_chars() -> usize {
    120
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file: default_index_file(),
            marker: default_marker(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}
