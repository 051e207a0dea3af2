//! Document state carried through the pipeline.

use std::path::{Path, PathBuf};

use crate::build::article::Article;
use crate::build::headings::TocEntry;
use crate::build::index::IndexOutcome;

/// The post being published, filled in stage by stage:
///
/// 1. After load: `markdown` = converted source
/// 2. After parse: `article`, `tags` and `slug` are set, front matter applied
/// 3. After markdown: `body_html` = anchored HTML, `toc` = populated
/// 4. After template: `output_html` = final page HTML
/// 5. After write: `output_path` = where the page landed
/// 6. After index: `index` = what happened to the listing page
#[derive(Debug)]
pub struct ProcessingDocument {
    /// Path of the source document
    pub source: PathBuf,

    /// Markdown text of the whole source
    pub markdown: String,

    /// Title, abstract and body split out of the markdown
    pub article: Option<Article>,

    /// Tags for this post (command line first, front matter second)
    pub tags: Vec<String>,

    /// Output filename stem
    pub slug: Option<String>,

    /// Rendered body fragment
    pub body_html: String,

    /// Table of contents extracted from `body_html`
    pub toc: Vec<TocEntry>,

    /// Final HTML output after template rendering
    pub output_html: Option<String>,

    /// Path of the written post page
    pub output_path: Option<PathBuf>,

    /// Result of the index update
    pub index: Option<IndexOutcome>,
}

impl ProcessingDocument {
    /// Create a new processing document for a source file.
    pub fn new(source: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            markdown: String::new(),
            article: None,
            tags: Vec::new(),
            slug: None,
            body_html: String::new(),
            toc: Vec::new(),
            output_html: None,
            output_path: None,
            index: None,
        }
    }

    /// The parsed article, or a stage error naming who needed it.
    pub fn article(&self, stage: &str) -> Result<&Article, super::PipelineError> {
        self.article.as_ref().ok_or_else(|| {
            super::PipelineError::stage(stage, "document has no article (was parse stage run?)")
        })
    }

    /// The output slug, or a stage error naming who needed it.
    pub fn slug(&self, stage: &str) -> Result<&str, super::PipelineError> {
        self.slug.as_deref().ok_or_else(|| {
            super::PipelineError::stage(stage, "document has no slug (was parse stage run?)")
        })
    }
}
