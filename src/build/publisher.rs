use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::{HtmlBackend, PublishConfig};

use super::convert::Pandoc;
use super::format::FormatRegistry;
use super::index::IndexOutcome;
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingDocument, PublishWarning};
use super::render::Renderer;

/// What to publish and where. Built once by the command layer.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Source document (docx, markdown, ...)
    pub source: PathBuf,
    /// Publication date shown on the page and in the listing
    pub date: NaiveDate,
    /// Tags in display order
    pub tags: Vec<String>,
    /// Blog root: the post page and the listing page live here
    pub output_dir: PathBuf,
    /// Filename stem to use instead of one derived from the title
    pub slug: Option<String>,
}

pub struct PublishReport {
    pub title: String,
    /// Post filename, relative to the output directory
    pub filename: String,
    pub output_path: PathBuf,
    pub toc_entries: usize,
    pub index: IndexOutcome,
    pub warnings: Vec<PublishWarning>,
}

pub struct Publisher {
    config: PublishConfig,
    request: PublishRequest,
    backend: Option<HtmlBackend>,
    update_index: bool,
}

impl Publisher {
    pub fn new(config: PublishConfig, request: PublishRequest) -> Self {
        Self {
            config,
            request,
            backend: None,
            update_index: true,
        }
    }

    /// Override the configured markdown -> HTML backend.
    pub fn with_backend(mut self, backend: Option<HtmlBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable the listing page update.
    pub fn with_index_update(mut self, update_index: bool) -> Self {
        self.update_index = update_index;
        self
    }

    pub fn publish(&self) -> Result<PublishReport, PipelineError> {
        // Publish pipeline:
        // 1. Set up services (converter, formats, templates)
        // 2. Run load -> parse -> markdown -> template -> write -> index
        // 3. Summarize what happened

        if !self.request.source.exists() {
            return Err(PipelineError::InputNotFound(self.request.source.clone()));
        }

        let pandoc = Pandoc::new(self.config.converter.program.clone());
        let formats = FormatRegistry::with_defaults();
        let renderer = Renderer::new(self.config.templates.as_deref())?;

        let mut ctx = PipelineContext::new(&self.request, &self.config, &pandoc, &formats, &renderer);
        if let Some(backend) = self.backend {
            ctx.backend = backend;
        }
        ctx.update_index = self.update_index;

        let mut doc = ProcessingDocument::new(&self.request.source);
        Pipeline::default_pipeline().run(&mut doc, &mut ctx)?;

        let title = doc.article("report")?.title.clone();
        let filename = super::paths::post_filename(doc.slug("report")?);
        let output_path = doc
            .output_path
            .take()
            .ok_or_else(|| PipelineError::stage("report", "post page was not written"))?;

        Ok(PublishReport {
            title,
            filename,
            output_path,
            toc_entries: doc.toc.len(),
            index: doc.index.take().unwrap_or(IndexOutcome::Skipped),
            warnings: ctx.warnings,
        })
    }
}
