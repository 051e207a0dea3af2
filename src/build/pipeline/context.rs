//! Pipeline context for sharing state across stages.

use chrono::NaiveDate;

use super::error::PublishWarning;
use crate::build::convert::Pandoc;
use crate::build::format::FormatRegistry;
use crate::build::render::Renderer;
use crate::build::PublishRequest;
use crate::config::{HtmlBackend, PublishConfig};

/// Shared context for pipeline stages.
///
/// Holds the request, configuration and services every stage may need,
/// plus the warnings collected along the way.
pub struct PipelineContext<'a> {
    /// What to publish and where
    pub request: &'a PublishRequest,

    /// Loaded configuration
    pub config: &'a PublishConfig,

    // === Services ===
    /// External document converter
    pub pandoc: &'a Pandoc,

    /// Source format registry for loading documents
    pub formats: &'a FormatRegistry,

    /// Template renderer
    pub renderer: &'a Renderer,

    // === Mode flags ===
    /// Backend for the markdown -> HTML step
    pub backend: HtmlBackend,

    /// Whether the index stage touches the listing page
    pub update_index: bool,

    /// Recoverable problems, in the order they were found
    pub warnings: Vec<PublishWarning>,
}

impl<'a> PipelineContext<'a> {
    /// Create a new pipeline context.
    pub fn new(
        request: &'a PublishRequest,
        config: &'a PublishConfig,
        pandoc: &'a Pandoc,
        formats: &'a FormatRegistry,
        renderer: &'a Renderer,
    ) -> Self {
        Self {
            request,
            config,
            pandoc,
            formats,
            renderer,
            backend: config.converter.renderer,
            update_index: true,
            warnings: Vec::new(),
        }
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: PublishWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Publication date of the post.
    pub fn date(&self) -> NaiveDate {
        self.request.date
    }
}
