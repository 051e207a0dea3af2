//! Publishing pipeline for a single document.
//!
//! The pipeline transforms the source through a series of stages:
//! 1. Load (source document to markdown)
//! 2. Parse (title, abstract, body; front matter)
//! 3. Markdown rendering (to anchored HTML with TOC)
//! 4. Template rendering (page template wrapper)
//! 5. File writing (post page to the output directory)
//! 6. Index update (entry spliced into the listing page)
//!
//! Stages run strictly in order; each one finishes before the next starts.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::{PipelineError, PublishWarning};

use stages::{IndexStage, LoadStage, MarkdownStage, ParseStage, TemplateStage, WriteStage};

/// A stage in the publishing pipeline.
///
/// Each stage receives the document being published and can modify it in
/// place before passing it to the next stage. The `ctx` provides access to
/// shared services like the converter and renderer.
pub trait Stage {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Process the document through this stage.
    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The document publishing pipeline.
///
/// The default pipeline includes: load → parse → markdown → template →
/// write → index.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(LoadStage);
        pipeline.add_stage(ParseStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline.add_stage(IndexStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a document.
    pub fn run(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            let started = std::time::Instant::now();
            stage.process(doc, ctx)?;
            tracing::debug!(
                stage = stage.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "stage finished"
            );
        }
        Ok(())
    }

    /// Get the names of all stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
