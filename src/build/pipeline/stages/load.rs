//! Source loading stage.
//!
//! Turns the source document into markdown, converting it first when it
//! is not markdown already.

use crate::build::format::FormatContext;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that loads the source document as markdown.
///
/// The format is picked from the file extension; unknown extensions are
/// handed to the external converter. After this stage, `doc.markdown`
/// holds the full converted text.
pub struct LoadStage;

impl Stage for LoadStage {
    fn name(&self) -> &'static str {
        "load"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        if !doc.source.is_file() {
            return Err(PipelineError::InputNotFound(doc.source.clone()));
        }

        let format = ctx.formats.for_path(&doc.source);
        println!("  → reading {} ({})", doc.source.display(), format.name());

        let format_ctx = FormatContext { pandoc: ctx.pandoc };
        doc.markdown = format.load(&doc.source, &format_ctx)?;

        tracing::debug!(
            format = format.name(),
            bytes = doc.markdown.len(),
            "source loaded"
        );
        Ok(())
    }
}
