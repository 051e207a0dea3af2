//! File writing stage.
//!
//! Writes the final HTML output to the filesystem.

use crate::build::paths::post_output_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that writes the rendered page to the output directory.
///
/// This stage takes the final HTML from `doc.output_html` and writes it to
/// `{output_dir}/{slug}.html`, creating the directory if needed. An
/// existing page with the same slug is overwritten.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        // Get the final HTML output
        let html = doc.output_html.as_ref().ok_or_else(|| {
            PipelineError::stage(
                self.name(),
                format!(
                    "document '{}' has no output HTML (was template stage run?)",
                    doc.source.display()
                ),
            )
        })?;

        let output_dir = &ctx.request.output_dir;
        std::fs::create_dir_all(output_dir)?;

        let output_path = post_output_path(output_dir, doc.slug(self.name())?);
        std::fs::write(&output_path, html)?;
        println!("  ✓ wrote {}", output_path.display());

        doc.output_path = Some(output_path);
        Ok(())
    }
}
