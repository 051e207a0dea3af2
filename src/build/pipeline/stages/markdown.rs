//! Body rendering stage.
//!
//! Renders the article body to HTML using the configured backend.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that renders the article body to HTML.
///
/// This stage:
/// - Converts body markdown with pandoc or the builtin renderer
/// - Gives h2/h3 headings anchor ids
/// - Extracts the heading outline for the table of contents
///
/// After this stage, `doc.body_html` contains HTML and `doc.toc`
/// contains the extracted headings.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let article = doc.article(self.name())?;

        println!("  → rendering HTML ({:?})", ctx.backend);
        let output = render_markdown(
            &article.body_markdown,
            ctx.backend,
            ctx.pandoc,
            &ctx.config.markdown,
        )?;
        println!("  table of contents: {} entries", output.toc.len());

        doc.body_html = output.html;
        doc.toc = output.toc;
        Ok(())
    }
}
