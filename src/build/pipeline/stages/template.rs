//! Page template rendering stage.
//!
//! Wraps rendered HTML content in the post page template.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::{ComposeOptions, SiteContext, compose_page};

/// Stage that applies the page template to rendered content.
///
/// This stage wraps the body HTML (from the markdown stage) in the full
/// page, adding:
/// - Title, date and reading time
/// - Tag chips and the abstract block
/// - Table of contents sidebar
/// - Theme toggle and reading progress bar
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let article = doc.article(self.name())?;
        let config = ctx.config;

        let html = compose_page(
            ctx.renderer,
            article,
            &doc.body_html,
            &doc.toc,
            ComposeOptions {
                site: SiteContext {
                    name: config.site.name.clone(),
                    lang: config.site.lang.clone(),
                },
                date: ctx.date(),
                tags: &doc.tags,
                highlighted_tags: config.post.highlighted_tags,
                reading_speed: config.post.reading_speed,
                index_href: config.index.file.to_string_lossy().replace('\\', "/"),
                theme: &config.theme,
            },
        )?;

        doc.output_html = Some(html);
        Ok(())
    }
}
