//! Listing page update stage.

use crate::build::index::{IndexEntry, IndexOptions, IndexOutcome, update_index};
use crate::build::paths::post_filename;
use crate::build::pipeline::{
    PipelineContext, PipelineError, ProcessingDocument, PublishWarning, Stage,
};

/// Stage that adds the post to the listing page.
///
/// A missing listing page or a missing marker is a warning, not an error:
/// the post page is already written at this point.
pub struct IndexStage;

impl Stage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        if !ctx.update_index {
            doc.index = Some(IndexOutcome::Skipped);
            return Ok(());
        }

        let article = doc.article(self.name())?;
        let filename = post_filename(doc.slug(self.name())?);
        let index_path = ctx.request.output_dir.join(&ctx.config.index.file);

        println!("  → updating {}", index_path.display());
        let outcome = update_index(
            &index_path,
            ctx.renderer,
            &IndexEntry {
                filename: &filename,
                title: &article.title,
                abstract_text: &article.abstract_text,
                tags: &doc.tags,
                date: ctx.date(),
            },
            &IndexOptions {
                marker: &ctx.config.index.marker,
                excerpt_chars: ctx.config.index.excerpt_chars,
                highlighted_tags: ctx.config.post.highlighted_tags,
            },
        )?;

        match &outcome {
            IndexOutcome::Updated(path) => println!("  ✓ updated {}", path.display()),
            IndexOutcome::NotFound(path) => {
                ctx.warn(PublishWarning::IndexNotFound(path.clone()))
            }
            IndexOutcome::MarkerMissing(path) => {
                ctx.warn(PublishWarning::IndexMarkerMissing(path.clone()))
            }
            IndexOutcome::Skipped => {}
        }

        doc.index = Some(outcome);
        Ok(())
    }
}
