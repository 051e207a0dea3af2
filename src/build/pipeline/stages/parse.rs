//! Article parsing stage.

use crate::build::article::{parse_article, parse_front_matter};
use crate::build::paths::{is_same_file, post_output_path, slugify, source_stem};
use crate::build::pipeline::{
    PipelineContext, PipelineError, ProcessingDocument, PublishWarning, Stage,
};
use crate::util::truncate_chars;

/// Characters of the abstract shown in the progress output.
const ABSTRACT_PREVIEW_CHARS: usize = 60;

/// Appended to a title-derived slug that would land on the listing page.
const INDEX_COLLISION_SUFFIX: &str = "-post";

/// Stage that splits the markdown into title, abstract and body.
///
/// Front matter, when present, only fills what the document and the
/// command line leave open. A document without any title falls back to
/// the source file stem, with a warning.
pub struct ParseStage;

impl Stage for ParseStage {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let parsed = parse_front_matter(&doc.markdown);
        let front_matter = parsed.front_matter;
        let mut article = parse_article(&parsed.content);

        if article.title.is_empty() {
            match front_matter.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => article.title = title.to_string(),
                _ => {
                    let fallback = source_stem(&doc.source);
                    ctx.warn(PublishWarning::MissingTitle {
                        fallback: fallback.clone(),
                    });
                    article.title = fallback;
                }
            }
        }

        if article.abstract_text.is_empty()
            && let Some(abstract_text) = &front_matter.r#abstract
        {
            article.abstract_text = abstract_text.trim().to_string();
        }

        doc.tags = if ctx.request.tags.is_empty() {
            front_matter.tags.clone()
        } else {
            ctx.request.tags.clone()
        };

        let explicit_slug = ctx
            .request
            .slug
            .clone()
            .or_else(|| front_matter.slug.clone())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // The post page must never replace the listing page
        let output_dir = &ctx.request.output_dir;
        let index_path = output_dir.join(&ctx.config.index.file);
        let slug = match explicit_slug {
            Some(slug) => {
                if is_same_file(&post_output_path(output_dir, &slug), &index_path) {
                    return Err(PipelineError::SlugCollidesWithIndex(index_path));
                }
                slug
            }
            None => {
                let slug = slugify(&article.title);
                if is_same_file(&post_output_path(output_dir, &slug), &index_path) {
                    format!("{slug}{INDEX_COLLISION_SUFFIX}")
                } else {
                    slug
                }
            }
        };

        println!("  title: {}", article.title);
        if article.abstract_text.is_empty() {
            println!("  abstract: (none)");
        } else {
            let (preview, cut) = truncate_chars(&article.abstract_text, ABSTRACT_PREVIEW_CHARS);
            println!("  abstract: {}{}", preview, if cut { "..." } else { "" });
        }

        doc.article = Some(article);
        doc.slug = Some(slug);
        Ok(())
    }
}
