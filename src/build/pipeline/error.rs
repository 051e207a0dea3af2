//! Pipeline error types.

use std::path::PathBuf;

use crate::build::format::FormatError;
use crate::build::index::IndexError;
use crate::build::markdown::MarkdownError;
use crate::build::render::RenderError;

/// Errors that can occur during pipeline processing.
///
/// All of these abort the run. Recoverable conditions are collected as
/// [`PublishWarning`]s instead.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source document not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("slug would overwrite the index page {}, choose another with --slug", .0.display())]
    SlugCollidesWithIndex(PathBuf),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("markdown rendering error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("page rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("index update error: {0}")]
    Index(#[from] IndexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

/// Conditions that are reported but do not stop publishing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishWarning {
    #[error("no top-level heading found, using \"{fallback}\" as the title (write the title as Heading 1)")]
    MissingTitle { fallback: String },

    #[error("index not found at {}, skipping update", .0.display())]
    IndexNotFound(PathBuf),

    #[error("insertion marker not found in {}, add the entry manually", .0.display())]
    IndexMarkerMissing(PathBuf),
}
