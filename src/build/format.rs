//! Pluggable source format system.
//!
//! This module provides a registry of source formats that can load a
//! document as markdown text. Markdown files are read as-is; everything
//! else goes through the external converter.
//!
//! # Adding a New Format
//!
//! ```ignore
//! struct NotebookSource;
//!
//! impl SourceFormat for NotebookSource {
//!     fn name(&self) -> &'static str { "notebook" }
//!     fn extensions(&self) -> &[&'static str] { &["ipynb"] }
//!     fn load(&self, path: &Path, ctx: &FormatContext) -> Result<String, FormatError> {
//!         // Extract markdown cells...
//!     }
//! }
//!
//! registry.register(NotebookSource);
//! ```

use std::path::Path;

use crate::build::convert::{ConvertError, Pandoc};

/// Context available while loading a source document.
pub struct FormatContext<'a> {
    /// External converter for non-markdown sources.
    pub pandoc: &'a Pandoc,
}

/// Error while loading a source document.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A source format that can be loaded as markdown.
pub trait SourceFormat: Send + Sync {
    /// The name of this format (e.g., "markdown", "pandoc").
    fn name(&self) -> &'static str;

    /// File extensions this format handles (lowercase, without dot).
    fn extensions(&self) -> &[&'static str];

    /// Load the document at `path` as markdown text.
    fn load(&self, path: &Path, ctx: &FormatContext) -> Result<String, FormatError>;
}

/// Markdown sources are read directly, no converter needed.
pub struct MarkdownSource;

impl SourceFormat for MarkdownSource {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &[&'static str] {
        &["md", "markdown"]
    }

    fn load(&self, path: &Path, _ctx: &FormatContext) -> Result<String, FormatError> {
        std::fs::read_to_string(path).map_err(|source| FormatError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Word-processor and other markup formats, converted by pandoc.
pub struct PandocSource;

impl SourceFormat for PandocSource {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn extensions(&self) -> &[&'static str] {
        &[
            "docx", "odt", "rtf", "epub", "html", "htm", "rst", "org", "tex",
        ]
    }

    fn load(&self, path: &Path, ctx: &FormatContext) -> Result<String, FormatError> {
        Ok(ctx.pandoc.to_markdown(path)?)
    }
}

/// Registry of source formats.
///
/// Looks formats up by file extension. Files whose extension nothing
/// claims fall back to the converter, which knows more formats than we do.
pub struct FormatRegistry {
    formats: Vec<Box<dyn SourceFormat>>,
    fallback: Box<dyn SourceFormat>,
}

impl FormatRegistry {
    /// Create a registry with no formats; every file goes to the converter.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
            fallback: Box::new(PandocSource),
        }
    }

    /// Create a registry with the default formats (markdown, pandoc).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PandocSource);
        registry.register(MarkdownSource);
        registry
    }

    /// Register a new format.
    ///
    /// Later registrations take precedence for overlapping extensions.
    pub fn register<F: SourceFormat + 'static>(&mut self, format: F) {
        self.formats.push(Box::new(format));
    }

    /// Find the format for a file extension.
    pub fn for_extension(&self, ext: &str) -> Option<&dyn SourceFormat> {
        let ext_lower = ext.to_lowercase();
        // Search in reverse so later registrations take precedence
        self.formats
            .iter()
            .rev()
            .find(|f| f.extensions().iter().any(|e| *e == ext_lower))
            .map(|f| f.as_ref())
    }

    /// Find the format for a file path, falling back to the converter.
    pub fn for_path(&self, path: &Path) -> &dyn SourceFormat {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.for_extension(ext))
            .unwrap_or(self.fallback.as_ref())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
