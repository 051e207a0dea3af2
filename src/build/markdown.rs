//! Markdown rendering to anchored HTML.

use pulldown_cmark::{Options, Parser, html};

use super::convert::{ConvertError, Pandoc};
use super::headings::{TocEntry, add_heading_ids, extract_toc};
use crate::config::{HtmlBackend, MarkdownConfig};

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Result of rendering markdown, containing both HTML and table of contents.
pub struct MarkdownOutput {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render body markdown to HTML with the chosen backend, then anchor the
/// h2/h3 headings and read the table of contents back out.
pub fn render_markdown(
    markdown: &str,
    backend: HtmlBackend,
    pandoc: &Pandoc,
    markdown_config: &MarkdownConfig,
) -> Result<MarkdownOutput, MarkdownError> {
    let raw_html = match backend {
        HtmlBackend::Pandoc => pandoc.to_html(markdown)?,
        HtmlBackend::Builtin => render_builtin(markdown, markdown_config)?,
    };

    let html = add_heading_ids(&raw_html);
    let toc = extract_toc(&html);

    Ok(MarkdownOutput { html, toc })
}

/// Render markdown to HTML in process with pulldown-cmark.
pub fn render_builtin(
    markdown: &str,
    markdown_config: &MarkdownConfig,
) -> Result<String, MarkdownError> {
    let options = parse_options(&markdown_config.extensions)?;
    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    Ok(html_output)
}

fn parse_options(extensions: &[String]) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::headings::TocLevel;

    fn unused_pandoc() -> Pandoc {
        Pandoc::new("docpost-no-such-converter-xyz")
    }

    #[test]
    fn test_render_basic_markdown() {
        let config = MarkdownConfig::default();

        let output = render_markdown(
            "## Section\n\nbody text",
            HtmlBackend::Builtin,
            &unused_pandoc(),
            &config,
        )
        .unwrap();

        assert!(output.html.contains("<h2 id=\"section\">Section</h2>"));
        assert!(output.html.contains("<p>body text</p>"));
        assert_eq!(output.toc.len(), 1);
        assert_eq!(output.toc[0].text, "Section");
        assert_eq!(output.toc[0].level, TocLevel::H2);
    }

    #[test]
    fn test_render_nested_headings() {
        let config = MarkdownConfig::default();

        let output = render_markdown(
            "## Part One\n\n### Detail\n\n#### Too deep\n\n## Part Two",
            HtmlBackend::Builtin,
            &unused_pandoc(),
            &config,
        )
        .unwrap();

        let ids: Vec<&str> = output.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["part-one", "detail", "part-two"]);
        assert_eq!(output.toc[1].level, TocLevel::H3);
    }

    #[test]
    fn test_heading_attribute_id_is_kept() {
        let config = MarkdownConfig::default();

        let output = render_markdown(
            "## Custom {#my-id}",
            HtmlBackend::Builtin,
            &unused_pandoc(),
            &config,
        )
        .unwrap();

        assert_eq!(output.toc[0].id, "my-id");
    }

    #[test]
    fn test_render_code_block() {
        let config = MarkdownConfig::default();

        let html = render_builtin("```rust\nlet x = 1;\n```", &config).unwrap();

        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn test_invalid_extension() {
        let config = MarkdownConfig {
            extensions: vec!["not_a_real_extension".to_string()],
        };

        let result = render_builtin("# Test", &config);
        assert!(matches!(result, Err(MarkdownError::InvalidExtension(_))));
    }

    #[test]
    fn test_pandoc_backend_surfaces_converter_errors() {
        let config = MarkdownConfig::default();

        let result = render_markdown("## A", HtmlBackend::Pandoc, &unused_pandoc(), &config);
        assert!(matches!(
            result,
            Err(MarkdownError::Convert(ConvertError::ConverterUnavailable { .. }))
        ));
    }
}
