//! Splitting converted markdown into title, abstract and body.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static ABSTRACT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:摘要|abstract)[：:]\s*").unwrap());

/// A parsed article, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Text of the first top-level heading (empty if there was none)
    pub title: String,
    /// Leading paragraph with any "摘要:" / "Abstract:" label removed (possibly empty)
    pub abstract_text: String,
    /// Everything else, as markdown
    pub body_markdown: String,
}

/// Parse markdown into an [`Article`].
///
/// 1. The title is the first line starting with `# `.
/// 2. The first paragraph after it becomes the abstract, unless it is a
///    heading or a code fence.
/// 3. The remaining paragraphs form the body.
///
/// Never fails: a missing title or abstract yields an empty string.
pub fn parse_article(markdown: &str) -> Article {
    let normalized = markdown.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.trim().lines().collect();

    let heading = lines.iter().enumerate().find_map(|(i, line)| {
        line.trim_start()
            .strip_prefix("# ")
            .map(|text| (i, text.trim().to_string()))
    });

    let (title, remainder) = match heading {
        Some((idx, title)) => (title, lines[idx + 1..].join("\n")),
        None => (String::new(), lines.join("\n")),
    };

    let paragraphs: Vec<&str> = remainder.trim().split("\n\n").collect();

    let mut abstract_text = String::new();
    let mut body_start = 0;
    if let Some(first) = paragraphs.first().map(|p| p.trim())
        && is_abstract_candidate(first)
    {
        abstract_text = ABSTRACT_LABEL_RE.replace(first, "").into_owned();
        body_start = 1;
    }

    Article {
        title,
        abstract_text,
        body_markdown: paragraphs[body_start..].join("\n\n"),
    }
}

fn is_abstract_candidate(paragraph: &str) -> bool {
    !paragraph.is_empty()
        && !paragraph.starts_with('#')
        && !paragraph.starts_with("```")
        && !paragraph.starts_with("~~~")
}

// =============================================================================
// Front matter
// =============================================================================

/// Optional YAML front matter at the top of a markdown source.
///
/// Values here only fill gaps: a `# ` heading still wins over `title`,
/// and command line flags win over `tags` and `slug`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(alias = "description")]
    pub r#abstract: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub slug: Option<String>,
}

/// Result of splitting front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The markdown content without the front matter block
    pub content: String,
}

/// Split a leading `---` delimited YAML block from markdown content.
///
/// The opening delimiter must be a line of exactly `---`, so a horizontal
/// rule made of a longer dash run is not mistaken for front matter. Content
/// whose block fails to parse is returned unchanged.
pub fn parse_front_matter(content: &str) -> ParsedContent {
    let unchanged = || ParsedContent {
        front_matter: FrontMatter::default(),
        content: content.to_string(),
    };

    let trimmed = content.trim_start();
    let Some(after_opening) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return unchanged();
    };

    // Closing delimiter: the next line that is exactly `---`
    let mut offset = 0;
    let mut closing = None;
    for line in after_opening.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }
    let Some((yaml_end, rest_start)) = closing else {
        return unchanged();
    };
    let yaml = &after_opening[..yaml_end];
    let rest = &after_opening[rest_start..];

    let front_matter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        match serde_yaml::from_str(yaml) {
            Ok(fm) => fm,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse front matter, treating it as content");
                return unchanged();
            }
        }
    };

    ParsedContent {
        front_matter,
        content: rest.trim_start_matches(['\r', '\n']).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_first_top_level_heading() {
        let article = parse_article("# Title\n\nSome abstract\n\n## Part\n\ntext");
        assert_eq!(article.title, "Title");
    }

    #[test]
    fn test_title_ignores_surrounding_whitespace() {
        let article = parse_article("\n\n   #   Spaced Title   \n\nbody");
        assert_eq!(article.title, "Spaced Title");
    }

    #[test]
    fn test_title_skips_lower_headings() {
        let article = parse_article("## Not it\n\n# Real Title\n\ntext");
        assert_eq!(article.title, "Real Title");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let article = parse_article("Just a paragraph.\n\n## Section\n\nMore.");
        assert_eq!(article.title, "");
        assert_eq!(article.abstract_text, "Just a paragraph.");
        assert_eq!(article.body_markdown, "## Section\n\nMore.");
    }

    #[test]
    fn test_abstract_label_stripped_fullwidth_colon() {
        let article = parse_article("# T\n\n摘要：a short abstract\n\n## Section\n\nbody text");
        assert_eq!(article.abstract_text, "a short abstract");
        assert_eq!(article.body_markdown, "## Section\n\nbody text");
    }

    #[test]
    fn test_abstract_label_stripped_any_case() {
        for input in [
            "# T\n\nAbstract: the gist\n\nbody",
            "# T\n\nABSTRACT:the gist\n\nbody",
            "# T\n\nabstract：  the gist\n\nbody",
            "# T\n\n摘要:the gist\n\nbody",
        ] {
            let article = parse_article(input);
            assert_eq!(article.abstract_text, "the gist", "input: {input:?}");
            assert_eq!(article.body_markdown, "body");
        }
    }

    #[test]
    fn test_unlabelled_first_paragraph_is_abstract() {
        let article = parse_article("# T\n\nPlain intro.\n\nBody.");
        assert_eq!(article.abstract_text, "Plain intro.");
        assert_eq!(article.body_markdown, "Body.");
    }

    #[test]
    fn test_heading_first_means_no_abstract() {
        let article = parse_article("# T\n\n## Section\n\nbody");
        assert_eq!(article.abstract_text, "");
        assert_eq!(article.body_markdown, "## Section\n\nbody");
    }

    #[test]
    fn test_code_fence_first_means_no_abstract() {
        let article = parse_article("# T\n\n```rust\nfn main() {}\n```\n\nafter");
        assert_eq!(article.abstract_text, "");
        assert!(article.body_markdown.starts_with("```rust"));
    }

    #[test]
    fn test_empty_input() {
        let article = parse_article("");
        assert_eq!(
            article,
            Article {
                title: String::new(),
                abstract_text: String::new(),
                body_markdown: String::new(),
            }
        );
    }

    #[test]
    fn test_crlf_input() {
        let article = parse_article("# T\r\n\r\nAbstract: x\r\n\r\nbody");
        assert_eq!(article.title, "T");
        assert_eq!(article.abstract_text, "x");
        assert_eq!(article.body_markdown, "body");
    }

    #[test]
    fn test_parse_front_matter_basic() {
        let content = "---\ntitle: My Page\ndescription: A test page\ntags:\n  - rust\n  - blog\n---\n\n# Hello World\n";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title.as_deref(), Some("My Page"));
        assert_eq!(parsed.front_matter.r#abstract.as_deref(), Some("A test page"));
        assert_eq!(parsed.front_matter.tags, vec!["rust", "blog"]);
        assert_eq!(parsed.content.trim(), "# Hello World");
    }

    #[test]
    fn test_parse_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.content, content);
    }

    #[test]
    fn test_parse_front_matter_empty_block() {
        let parsed = parse_front_matter("---\n---\n\n# Content");
        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.content, "# Content");
    }

    #[test]
    fn test_closing_delimiter_must_be_exact_line() {
        for content in [
            "---\ntitle: Dashes\n-----\n\n# Body",
            "---\ntitle: Trailing\n---trailing\n\n# Body",
        ] {
            let parsed = parse_front_matter(content);
            assert_eq!(parsed.front_matter, FrontMatter::default(), "input: {content:?}");
            assert_eq!(parsed.content, content);
        }
    }

    #[test]
    fn test_closing_delimiter_at_end_of_input() {
        let parsed = parse_front_matter("---\ntitle: At End\n---");
        assert_eq!(parsed.front_matter.title.as_deref(), Some("At End"));
        assert_eq!(parsed.content, "");
    }

    #[test]
    fn test_horizontal_rule_is_not_front_matter() {
        let content = "------------\n\n# Title\n\n---\n";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.content, content);
    }

    #[test]
    fn test_invalid_yaml_leaves_content_alone() {
        let content = "---\ntitle: [unclosed\n---\n# Title";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.content, content);
    }
}
