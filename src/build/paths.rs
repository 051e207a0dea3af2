//! Output file naming.

use std::path::{Path, PathBuf};

use crate::util::slug_words;

/// Longest slug, in characters.
pub const MAX_SLUG_CHARS: usize = 60;

/// Slug used when a title has no word characters at all.
const FALLBACK_SLUG: &str = "post";

/// Convert a title to a URL-safe filename stem.
///
/// Keeps word characters and CJK ideographs, joins everything else into
/// single hyphens, and caps the length at [`MAX_SLUG_CHARS`].
///
/// # Examples
/// ```ignore
/// slugify("Hello, World! 测试") => "hello-world-测试"
/// slugify("  Rust 2024: What's New?  ") => "rust-2024-what-s-new"
/// ```
pub fn slugify(title: &str) -> String {
    let slug: String = slug_words(title).chars().take(MAX_SLUG_CHARS).collect();
    // Truncation can leave a hyphen at the end
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Filename of the generated post page.
pub fn post_filename(slug: &str) -> String {
    format!("{slug}.html")
}

/// Where the generated post page is written.
pub fn post_output_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(post_filename(slug))
}

/// Whether two output paths name the same file.
///
/// Compared without regard to ASCII case, since the blog may live on a
/// case-insensitive filesystem.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
}

/// File stem of a source document, used as a fallback title.
pub fn source_stem(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_char(c: char) -> bool {
        c == '-' || c.is_alphanumeric() || c == '_' || ('\u{4e00}'..='\u{9fff}').contains(&c)
    }

    #[test]
    fn test_slugify_mixed_title() {
        let slug = slugify("Hello, World! 测试");
        assert_eq!(slug, "hello-world-测试");
        assert!(slug.chars().all(is_slug_char));
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  Rust 2024: What's New?  "), "rust-2024-what-s-new");
        assert_eq!(slugify("--- dashes ---"), "dashes");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for title in ["Hello, World! 测试", "大模型推理：KV Cache 详解", "a  b"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_slugify_length_cap() {
        let slug = slugify(&"word ".repeat(40));
        assert!(slug.chars().count() <= MAX_SLUG_CHARS);
        assert!(!slug.ends_with('-'));
        assert!(!slug.starts_with('-'));

        let cjk = slugify(&"深".repeat(100));
        assert_eq!(cjk.chars().count(), MAX_SLUG_CHARS);
    }

    #[test]
    fn test_slugify_fallback() {
        assert_eq!(slugify("!!!"), "post");
        assert_eq!(slugify(""), "post");
    }

    #[test]
    fn test_post_output_path() {
        assert_eq!(
            post_output_path(Path::new("/blog"), "hello"),
            PathBuf::from("/blog/hello.html")
        );
    }

    #[test]
    fn test_is_same_file() {
        let dir = Path::new("/blog");
        let index = dir.join("index.html");
        assert!(is_same_file(&post_output_path(dir, "index"), &index));
        assert!(is_same_file(&post_output_path(dir, "Index"), &index));
        assert!(!is_same_file(&post_output_path(dir, "index-post"), &index));
    }

    #[test]
    fn test_source_stem() {
        assert_eq!(source_stem(Path::new("/docs/my-article.docx")), "my-article");
        assert_eq!(source_stem(Path::new("notes.md")), "notes");
    }
}
