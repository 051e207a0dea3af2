use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::HtmlBackend;

mod build;
mod commands;
mod config;
mod util;

/// Publish a document as a blog post and add it to the site index
#[derive(Parser)]
#[command(version, about)]
struct PublishArgs {
    /// The source document (docx, odt, markdown, ...)
    source: PathBuf,

    /// Publication date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Comma-separated tags, e.g. "llm,data,inference"
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// The blog root to write the post into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Output filename without the .html extension (defaults to a slug of the title)
    #[arg(short, long)]
    slug: Option<String>,

    /// The path to the configuration file (defaults to docpost.yaml in the output directory)
    #[arg(short, long = "config")]
    config_file: Option<PathBuf>,

    /// Backend for rendering the body to HTML (overrides the config file)
    #[arg(short, long, value_enum)]
    renderer: Option<HtmlBackend>,

    /// Don't touch the index page
    #[arg(long, default_value = "false")]
    no_index: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let args = PublishArgs::parse();
    commands::publish::run(&args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = PublishArgs::parse_from([
            "docpost",
            "article.docx",
            "--date",
            "2025-02-01",
            "--tags",
            "llm, data,,inference",
            "--out",
            "site",
            "--renderer",
            "builtin",
        ]);

        assert_eq!(args.source, PathBuf::from("article.docx"));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(args.tags, vec!["llm", " data", "", "inference"]);
        assert_eq!(args.out, PathBuf::from("site"));
        assert_eq!(args.renderer, Some(HtmlBackend::Builtin));
        assert!(!args.no_index);
    }

    #[test]
    fn test_args_defaults() {
        let args = PublishArgs::parse_from(["docpost", "post.md"]);

        assert_eq!(args.date, None);
        assert!(args.tags.is_empty());
        assert_eq!(args.out, PathBuf::from("."));
        assert_eq!(args.slug, None);
        assert_eq!(args.config_file, None);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = PublishArgs::try_parse_from(["docpost", "post.md", "--date", "02/01/2025"]);
        assert!(result.is_err());
    }
}
