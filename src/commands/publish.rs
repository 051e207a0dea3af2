use chrono::Local;

use crate::{
    PublishArgs,
    build::{IndexOutcome, PublishRequest, Publisher, pipeline::PipelineError},
    config::PublishConfig,
};

pub fn run(args: &PublishArgs) -> Result<(), anyhow::Error> {
    if !args.source.exists() {
        return Err(PipelineError::InputNotFound(args.source.clone()).into());
    }

    let config = PublishConfig::load_from_arg(args.config_file.as_deref(), &args.out)?;

    let request = PublishRequest {
        source: args.source.clone(),
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        tags: clean_tags(&args.tags),
        output_dir: args.out.clone(),
        slug: args.slug.clone(),
    };

    let index_file = config.index.file.clone();

    println!(
        "📄 Processing {}",
        args.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.source.display().to_string())
    );

    let report = Publisher::new(config, request)
        .with_backend(args.renderer)
        .with_index_update(!args.no_index)
        .publish()?;

    println!("\n✅ Published!");
    println!("   file: {}", report.output_path.display());
    println!("   toc: {} entries", report.toc_entries);
    match &report.index {
        IndexOutcome::Updated(path) => println!("   index: {}", path.display()),
        IndexOutcome::NotFound(path) => println!("   index: not found at {}", path.display()),
        IndexOutcome::MarkerMissing(path) => {
            println!("   index: marker missing in {}, add the entry manually", path.display())
        }
        IndexOutcome::Skipped => println!("   index: skipped"),
    }
    if !report.warnings.is_empty() {
        println!("   warnings: {}", report.warnings.len());
    }

    let mut staged = vec![report.filename.clone()];
    if matches!(report.index, IndexOutcome::Updated(_)) {
        staged.push(index_file.to_string_lossy().into_owned());
    }

    println!("\n   Next steps:");
    println!("   git add {}", staged.join(" "));
    println!("   git commit -m 'post: {}'", report.title);
    println!("   git push");

    Ok(())
}

/// Trim tags and drop empty ones, keeping the order given.
fn clean_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
