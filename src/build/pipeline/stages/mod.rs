//! Default pipeline stages.
//!
//! The standard publishing pipeline consists of:
//!
//! 1. **LoadStage** - Read or convert the source document to markdown
//! 2. **ParseStage** - Split title, abstract and body; apply front matter
//! 3. **MarkdownStage** - Convert body markdown to anchored HTML with a TOC
//! 4. **TemplateStage** - Wrap the body in the page template
//! 5. **WriteStage** - Write the page to the output directory
//! 6. **IndexStage** - Splice an entry into the listing page

mod index;
mod load;
mod markdown;
mod parse;
mod template;
mod write;

pub use index::IndexStage;
pub use load::LoadStage;
pub use markdown::MarkdownStage;
pub use parse::ParseStage;
pub use template::TemplateStage;
pub use write::WriteStage;
