mod article;
mod convert;
mod format;
mod headings;
mod index;
mod markdown;
mod paths;
pub mod pipeline;
mod publisher;
mod render;

pub use index::IndexOutcome;
pub use publisher::{PublishRequest, Publisher};
