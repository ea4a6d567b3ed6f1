//! Content module - front-matter, markdown rendering, previews, post model

mod frontmatter;
mod markdown;
mod post;
mod preview;
pub mod scanner;

pub use frontmatter::PostMetadata;
pub use markdown::MarkdownRenderer;
pub use post::Post;
pub use preview::{resolve_preview, MAX_PREVIEW_LENGTH};
