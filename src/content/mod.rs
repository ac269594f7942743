//! Content module - posts, categories, front-matter, markdown-lite rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{classify, Line, MarkdownLite};
pub use post::{Category, Post};
