//! Content module - post model, slug handling, and content sources

mod directory;
mod frontmatter;
mod hashnode;
mod post;
mod slug;
mod source;

pub use directory::DirectorySource;
pub use frontmatter::FrontMatter;
pub use hashnode::HashnodeSource;
pub use post::{Post, Tag};
pub use slug::normalize;
pub use source::{ContentSource, MemorySource};
