//! Content source abstraction

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::Post;
use crate::error::PipelineError;

/// The single I/O boundary of the pipeline: looks up one post per call.
///
/// Dropping the returned future cancels the lookup.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the post matching `slug`.
    ///
    /// Fails with [`PipelineError::NotFound`] when nothing matches and with
    /// [`PipelineError::SourceUnavailable`] when the source cannot answer.
    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Post, PipelineError>;
}

/// In-memory content source
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: BTreeMap<String, Post>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post, keyed by its slug
    pub fn with_post(mut self, post: Post) -> Self {
        self.insert(post);
        self
    }

    pub fn insert(&mut self, post: Post) {
        self.posts.insert(post.slug.clone(), post);
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Post, PipelineError> {
        self.posts
            .get(slug)
            .cloned()
            .ok_or_else(|| PipelineError::NotFound {
                slug: slug.to_string(),
            })
    }
}
