//! Post and Tag models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as delivered by a content source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Slug the post was fetched with
    pub slug: String,

    /// Post title
    pub title: String,

    /// Raw markdown body
    pub content_markdown: String,

    /// Cover image URI
    pub cover_image: String,

    /// Publication date
    pub date_added: DateTime<Utc>,

    /// Post tags, in source order
    pub tags: Vec<Tag>,
}

/// A tag attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Wire shape of a post record returned by the content source.
///
/// Every field is required; anything else is a contract violation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    pub title: String,
    pub content_markdown: String,
    pub cover_image: String,
    pub date_added: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl PostRecord {
    pub(crate) fn into_post(self, slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: self.title,
            content_markdown: self.content_markdown,
            cover_image: self.cover_image,
            date_added: self.date_added,
            tags: self.tags,
        }
    }
}
