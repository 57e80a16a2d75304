//! Blog post page

use super::{CoverImage, Heading, MetaStrip, Page, PageMetadata, PostStyles, Section, TagBadge};
use crate::content::{normalize, Post};
use crate::markdown::CompiledContent;

const COVER_ALT: &str = "Article cover image";

/// Metadata for a post page, derived from the slug alone
pub fn post_metadata(slug: &str, author: &str) -> PageMetadata {
    PageMetadata {
        title: format!("{} - {}", normalize(slug), author),
        description: format!("Article written by {}, published on Hashnode.", author),
    }
}

/// Composes a fetched post and its compiled body into a page
#[derive(Debug, Clone)]
pub struct PostRenderer {
    author: String,
    date_format: String,
    styles: PostStyles,
}

impl PostRenderer {
    pub fn new(author: &str, date_format: &str, styles: PostStyles) -> Self {
        Self {
            author: author.to_string(),
            date_format: date_format.to_string(),
            styles,
        }
    }

    /// Cover image, then the metadata strip, then the article body
    pub fn render(&self, post: &Post, compiled: CompiledContent) -> Page {
        let styles = &self.styles;
        let mut page = Page::new(post_metadata(&post.slug, &self.author), &styles.container);

        page.heading = Some(Heading {
            text: post.title.clone(),
            class: styles.heading.clone(),
        });
        page.preload.push(post.cover_image.clone());

        page.sections.push(Section::CoverImage(CoverImage {
            src: post.cover_image.clone(),
            alt: COVER_ALT.to_string(),
            class: styles.cover.clone(),
        }));

        page.sections.push(Section::MetaStrip(MetaStrip {
            date: post.date_added,
            date_format: self.date_format.clone(),
            tags: post
                .tags
                .iter()
                .map(|tag| TagBadge {
                    label: tag.name.clone(),
                    class: styles.badge.clone(),
                })
                .collect(),
            class: styles.meta_strip.clone(),
            timestamp_class: styles.timestamp.clone(),
            badge_list_class: styles.badge_list.clone(),
        }));

        page.sections.push(Section::Article {
            content: compiled,
            class: styles.article.clone(),
        });

        tracing::debug!(
            "Rendered post {} ({} tags)",
            post.slug,
            post.tags.len()
        );
        page
    }
}
