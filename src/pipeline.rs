//! The post pipeline: fetch, compile, render

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::ContentSource;
use crate::error::PipelineError;
use crate::markdown::{ComponentRegistry, MarkdownCompiler, SyntaxHighlighter, Transform};
use crate::page::{Page, PostRenderer};

/// Everything needed to turn a slug into a post page
///
/// Holds no per-request state, so one instance serves concurrent renders.
pub struct Pipeline {
    source: Arc<dyn ContentSource>,
    registry: ComponentRegistry,
    compiler: MarkdownCompiler,
    transforms: Vec<Box<dyn Transform>>,
    renderer: PostRenderer,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        registry: ComponentRegistry,
        compiler: MarkdownCompiler,
        transforms: Vec<Box<dyn Transform>>,
        renderer: PostRenderer,
    ) -> Self {
        Self {
            source,
            registry,
            compiler,
            transforms,
            renderer,
        }
    }

    /// Standard components and transforms, configured from the site config
    pub fn from_config(config: &SiteConfig, source: Arc<dyn ContentSource>) -> Self {
        let mut transforms: Vec<Box<dyn Transform>> = Vec::new();
        if config.highlight.enable {
            transforms.push(Box::new(SyntaxHighlighter::new()));
        }

        Self::new(
            source,
            ComponentRegistry::standard(),
            MarkdownCompiler::new(config.compile.unresolved_components),
            transforms,
            PostRenderer::new(&config.author, &config.date_format, config.styles.post.clone()),
        )
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Fetch the post once, compile its markdown, and render the page.
    /// Any failure aborts the whole render.
    pub async fn render_post(&self, slug: &str) -> Result<Page, PipelineError> {
        tracing::debug!("Fetching post {}", slug);
        let post = self.source.fetch_post_by_slug(slug).await?;

        let compiled = self
            .compiler
            .compile(&post.content_markdown, &self.registry, &self.transforms)?;
        tracing::debug!(
            "Compiled {} into {} blocks",
            slug,
            compiled.blocks.len()
        );

        Ok(self.renderer.render(&post, compiled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MemorySource, Post, Tag};
    use crate::markdown::UnresolvedPolicy;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str, markdown: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: "Title".to_string(),
            content_markdown: markdown.to_string(),
            cover_image: "/img/cover.png".to_string(),
            date_added: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            tags: vec![Tag::new("intro")],
        }
    }

    fn pipeline(config: &SiteConfig, posts: Vec<Post>) -> Pipeline {
        let mut source = MemorySource::new();
        for p in posts {
            source.insert(p);
        }
        Pipeline::from_config(config, Arc::new(source))
    }

    #[tokio::test]
    async fn test_not_found() {
        let pipeline = pipeline(&SiteConfig::default(), Vec::new());
        let err = pipeline.render_post("missing").await.unwrap_err();
        assert!(matches!(err, PipelineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unresolved_component_aborts() {
        let pipeline = pipeline(
            &SiteConfig::default(),
            vec![post("bad", "<Unknown />\n")],
        );
        let err = pipeline.render_post("bad").await.unwrap_err();
        assert!(matches!(err, PipelineError::UnresolvedComponent { .. }));
    }

    #[tokio::test]
    async fn test_plain_text_policy_keeps_source() {
        let mut config = SiteConfig::default();
        config.compile.unresolved_components = UnresolvedPolicy::PlainText;
        let pipeline = pipeline(&config, vec![post("bad", "<Unknown />\n")]);

        let page = pipeline.render_post("bad").await.unwrap();
        let html = &page.article().unwrap().html;
        assert!(html.contains("unresolved-component"));
        assert!(html.contains("&lt;Unknown /&gt;"));
    }

    #[tokio::test]
    async fn test_highlight_disabled() {
        let mut config = SiteConfig::default();
        config.highlight.enable = false;
        let pipeline = pipeline(&config, vec![post("code", "```rust\nfn main() {}\n```\n")]);

        let page = pipeline.render_post("code").await.unwrap();
        let code = page.article().unwrap().code_blocks();
        assert_eq!(code.len(), 1);
        assert!(code[0].spans.is_empty());
    }
}
