//! folio: personal portfolio and blog renderer
//!
//! Posts are fetched by slug from a content source, compiled from markdown
//! with embedded components and syntax highlighting, and rendered into pages
//! served over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod markdown;
pub mod page;
pub mod pipeline;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{SiteConfig, SourceKind};
use content::{ContentSource, DirectorySource, HashnodeSource};
use error::PipelineError;
use page::Page;
use pipeline::Pipeline;

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets directory
    pub public_dir: PathBuf,
    /// Post pipeline, shared by every request
    pub pipeline: Arc<Pipeline>,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        let source: Arc<dyn ContentSource> = match config.content.source {
            SourceKind::Directory => {
                let dir = base_dir.join(&config.content.posts_dir);
                tracing::debug!("Reading posts from {:?}", dir);
                Arc::new(DirectorySource::new(dir))
            }
            SourceKind::Hashnode => {
                if config.content.hostname.is_empty() {
                    anyhow::bail!("content.hostname is required for the hashnode source");
                }
                tracing::debug!(
                    "Fetching posts for {} from {}",
                    config.content.hostname,
                    config.content.endpoint
                );
                Arc::new(HashnodeSource::new(
                    &config.content.endpoint,
                    &config.content.hostname,
                )?)
            }
        };

        Ok(Self::with_source(base_dir, config, source))
    }

    /// Create an instance around an existing content source
    pub fn with_source<P: AsRef<Path>>(
        base_dir: P,
        config: SiteConfig,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let pipeline = Arc::new(Pipeline::from_config(&config, source));

        Self {
            config,
            base_dir,
            public_dir,
            pipeline,
        }
    }

    /// Render the page for one post
    pub async fn render_post(&self, slug: &str) -> Result<Page, PipelineError> {
        self.pipeline.render_post(slug).await
    }

    pub fn home_page(&self) -> Page {
        page::home_page(&self.config)
    }

    pub fn about_page(&self) -> Page {
        page::about_page(&self.config)
    }

    /// Stylesheet for highlighted code, from the configured theme
    pub fn highlight_css(&self) -> Result<String> {
        markdown::stylesheet(&self.config.highlight.theme)
    }
}
