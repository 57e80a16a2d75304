//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::markdown::UnresolvedPolicy;
use crate::page::{AboutStyles, HomeStyles, PostStyles};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub author: String,
    pub description: String,
    pub language: String,

    // Links
    pub repository: String,
    pub resume: String,
    pub portrait: String,

    // Directory
    pub public_dir: String,

    // Date format (Moment.js style)
    pub date_format: String,

    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub compile: CompileConfig,
    #[serde(default)]
    pub about: AboutConfig,
    #[serde(default)]
    pub styles: StyleConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: "James Walsh".to_string(),
            description: "Software engineer writing about the web, Rust, and the outdoors.".to_string(),
            language: "en".to_string(),

            repository: "https://github.com/jamesandersonwalsh/portfolio".to_string(),
            resume: "/resume.pdf".to_string(),
            portrait: "/portraits/side-profile.webp".to_string(),

            public_dir: "public".to_string(),

            date_format: "MMMM D, YYYY".to_string(),

            content: ContentConfig::default(),
            highlight: HighlightConfig::default(),
            compile: CompileConfig::default(),
            about: AboutConfig::default(),
            styles: StyleConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Where posts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Hashnode GraphQL API
    Hashnode,
    /// Markdown files on disk
    Directory,
}

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub source: SourceKind,
    /// GraphQL endpoint for the hashnode source
    pub endpoint: String,
    /// Publication hostname for the hashnode source
    pub hostname: String,
    /// Posts directory for the directory source, relative to the site root
    pub posts_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Directory,
            endpoint: "https://api.hashnode.com".to_string(),
            hostname: String::new(),
            posts_dir: "posts".to_string(),
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// syntect theme used for the generated stylesheet
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Markdown compilation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub unresolved_components: UnresolvedPolicy,
}

/// One entry of the about page's "Get to know me" section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutEntry {
    pub title: String,
    pub body: String,
}

/// About page content that is not hard-wired
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub entries: Vec<AboutEntry>,
}

/// Class names for each page, passed explicitly into the renderers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub home: HomeStyles,
    pub post: PostStyles,
    pub about: AboutStyles,
}
