//! Local directory content source - one markdown file per post

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ContentSource, FrontMatter, Post};
use crate::error::PipelineError;

/// Reads `<root>/<slug>.md` files with YAML front-matter
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, slug: &str) -> Option<PathBuf> {
        let valid = !slug.is_empty()
            && !slug.starts_with('.')
            && !slug.contains(['/', '\\'])
            && !slug.contains("..");
        valid.then(|| self.root.join(format!("{}.md", slug)))
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Post, PipelineError> {
        let not_found = || PipelineError::NotFound {
            slug: slug.to_string(),
        };
        let path = self.path_for(slug).ok_or_else(not_found)?;
        tracing::debug!("Reading post {:?}", path);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(PipelineError::SourceUnavailable(format!(
                    "failed to read {:?}: {}",
                    path, e
                )))
            }
        };

        parse_post(slug, &content)
            .map_err(|e| PipelineError::SourceUnavailable(format!("{:?}: {}", path, e)))
    }
}

fn parse_post(slug: &str, content: &str) -> Result<Post, String> {
    let (fm, body) = FrontMatter::parse(content).map_err(|e| e.to_string())?;
    let date_added = fm.parse_date().ok_or("missing or invalid 'date'")?;
    let title = fm.title.ok_or("missing 'title'")?;
    let cover_image = fm.cover.ok_or("missing 'cover'")?;

    Ok(Post {
        slug: slug.to_string(),
        title,
        content_markdown: body.to_string(),
        cover_image,
        date_added,
        tags: fm.tags,
    })
}
