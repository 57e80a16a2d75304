//! Create a new post in the posts directory

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::config::SourceKind;
use crate::Folio;

/// Write `<posts_dir>/<slug>.md` with front matter for the directory source
pub fn create_post(folio: &Folio, title: &str, cover: Option<&str>) -> Result<PathBuf> {
    if folio.config.content.source != SourceKind::Directory {
        tracing::warn!("Posts are read from hashnode; the new file will not be served");
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let target_dir = folio.base_dir.join(&folio.config.content.posts_dir);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now();
    let cover = cover
        .map(str::to_string)
        .unwrap_or_else(|| format!("/img/{}.png", slug));
    let content = format!(
        "---\ntitle: {}\ndate: {}\ncover: {}\ntags:\n---\n",
        serde_yaml::to_string(title)?.trim_end(),
        now.format("%Y-%m-%dT%H:%M:%SZ"),
        cover
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {}", slug);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let path = create_post(&folio, "My: First Post", None).unwrap();
        assert!(path.ends_with("posts/my-first-post.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("My: First Post"));
        assert_eq!(fm.cover.as_deref(), Some("/img/my-first-post.png"));
        assert!(fm.parse_date().is_some());
        assert!(body.trim().is_empty());

        assert!(create_post(&folio, "My: First Post", None).is_err());
    }
}
