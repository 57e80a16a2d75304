//! Render a single page without starting the server

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::page::Page;
use crate::Folio;

/// Which page to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Home,
    About,
    Post(String),
}

impl Target {
    /// `home`, `about`, or a post slug
    pub fn parse(name: &str) -> Self {
        match name {
            "home" | "/" => Target::Home,
            "about" => Target::About,
            slug => Target::Post(slug.trim_start_matches("posts/").to_string()),
        }
    }
}

pub async fn render(folio: &Folio, target: &Target) -> Result<Page> {
    let page = match target {
        Target::Home => folio.home_page(),
        Target::About => folio.about_page(),
        Target::Post(slug) => folio.render_post(slug).await?,
    };
    Ok(page)
}

/// Render a page and write it to `output`, or stdout when none is given
pub async fn run(folio: &Folio, target: &Target, output: Option<&Path>) -> Result<()> {
    let page = render(folio, target).await?;
    let html = page.to_html(&folio.config.language);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html)?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", html),
    }

    Ok(())
}
