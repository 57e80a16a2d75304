//! End-to-end post rendering through the public API

use chrono::{TimeZone, Utc};
use std::sync::Arc;

use folio::config::SiteConfig;
use folio::content::{MemorySource, Post, Tag};
use folio::error::PipelineError;
use folio::page::Section;
use folio::Folio;

fn hello_world() -> Post {
    Post {
        slug: "hello-world".to_string(),
        title: "Hello World".to_string(),
        content_markdown: "# Hi\n\n```js\nconsole.log(1)\n```".to_string(),
        cover_image: "/img/hw.png".to_string(),
        date_added: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        tags: vec![Tag::new("intro")],
    }
}

fn folio(posts: Vec<Post>) -> Folio {
    let mut source = MemorySource::new();
    for post in posts {
        source.insert(post);
    }
    Folio::with_source(".", SiteConfig::default(), Arc::new(source))
}

#[tokio::test]
async fn test_hello_world() {
    let page = folio(vec![hello_world()])
        .render_post("hello-world")
        .await
        .unwrap();

    assert_eq!(page.metadata.title, "Hello World - James Walsh");

    let covers = page.cover_images();
    assert_eq!(covers.len(), 1);
    assert_eq!(covers[0].src, "/img/hw.png");

    let badges = page.tag_badges();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].label, "intro");

    let article = page.article().unwrap();
    let code = article.code_blocks();
    assert_eq!(code.len(), 1);
    assert_eq!(code[0].literal, "console.log(1)\n");
    assert_eq!(code[0].text(), code[0].literal);
    assert!(!code[0].spans.is_empty());
    assert!(code[0].spans.iter().all(|s| s.class.starts_with("hl-")));

    let html = page.to_html("en");
    assert!(html.contains("<h1"));
    assert!(html.contains("console"));
    assert!(html.contains(r#"<time datetime="2023-01-01T00:00:00+00:00">January 1, 2023</time>"#));
}

#[tokio::test]
async fn test_section_order() {
    let page = folio(vec![hello_world()])
        .render_post("hello-world")
        .await
        .unwrap();

    let kinds: Vec<&str> = page
        .sections
        .iter()
        .map(|s| match s {
            Section::CoverImage(_) => "cover",
            Section::MetaStrip(_) => "meta",
            Section::Article { .. } => "article",
            Section::Markup(_) => "markup",
        })
        .collect();
    assert_eq!(kinds, vec!["cover", "meta", "article"]);
}

#[tokio::test]
async fn test_tag_order() {
    let mut post = hello_world();
    post.tags = vec![Tag::new("zeta"), Tag::new("alpha"), Tag::new("mid")];
    let page = folio(vec![post]).render_post("hello-world").await.unwrap();

    let labels: Vec<_> = page.tag_badges().iter().map(|b| b.label.clone()).collect();
    assert_eq!(labels, vec!["zeta", "alpha", "mid"]);
}

#[tokio::test]
async fn test_missing_post() {
    let err = folio(vec![hello_world()])
        .render_post("goodbye-world")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::NotFound {
            slug: "goodbye-world".to_string()
        }
    );
}

#[tokio::test]
async fn test_rendering_is_deterministic() {
    let app = folio(vec![hello_world()]);
    let first = app.render_post("hello-world").await.unwrap();
    let second = app.render_post("hello-world").await.unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
