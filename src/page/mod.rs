//! Page structures and the HTML layout shell

mod about;
mod home;
mod post;
mod styles;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::helpers::{class_attr, html_escape, image_tag, time_tag};
use crate::markdown::CompiledContent;

pub use about::{about_page, CvItem, CV};
pub use home::home_page;
pub use post::{post_metadata, PostRenderer};
pub use styles::{AboutStyles, HomeStyles, PostStyles};

/// Stylesheet generated from the highlight theme
pub const HIGHLIGHT_STYLESHEET: &str = "/assets/highlight.css";

/// Search-engine metadata for a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Top-level heading with its class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub text: String,
    pub class: String,
}

/// A rendered page, sections in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub metadata: PageMetadata,
    pub heading: Option<Heading>,
    /// Images the browser should fetch before layout
    pub preload: Vec<String>,
    pub sections: Vec<Section>,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section {
    CoverImage(CoverImage),
    MetaStrip(MetaStrip),
    Article { content: CompiledContent, class: String },
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverImage {
    pub src: String,
    pub alt: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaStrip {
    pub date: DateTime<Utc>,
    pub date_format: String,
    pub tags: Vec<TagBadge>,
    pub class: String,
    pub timestamp_class: String,
    pub badge_list_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagBadge {
    pub label: String,
    pub class: String,
}

impl Page {
    pub fn new(metadata: PageMetadata, class: &str) -> Self {
        Self {
            metadata,
            heading: None,
            preload: Vec::new(),
            sections: Vec::new(),
            class: class.to_string(),
        }
    }

    pub fn cover_images(&self) -> Vec<&CoverImage> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::CoverImage(cover) => Some(cover),
                _ => None,
            })
            .collect()
    }

    pub fn tag_badges(&self) -> Vec<&TagBadge> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::MetaStrip(meta) => Some(meta.tags.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn article(&self) -> Option<&CompiledContent> {
        self.sections.iter().find_map(|s| match s {
            Section::Article { content, .. } => Some(content),
            _ => None,
        })
    }

    /// Render the full HTML document
    pub fn to_html(&self, language: &str) -> String {
        let mut html = String::from("<!DOCTYPE html>\n");
        html.push_str(&format!(r#"<html lang="{}">"#, html_escape(language)));
        html.push_str("\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        html.push_str(&format!(
            "<title>{}</title>\n",
            html_escape(&self.metadata.title)
        ));
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            html_escape(&self.metadata.description)
        ));
        for href in &self.preload {
            html.push_str(&format!(
                "<link rel=\"preload\" as=\"image\" href=\"{}\">\n",
                html_escape(href)
            ));
        }
        html.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            HIGHLIGHT_STYLESHEET
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<main{}>\n", class_attr(Some(&self.class))));
        html.push_str(&self.body_html());
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    /// Sections only; the heading goes before the first non-cover section
    pub fn body_html(&self) -> String {
        let mut html = String::new();
        let mut heading_done = self.heading.is_none();

        for section in &self.sections {
            if !heading_done && !matches!(section, Section::CoverImage(_)) {
                self.push_heading(&mut html);
                heading_done = true;
            }
            html.push_str(&section.to_html());
            html.push('\n');
        }
        if !heading_done {
            self.push_heading(&mut html);
        }
        html
    }

    fn push_heading(&self, html: &mut String) {
        if let Some(heading) = &self.heading {
            html.push_str(&format!(
                "<h1{}>{}</h1>\n",
                class_attr(Some(&heading.class)),
                html_escape(&heading.text)
            ));
        }
    }
}

impl Section {
    pub fn to_html(&self) -> String {
        match self {
            Section::CoverImage(cover) => image_tag(
                &cover.src,
                &cover.alt,
                Some(&cover.class),
                &[("loading", "eager"), ("fetchpriority", "high")],
            ),
            Section::MetaStrip(meta) => meta.to_html(),
            Section::Article { content, class } => {
                format!("<article{}>\n{}</article>", class_attr(Some(class)), content.html)
            }
            Section::Markup(markup) => markup.clone(),
        }
    }
}

impl MetaStrip {
    pub fn display_date(&self) -> String {
        crate::helpers::format_date(&self.date, &self.date_format)
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<div{}>", class_attr(Some(&self.class)));
        html.push_str(&format!(
            "<span{}>{}</span>",
            class_attr(Some(&self.timestamp_class)),
            time_tag(&self.date, &self.date_format)
        ));
        if !self.tags.is_empty() {
            html.push_str(&format!("<ul{}>", class_attr(Some(&self.badge_list_class))));
            for tag in &self.tags {
                html.push_str(&format!(
                    "<li{}>{}</li>",
                    class_attr(Some(&tag.class)),
                    html_escape(&tag.label)
                ));
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_page() -> Page {
        let mut page = Page::new(
            PageMetadata {
                title: "A <Title>".to_string(),
                description: "Desc".to_string(),
            },
            "post",
        );
        page.heading = Some(Heading {
            text: "Heading".to_string(),
            class: "title".to_string(),
        });
        page.preload.push("/img/cover.png".to_string());
        page.sections.push(Section::CoverImage(CoverImage {
            src: "/img/cover.png".to_string(),
            alt: "Cover".to_string(),
            class: "cover".to_string(),
        }));
        page.sections.push(Section::MetaStrip(MetaStrip {
            date: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            date_format: "MMMM D, YYYY".to_string(),
            tags: vec![TagBadge {
                label: "rust".to_string(),
                class: "badge".to_string(),
            }],
            class: "meta".to_string(),
            timestamp_class: "date".to_string(),
            badge_list_class: "tags".to_string(),
        }));
        page
    }

    #[test]
    fn test_document_head() {
        let html = sample_page().to_html("en");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &lt;Title&gt;</title>"));
        assert!(html.contains(r#"<link rel="preload" as="image" href="/img/cover.png">"#));
        assert!(html.contains(HIGHLIGHT_STYLESHEET));
    }

    #[test]
    fn test_heading_follows_cover() {
        let body = sample_page().body_html();
        let cover = body.find("<img").unwrap();
        let heading = body.find("<h1").unwrap();
        let meta = body.find(r#"<div class="meta">"#).unwrap();
        assert!(cover < heading && heading < meta);
    }

    #[test]
    fn test_meta_strip() {
        let page = sample_page();
        let html = page.body_html();
        assert!(html.contains("January 5, 2024"));
        assert!(html.contains(r#"<li class="badge">rust</li>"#));
        assert!(html.contains(r#"fetchpriority="high""#));
        assert_eq!(page.tag_badges().len(), 1);
        assert_eq!(page.cover_images().len(), 1);
    }

    #[test]
    fn test_heading_without_sections() {
        let mut page = Page::new(
            PageMetadata {
                title: "T".to_string(),
                description: "D".to_string(),
            },
            "home",
        );
        page.heading = Some(Heading {
            text: "Only".to_string(),
            class: String::new(),
        });
        assert_eq!(page.body_html(), "<h1>Only</h1>\n");
    }
}
