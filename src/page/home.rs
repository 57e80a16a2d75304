//! Home page

use super::{Heading, Page, PageMetadata};
use crate::config::SiteConfig;

pub fn home_page(config: &SiteConfig) -> Page {
    let styles = &config.styles.home;
    let mut page = Page::new(
        PageMetadata {
            title: config.author.clone(),
            description: config.description.clone(),
        },
        &styles.container,
    );
    page.heading = Some(Heading {
        text: "Under construction. Please come back later.".to_string(),
        class: styles.notice.clone(),
    });
    page
}
