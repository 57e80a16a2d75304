//! About page

use serde::Serialize;

use super::{CoverImage, Heading, Page, PageMetadata, Section};
use crate::config::SiteConfig;
use crate::helpers::{class_attr, html_escape, image_tag, link_to};

/// One position in the work history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CvItem {
    pub image: &'static str,
    pub company: &'static str,
    pub role: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
}

/// Work history, most recent first
pub const CV: [CvItem; 4] = [
    CvItem {
        image: "/logos/employers/vasion.png",
        company: "Vasion",
        role: "Staff Software Engineer",
        start_date: "2022",
        end_date: "Present",
    },
    CvItem {
        image: "/logos/employers/podium.jpg",
        company: "Podium",
        role: "Senior Software Engineer",
        start_date: "2021",
        end_date: "2022",
    },
    CvItem {
        image: "/logos/employers/pluralsight.png",
        company: "Pluralsight",
        role: "Full Stack Software Engineer",
        start_date: "2016",
        end_date: "2020",
    },
    CvItem {
        image: "/logos/employers/maersk.jpg",
        company: "Maersk",
        role: "Software Engineer",
        start_date: "2014",
        end_date: "2016",
    },
];

/// Build the about page from the site config
pub fn about_page(config: &SiteConfig) -> Page {
    let styles = &config.styles.about;
    let mut page = Page::new(
        PageMetadata {
            title: format!("About - {}", config.author),
            description: "Learn more about me.".to_string(),
        },
        &styles.container,
    );

    page.preload.push(config.portrait.clone());
    page.sections.push(Section::CoverImage(CoverImage {
        src: config.portrait.clone(),
        alt: format!("Picture of {} side profile", first_name(&config.author)),
        class: styles.portrait.clone(),
    }));
    page.heading = Some(Heading {
        text: format!("Hey, I'm {}.", first_name(&config.author)),
        class: styles.heading.clone(),
    });
    page.sections.push(Section::Markup(format!(
        "<h2{}>I live in Salt Lake City, where I write code &amp; enjoy the Great Outdoors.</h2>",
        class_attr(Some(&styles.greeting))
    )));

    page.sections.push(Section::Markup(get_to_know_me(config)));

    let mut cards = format!("<section{}>\n", class_attr(Some(&styles.section)));
    cards.push_str(&card(
        config,
        "See what I've published",
        "<p>Get notified when I publish new posts, unsubscribe any time. \
         My blog is hosted here, &amp; published to Hashnode &amp; DEV.to.</p>",
        &link_to("/#publications", "Subscribe", Some(&styles.button)),
    ));
    cards.push_str(&card(
        config,
        "How I made this site",
        "<p>This site is rendered by a small Rust server. Posts are fetched and \
         compiled on every request, and code samples are highlighted with syntect. \
         Use the link below to check out the source code.</p>",
        &link_to(&config.repository, "Visit Github", Some(&styles.button)),
    ));
    cards.push_str(&card(config, "Work", &work_list(config), ""));
    cards.push_str("</section>");
    page.sections.push(Section::Markup(cards));

    page
}

fn first_name(author: &str) -> &str {
    author.split_whitespace().next().unwrap_or(author)
}

fn get_to_know_me(config: &SiteConfig) -> String {
    let styles = &config.styles.about;
    let mut html = format!("<section{}>\n", class_attr(Some(&styles.section)));
    html.push_str("<h3>Get to know me</h3>\n");
    for entry in &config.about.entries {
        html.push_str(&format!(
            "<details{}><summary>{}</summary><p>{}</p></details>\n",
            class_attr(Some(&styles.details)),
            html_escape(&entry.title),
            html_escape(&entry.body)
        ));
    }
    html.push_str("</section>");
    html
}

fn card(config: &SiteConfig, title: &str, content: &str, footer: &str) -> String {
    let styles = &config.styles.about;
    let mut html = format!("<div{}>", class_attr(Some(&styles.card)));
    html.push_str(&format!(
        "<h3{}>{}</h3>",
        class_attr(Some(&styles.card_title)),
        html_escape(title)
    ));
    html.push_str(content);
    if !footer.is_empty() {
        html.push_str(&format!("<footer>{}</footer>", footer));
    }
    html.push_str("</div>\n");
    html
}

fn work_list(config: &SiteConfig) -> String {
    let styles = &config.styles.about;
    let mut html = format!("<ul{}>", class_attr(Some(&styles.cv_list)));
    for item in &CV {
        html.push_str(&format!("<li{}>", class_attr(Some(&styles.cv_item))));
        html.push_str(&image_tag(
            item.image,
            &format!("{} company logo", item.company),
            Some(&styles.cv_logo),
            &[("width", "32"), ("height", "32")],
        ));
        html.push_str(&format!(
            "<dl><dt hidden>Company</dt><dd{}>{}</dd>\
             <dt hidden>Role</dt><dd{}>{}</dd>\
             <dt hidden>Date</dt><dd{}><time datetime=\"{}\">{}</time>\
             <span aria-hidden=\"true\"> - </span><time datetime=\"{}\">{}</time></dd></dl>",
            class_attr(Some(&styles.cv_company)),
            html_escape(item.company),
            class_attr(Some(&styles.cv_role)),
            html_escape(item.role),
            class_attr(Some(&styles.cv_dates)),
            item.start_date,
            item.start_date,
            item.end_date,
            item.end_date,
        ));
        html.push_str("</li>");
    }
    html.push_str(&format!(
        "<li>{}</li>",
        link_to(&config.resume, "Download CV", Some(&styles.button))
    ));
    html.push_str("</ul>");
    html
}
