//! HTML helper functions

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to("/resume.pdf", "Download CV", Some("button")) // -> <a href="/resume.pdf" class="button">Download CV</a>
/// ```
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    let class_attr = class_attr(class);
    if href.starts_with("http://") || href.starts_with("https://") {
        format!(
            r#"<a href="{}"{} target="_blank" rel="noopener">{}</a>"#,
            html_escape(href),
            class_attr,
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}"{}>{}</a>"#,
            html_escape(href),
            class_attr,
            html_escape(text)
        )
    }
}

/// Generate an image tag with optional extra attributes
///
/// # Examples
/// ```ignore
/// image_tag("/img/cover.png", "Cover", Some("cover"), &[("loading", "eager")])
/// ```
pub fn image_tag(src: &str, alt: &str, class: Option<&str>, attrs: &[(&str, &str)]) -> String {
    let extra: String = attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, html_escape(value)))
        .collect();

    format!(
        r#"<img src="{}" alt="{}"{}{}>"#,
        html_escape(src),
        html_escape(alt),
        class_attr(class),
        extra
    )
}

/// Render ` class="..."` or nothing
pub fn class_attr(class: Option<&str>) -> String {
    match class {
        Some(c) if !c.is_empty() => format!(r#" class="{}""#, html_escape(c)),
        _ => String::new(),
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
