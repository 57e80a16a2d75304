//! Embeddable components and their registry

use std::collections::BTreeMap;
use std::fmt;

use super::Props;
use crate::helpers::{html_escape, image_tag};

/// A renderer invoked from markdown with a `<Name ...>` tag
pub trait Component: Send + Sync {
    /// Render with the tag's props and the already-rendered children
    fn render(&self, props: &Props, children: &str) -> String;
}

impl<F> Component for F
where
    F: Fn(&Props, &str) -> String + Send + Sync,
{
    fn render(&self, props: &Props, children: &str) -> String {
        self(props, children)
    }
}

/// Fixed mapping from tag name to component
#[derive(Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Box<dyn Component>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in article components
    pub fn standard() -> Self {
        Self::new()
            .with("Callout", Callout)
            .with("CodeSample", CodeSample)
            .with("Figure", Figure)
    }

    /// Add a component, replacing any previous one with the same name
    pub fn with(mut self, name: &str, component: impl Component + 'static) -> Self {
        self.register(name, component);
        self
    }

    pub fn register(&mut self, name: &str, component: impl Component + 'static) {
        self.components
            .insert(name.to_string(), Box::new(component));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Blockquote styled by `kind` (note, tip, warning), with optional `title`
pub struct Callout;

impl Component for Callout {
    fn render(&self, props: &Props, children: &str) -> String {
        let kind = props.get("kind").map(String::as_str).unwrap_or("note");
        let title = props
            .get("title")
            .map(|t| format!(r#"<p class="callout-title">{}</p>"#, html_escape(t)))
            .unwrap_or_default();
        format!(
            "<blockquote class=\"callout callout-{}\">\n{}{}</blockquote>\n",
            html_escape(kind),
            title,
            children
        )
    }
}

/// Code sample figure with an optional `title` caption
pub struct CodeSample;

impl Component for CodeSample {
    fn render(&self, props: &Props, children: &str) -> String {
        let caption = props
            .get("title")
            .map(|t| format!("<figcaption>{}</figcaption>\n", html_escape(t)))
            .unwrap_or_default();
        format!(
            "<figure class=\"code-sample\">\n{}{}</figure>\n",
            caption, children
        )
    }
}

/// Image figure: `<Figure src="..." alt="..." caption="..." />`
pub struct Figure;

impl Component for Figure {
    fn render(&self, props: &Props, children: &str) -> String {
        let src = props.get("src").map(String::as_str).unwrap_or_default();
        let alt = props.get("alt").map(String::as_str).unwrap_or_default();
        let caption = match props.get("caption") {
            Some(c) => format!("<figcaption>{}</figcaption>\n", html_escape(c)),
            None if !children.trim().is_empty() => {
                format!("<figcaption>{}</figcaption>\n", children.trim())
            }
            None => String::new(),
        };
        format!(
            "<figure class=\"figure\">\n{}\n{}</figure>\n",
            image_tag(src, alt, None, &[("loading", "lazy")]),
            caption
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_standard_registry() {
        let registry = ComponentRegistry::standard();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Callout", "CodeSample", "Figure"]
        );
        assert!(registry.contains("Callout"));
        assert!(!registry.contains("callout"));
    }

    #[test]
    fn test_callout_render() {
        let html = Callout.render(&props(&[("kind", "tip")]), "<p>Hi</p>\n");
        assert_eq!(
            html,
            "<blockquote class=\"callout callout-tip\">\n<p>Hi</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_figure_render() {
        let html = Figure.render(&props(&[("src", "/a.png"), ("alt", "A"), ("caption", "Cap")]), "");
        assert!(html.contains(r#"<img src="/a.png" alt="A" loading="lazy">"#));
        assert!(html.contains("<figcaption>Cap</figcaption>"));
    }

    #[test]
    fn test_closure_component() {
        let registry = ComponentRegistry::new()
            .with("Shout", |_: &Props, children: &str| children.to_uppercase());
        let shout = registry.get("Shout").unwrap();
        assert_eq!(shout.render(&Props::new(), "hey"), "HEY");
    }
}
