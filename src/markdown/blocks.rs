//! Structured output of the markdown compiler

use indexmap::IndexMap;
use serde::Serialize;

use super::highlight::CLASS_PREFIX;
use crate::helpers::html_escape;

/// Component props, in source order
pub type Props = IndexMap<String, String>;

/// A compiled chunk of article content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Rendered HTML from plain markdown
    Markup(String),
    /// A fenced or indented code block
    Code(CodeBlock),
    /// An embedded component resolved against the registry
    Component(ComponentBlock),
}

/// A code block and its highlighting annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language declared on the fence, if any
    pub language: Option<String>,
    /// Name of the syntax used for highlighting, once highlighted
    pub syntax: Option<String>,
    /// Literal code text
    pub literal: String,
    /// Annotated spans; their texts concatenate to `literal`
    pub spans: Vec<HighlightSpan>,
}

/// A run of code text sharing one highlighting class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub class: String,
    pub text: String,
}

/// An embedded component occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentBlock {
    pub name: String,
    pub props: Props,
    pub children: Vec<Block>,
    /// Line of the opening tag
    pub line: usize,
    /// Output of the component's renderer
    pub rendered: String,
}

/// Article body after parsing, transforms, and component rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledContent {
    pub blocks: Vec<Block>,
    pub html: String,
}

impl CodeBlock {
    pub fn new(language: Option<String>, literal: String) -> Self {
        Self {
            language,
            syntax: None,
            literal,
            spans: Vec::new(),
        }
    }

    /// Visible text of the block as rendered
    pub fn text(&self) -> String {
        if self.spans.is_empty() {
            self.literal.clone()
        } else {
            self.spans.iter().map(|s| s.text.as_str()).collect()
        }
    }

    pub fn to_html(&self) -> String {
        let mut classes = Vec::new();
        if !self.spans.is_empty() {
            classes.push(format!("{}code", CLASS_PREFIX));
        }
        if let Some(lang) = &self.language {
            classes.push(format!("language-{}", html_escape(lang)));
        }
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };
        let syntax_attr = self
            .syntax
            .as_ref()
            .map(|s| format!(r#" data-syntax="{}""#, html_escape(s)))
            .unwrap_or_default();

        let body: String = if self.spans.is_empty() {
            html_escape(&self.literal)
        } else {
            self.spans
                .iter()
                .map(|span| {
                    format!(
                        r#"<span class="{}">{}</span>"#,
                        span.class,
                        html_escape(&span.text)
                    )
                })
                .collect()
        };

        format!(
            "<pre><code{}{}>{}</code></pre>\n",
            class_attr, syntax_attr, body
        )
    }
}

impl Block {
    pub fn to_html(&self) -> String {
        match self {
            Block::Markup(html) => html.clone(),
            Block::Code(code) => code.to_html(),
            Block::Component(component) => component.rendered.clone(),
        }
    }
}

/// Visit every code block, descending into component children
pub(crate) fn for_each_code_block<F>(blocks: &mut [Block], f: &mut F)
where
    F: FnMut(&mut CodeBlock),
{
    for block in blocks {
        match block {
            Block::Code(code) => f(code),
            Block::Component(component) => for_each_code_block(&mut component.children, f),
            Block::Markup(_) => {}
        }
    }
}

impl CompiledContent {
    /// All code blocks in document order
    pub fn code_blocks(&self) -> Vec<&CodeBlock> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a CodeBlock>) {
            for block in blocks {
                match block {
                    Block::Code(code) => out.push(code),
                    Block::Component(component) => collect(&component.children, out),
                    Block::Markup(_) => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }

    /// All component occurrences in document order
    pub fn components(&self) -> Vec<&ComponentBlock> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a ComponentBlock>) {
            for block in blocks {
                if let Block::Component(component) = block {
                    out.push(component);
                    collect(&component.children, out);
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_block_html() {
        let code = CodeBlock::new(None, "a < b\n".to_string());
        assert_eq!(code.to_html(), "<pre><code>a &lt; b\n</code></pre>\n");
        assert_eq!(code.text(), "a < b\n");
    }

    #[test]
    fn test_highlighted_code_block_html() {
        let mut code = CodeBlock::new(Some("js".to_string()), "x\n".to_string());
        code.syntax = Some("JavaScript".to_string());
        code.spans = vec![HighlightSpan {
            class: "hl-source hl-js".to_string(),
            text: "x\n".to_string(),
        }];
        assert_eq!(
            code.to_html(),
            "<pre><code class=\"hl-code language-js\" data-syntax=\"JavaScript\"><span class=\"hl-source hl-js\">x\n</span></code></pre>\n"
        );
    }
}
