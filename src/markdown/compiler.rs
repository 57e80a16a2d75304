//! Markdown compilation: scan, parse, transform, structure

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::blocks::{Block, CodeBlock, CompiledContent, ComponentBlock};
use super::component::ComponentRegistry;
use super::highlight::Transform;
use super::scan::{scan, ComponentNode, Segment, INLINE_TAG};
use crate::error::PipelineError;
use crate::helpers::html_escape;

/// What to do when markdown names a component the registry lacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Fail the compile with `UnresolvedComponent`
    #[default]
    Strict,
    /// Render the offending source as escaped plain text and log a warning
    PlainText,
}

/// Compiles markdown with embedded components into [`CompiledContent`]
#[derive(Debug, Clone, Default)]
pub struct MarkdownCompiler {
    policy: UnresolvedPolicy,
}

/// Compile with the strict unresolved-component policy
pub fn compile(
    markdown: &str,
    registry: &ComponentRegistry,
    transforms: &[Box<dyn Transform>],
) -> Result<CompiledContent, PipelineError> {
    MarkdownCompiler::default().compile(markdown, registry, transforms)
}

impl MarkdownCompiler {
    pub fn new(policy: UnresolvedPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    /// Compile `markdown`; output depends only on the arguments
    pub fn compile(
        &self,
        markdown: &str,
        registry: &ComponentRegistry,
        transforms: &[Box<dyn Transform>],
    ) -> Result<CompiledContent, PipelineError> {
        // CommonMark replaces NUL with U+FFFD; raw HTML would otherwise carry it through
        let markdown = markdown.replace(CODE_MARKER, "\u{FFFD}");
        let segments = scan(&markdown)?;

        let mut build = Build {
            registry,
            policy: self.policy,
            anchors: BTreeMap::new(),
        };
        let mut blocks = build.segments(&segments)?;

        for transform in transforms {
            tracing::trace!("Applying transform {}", transform.name());
            transform.apply(&mut blocks)?;
        }

        let html = structure(&mut blocks, registry);
        Ok(CompiledContent { blocks, html })
    }
}

/// Delimits code block placeholders in rendered markup. Source NULs are
/// replaced before scanning, so only placeholders carry it.
const CODE_MARKER: char = '\0';

/// Markdown extensions enabled for articles
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Per-compile state
struct Build<'r> {
    registry: &'r ComponentRegistry,
    policy: UnresolvedPolicy,
    /// Heading anchors handed out so far, for de-duplication
    anchors: BTreeMap<String, usize>,
}

struct Heading<'a> {
    level: HeadingLevel,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    text: String,
    events: Vec<Event<'a>>,
}

impl<'r> Build<'r> {
    fn segments(&mut self, segments: &[Segment]) -> Result<Vec<Block>, PipelineError> {
        let mut blocks = Vec::new();
        for segment in segments {
            match segment {
                Segment::Markdown { text, line } => self.markdown(text, *line, &mut blocks)?,
                Segment::Component(node) => {
                    let block = self.component(node)?;
                    push_block(&mut blocks, block);
                }
            }
        }
        Ok(blocks)
    }

    fn component(&mut self, node: &ComponentNode) -> Result<Block, PipelineError> {
        if self.registry.contains(&node.name) {
            return Ok(Block::Component(ComponentBlock {
                name: node.name.clone(),
                props: node.props.clone(),
                children: self.segments(&node.children)?,
                line: node.line,
                rendered: String::new(),
            }));
        }

        match self.policy {
            UnresolvedPolicy::Strict => Err(PipelineError::UnresolvedComponent {
                name: node.name.clone(),
                line: node.line,
            }),
            UnresolvedPolicy::PlainText => {
                tracing::warn!(
                    "Unresolved component <{}> at line {}, rendering as text",
                    node.name,
                    node.line
                );
                Ok(Block::Markup(format!(
                    "<pre class=\"unresolved-component\">{}</pre>\n",
                    html_escape(&node.source)
                )))
            }
        }
    }

    fn markdown(
        &mut self,
        text: &str,
        first_line: usize,
        blocks: &mut Vec<Block>,
    ) -> Result<(), PipelineError> {
        let line_at = |offset: usize| first_line + text[..offset].matches('\n').count();

        let mut pending: Vec<Event> = Vec::new();
        let mut code: Option<CodeBlock> = None;
        let mut code_blocks: Vec<CodeBlock> = Vec::new();
        let mut heading: Option<Heading> = None;
        let mut in_comment = false;

        for (event, range) in Parser::new_ext(text, options()).into_offset_iter() {
            let event = match event {
                Event::End(TagEnd::HtmlBlock) => {
                    in_comment = false;
                    Event::End(TagEnd::HtmlBlock)
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some(CodeBlock::new(code_language(&kind), String::new()));
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code.take() {
                        pending.push(Event::Html(CowStr::from(format!(
                            "{m}{}{m}",
                            code_blocks.len(),
                            m = CODE_MARKER
                        ))));
                        code_blocks.push(block);
                    }
                    continue;
                }
                Event::Text(t) if code.is_some() => {
                    if let Some(block) = code.as_mut() {
                        block.literal.push_str(&t);
                    }
                    continue;
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(Heading {
                        level,
                        id: id.map(|s| s.to_string()),
                        classes: classes.iter().map(|c| c.to_string()).collect(),
                        attrs: attrs
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                            .collect(),
                        text: String::new(),
                        events: Vec::new(),
                    });
                    continue;
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(h) = heading.take() {
                        pending.push(Event::Html(CowStr::from(self.heading_html(h))));
                    }
                    continue;
                }
                Event::Html(raw) => {
                    let visible = outside_comments(&raw, &mut in_comment);
                    match self.check_inline_html(&raw, &visible, line_at(range.start))? {
                        Some(text) => Event::Text(CowStr::from(text)),
                        None => Event::Html(raw),
                    }
                }
                Event::InlineHtml(raw) => {
                    let visible = outside_comments(&raw, &mut false);
                    match self.check_inline_html(&raw, &visible, line_at(range.start))? {
                        Some(text) => Event::Text(CowStr::from(text)),
                        None => Event::InlineHtml(raw),
                    }
                }
                other => other,
            };

            match heading.as_mut() {
                Some(h) => {
                    if let Event::Text(t) | Event::Code(t) = &event {
                        h.text.push_str(t);
                    }
                    h.events.push(event);
                }
                None => pending.push(event),
            }
        }

        // One writer pass keeps footnote numbering consistent across the segment
        let mut html_output = String::new();
        html::push_html(&mut html_output, pending.into_iter());

        let mut code_blocks = code_blocks.into_iter();
        for (i, part) in html_output.split(CODE_MARKER).enumerate() {
            if i % 2 == 0 {
                let part = if i > 0 {
                    part.strip_prefix('\n').unwrap_or(part)
                } else {
                    part
                };
                if !part.is_empty() {
                    push_block(blocks, Block::Markup(part.to_string()));
                }
            } else if let Some(block) = code_blocks.next() {
                blocks.push(Block::Code(block));
            }
        }
        Ok(())
    }

    /// Reject component tags that do not start their own line.
    ///
    /// Returns replacement text when the tag is unresolved and degraded.
    fn check_inline_html(
        &self,
        raw: &str,
        visible: &str,
        line: usize,
    ) -> Result<Option<String>, PipelineError> {
        for caps in INLINE_TAG.captures_iter(visible) {
            let name = &caps[1];
            if self.registry.contains(name) {
                return Err(PipelineError::parse(
                    line,
                    format!("component <{}> must start on its own line", name),
                ));
            }
            match self.policy {
                UnresolvedPolicy::Strict => {
                    return Err(PipelineError::UnresolvedComponent {
                        name: name.to_string(),
                        line,
                    })
                }
                UnresolvedPolicy::PlainText => {
                    tracing::warn!(
                        "Unresolved component <{}> at line {}, rendering as text",
                        name,
                        line
                    );
                    return Ok(Some(raw.to_string()));
                }
            }
        }
        Ok(None)
    }

    fn heading_html(&mut self, heading: Heading) -> String {
        let id = match heading.id {
            Some(id) => id,
            None => self.anchor(&heading.text),
        };

        let mut attrs = format!(r#" id="{}""#, html_escape(&id));
        if !heading.classes.is_empty() {
            attrs.push_str(&format!(
                r#" class="{}""#,
                html_escape(&heading.classes.join(" "))
            ));
        }
        for (name, value) in &heading.attrs {
            if !is_attribute_name(name) {
                tracing::warn!("Skipping invalid heading attribute {:?}", name);
                continue;
            }
            match value {
                Some(v) => attrs.push_str(&format!(r#" {}="{}""#, name, html_escape(v))),
                None => attrs.push_str(&format!(" {}", name)),
            }
        }

        let mut inner = String::new();
        html::push_html(&mut inner, heading.events.into_iter());
        format!(
            "<{level}{attrs}>{inner}</{level}>\n",
            level = heading.level,
            attrs = attrs,
            inner = inner
        )
    }

    /// Unique anchor for a heading, `intro`, `intro-1`, ...
    fn anchor(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let count = self.anchors.entry(base.clone()).or_insert(0);
        let anchor = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        anchor
    }
}

/// The parts of `raw` outside `<!-- -->` comments; `in_comment` carries
/// across the lines of an HTML block
fn outside_comments(raw: &str, in_comment: &mut bool) -> String {
    let mut visible = String::new();
    let mut rest = raw;
    loop {
        if *in_comment {
            match rest.find("-->") {
                Some(end) => {
                    rest = &rest[end + 3..];
                    *in_comment = false;
                }
                None => return visible,
            }
        } else {
            match rest.find("<!--") {
                Some(start) => {
                    visible.push_str(&rest[..start]);
                    rest = &rest[start + 4..];
                    *in_comment = true;
                }
                None => {
                    visible.push_str(rest);
                    return visible;
                }
            }
        }
    }
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

fn code_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// Push a block, merging adjacent markup
fn push_block(blocks: &mut Vec<Block>, block: Block) {
    if let (Some(Block::Markup(last)), Block::Markup(html)) = (blocks.last_mut(), &block) {
        last.push_str(html);
        return;
    }
    blocks.push(block);
}

/// Render components bottom-up and assemble the final HTML
fn structure(blocks: &mut [Block], registry: &ComponentRegistry) -> String {
    let mut output = String::new();
    for block in blocks.iter_mut() {
        if let Block::Component(component) = block {
            let children = structure(&mut component.children, registry);
            component.rendered = match registry.get(&component.name) {
                Some(renderer) => renderer.render(&component.props, &children),
                None => children,
            };
        }
        output.push_str(&block.to_html());
    }
    output
}
