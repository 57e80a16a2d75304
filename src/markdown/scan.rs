//! Line scanner that splits markdown into plain segments and embedded components
//!
//! Tags whose name starts with an upper-case letter are components. They open
//! at the start of a line (at most three spaces of indentation) in one of three
//! forms:
//!
//! ```text
//! <Figure src="/a.png" alt="A" />
//! <Callout kind="tip">One line of markdown</Callout>
//! <CodeSample title="Example">
//! ...markdown...
//! </CodeSample>
//! ```
//!
//! Fenced code blocks are tracked so tags inside them stay literal text.

use lazy_static::lazy_static;
use regex::Regex;

use super::Props;
use crate::error::PipelineError;

lazy_static! {
    static ref OPEN_TAG: Regex = Regex::new(
        r#"^<([A-Z][A-Za-z0-9]*)((?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*(?:\s*=\s*(?:"[^"]*"|'[^']*'))?)*)\s*(/?)>"#
    )
    .expect("valid open tag pattern");
    static ref CLOSE_TAG: Regex =
        Regex::new(r"^</([A-Z][A-Za-z0-9]*)\s*>").expect("valid close tag pattern");
    static ref ATTRIBUTE: Regex =
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'))?"#)
            .expect("valid attribute pattern");
    /// Component tag anywhere in a chunk of HTML
    pub(crate) static ref INLINE_TAG: Regex =
        Regex::new(r"</?([A-Z][A-Za-z0-9]*)(?:[\s/>]|$)").expect("valid inline tag pattern");
}

/// A piece of the source document
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Markdown { text: String, line: usize },
    Component(ComponentNode),
}

/// A component occurrence with its nested content
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComponentNode {
    pub name: String,
    pub props: Props,
    pub children: Vec<Segment>,
    pub line: usize,
    /// Raw source from the opening tag to the closing tag
    pub source: String,
}

struct Fence {
    marker: char,
    len: usize,
    line: usize,
}

impl Fence {
    fn open(line: &str, line_no: usize) -> Option<Self> {
        if indent_columns(line) > 3 {
            return None;
        }
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        let info = &trimmed[len..];
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker,
            len,
            line: line_no,
        })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        if indent_columns(line) > 3 {
            return false;
        }
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && run == trimmed.chars().count()
    }
}

struct Frame {
    node: Option<ComponentNode>,
    children: Vec<Segment>,
    buffer: String,
    buffer_line: usize,
}

impl Frame {
    fn root() -> Self {
        Self {
            node: None,
            children: Vec::new(),
            buffer: String::new(),
            buffer_line: 1,
        }
    }

    fn component(name: String, props: Props, line: usize, source: &str) -> Self {
        Self {
            node: Some(ComponentNode {
                name,
                props,
                children: Vec::new(),
                line,
                source: source.to_string(),
            }),
            children: Vec::new(),
            buffer: String::new(),
            buffer_line: line,
        }
    }

    fn push_line(&mut self, line: &str, line_no: usize) {
        if self.buffer.is_empty() {
            self.buffer_line = line_no;
        }
        self.buffer.push_str(line);
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.children.push(Segment::Markdown {
                text: std::mem::take(&mut self.buffer),
                line: self.buffer_line,
            });
        }
    }

    fn finish(mut self) -> Option<ComponentNode> {
        self.flush();
        let mut node = self.node?;
        node.children = self.children;
        Some(node)
    }
}

/// Split a markdown document into segments
pub(crate) fn scan(markdown: &str) -> Result<Vec<Segment>, PipelineError> {
    let mut stack = vec![Frame::root()];
    let mut fence: Option<Fence> = None;
    let mut in_comment = false;

    for (idx, line) in markdown.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;

        for frame in stack.iter_mut() {
            if let Some(node) = frame.node.as_mut() {
                node.source.push_str(line);
            }
        }

        if let Some(open) = &fence {
            if open.is_closed_by(line) {
                fence = None;
            }
            current(&mut stack).push_line(line, line_no);
            continue;
        }

        if in_comment {
            in_comment = !line.contains("-->");
            current(&mut stack).push_line(line, line_no);
            continue;
        }

        if opens_comment(line) {
            in_comment = true;
            current(&mut stack).push_line(line, line_no);
            continue;
        }

        if let Some(open) = Fence::open(line, line_no) {
            fence = Some(open);
            current(&mut stack).push_line(line, line_no);
            continue;
        }

        let trimmed = line.trim();
        if indent_columns(line) < 4 && is_component_tag(trimmed) {
            if trimmed.starts_with("</") {
                close_component(&mut stack, trimmed, line_no)?;
            } else {
                open_component(&mut stack, trimmed, line, line_no)?;
            }
            continue;
        }

        current(&mut stack).push_line(line, line_no);
    }

    if let Some(open) = fence {
        return Err(PipelineError::parse(
            open.line,
            format!(
                "unterminated code fence opened with '{}'",
                open.marker.to_string().repeat(open.len)
            ),
        ));
    }

    if stack.len() > 1 {
        if let Some(node) = stack.last().and_then(|frame| frame.node.as_ref()) {
            return Err(PipelineError::parse(
                node.line,
                format!("unclosed component <{}>", node.name),
            ));
        }
    }

    let mut root = stack.pop().unwrap_or_else(Frame::root);
    root.flush();
    Ok(root.children)
}

/// An HTML comment block that does not close on its first line
fn opens_comment(line: &str) -> bool {
    if indent_columns(line) > 3 {
        return false;
    }
    match line.trim_start().strip_prefix("<!--") {
        Some(rest) => !rest.contains("-->"),
        None => false,
    }
}

/// Leading indentation in columns, tabs advancing to the next multiple of four
fn indent_columns(line: &str) -> usize {
    let mut columns = 0;
    for c in line.chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += 4 - columns % 4,
            _ => break,
        }
    }
    columns
}

fn current(stack: &mut [Frame]) -> &mut Frame {
    stack.last_mut().expect("scanner stack always holds the root frame")
}

fn is_component_tag(trimmed: &str) -> bool {
    let rest = trimmed
        .strip_prefix("</")
        .or_else(|| trimmed.strip_prefix('<'));
    rest.and_then(|r| r.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn open_component(
    stack: &mut Vec<Frame>,
    trimmed: &str,
    line: &str,
    line_no: usize,
) -> Result<(), PipelineError> {
    let caps = OPEN_TAG.captures(trimmed).ok_or_else(|| {
        PipelineError::parse(line_no, format!("invalid component tag: {}", trimmed))
    })?;
    let name = caps[1].to_string();
    let props = parse_props(&caps[2], line_no)?;
    let self_closing = &caps[3] == "/";
    let rest = &trimmed[caps[0].len()..];

    current(stack).flush();

    if self_closing {
        if !rest.trim().is_empty() {
            return Err(PipelineError::parse(
                line_no,
                format!("unexpected content after <{} />", name),
            ));
        }
        let node = ComponentNode {
            name,
            props,
            children: Vec::new(),
            line: line_no,
            source: line.to_string(),
        };
        current(stack).children.push(Segment::Component(node));
        return Ok(());
    }

    let close = format!("</{}>", name);
    let mut frame = Frame::component(name, props, line_no, line);

    if let Some(inner) = rest.trim_end().strip_suffix(close.as_str()) {
        if !inner.trim().is_empty() {
            frame.push_line(&format!("{}\n", inner.trim()), line_no);
        }
        if let Some(node) = frame.finish() {
            current(stack).children.push(Segment::Component(node));
        }
        return Ok(());
    }

    if !rest.trim().is_empty() {
        frame.push_line(&format!("{}\n", rest.trim()), line_no);
    }
    stack.push(frame);
    Ok(())
}

fn close_component(
    stack: &mut Vec<Frame>,
    trimmed: &str,
    line_no: usize,
) -> Result<(), PipelineError> {
    let caps = CLOSE_TAG.captures(trimmed).ok_or_else(|| {
        PipelineError::parse(line_no, format!("invalid closing tag: {}", trimmed))
    })?;
    let name = &caps[1];
    if caps[0].len() != trimmed.len() {
        return Err(PipelineError::parse(
            line_no,
            format!("unexpected content after </{}>", name),
        ));
    }

    let expected = stack
        .last()
        .and_then(|frame| frame.node.as_ref())
        .map(|node| node.name.clone());
    match expected {
        None => Err(PipelineError::parse(
            line_no,
            format!("closing tag </{}> has no matching opening tag", name),
        )),
        Some(open) if open != name => Err(PipelineError::parse(
            line_no,
            format!("expected </{}> but found </{}>", open, name),
        )),
        Some(_) => {
            if let Some(node) = stack.pop().and_then(Frame::finish) {
                current(stack).children.push(Segment::Component(node));
            }
            Ok(())
        }
    }
}

fn parse_props(attrs: &str, line_no: usize) -> Result<Props, PipelineError> {
    let mut props = Props::new();
    for caps in ATTRIBUTE.captures_iter(attrs) {
        let key = caps[1].to_string();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "true".to_string());
        if props.insert(key.clone(), value).is_some() {
            return Err(PipelineError::parse(
                line_no,
                format!("duplicate attribute '{}'", key),
            ));
        }
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(segment: &Segment) -> &ComponentNode {
        match segment {
            Segment::Component(node) => node,
            other => panic!("expected component, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_markdown_is_one_segment() {
        let segments = scan("# Title\n\nSome text.\n").unwrap();
        assert_eq!(
            segments,
            vec![Segment::Markdown {
                text: "# Title\n\nSome text.\n".to_string(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_block_component_with_props() {
        let md = "Intro\n\n<Callout kind=\"tip\" title='Heads up'>\nBe **careful**.\n</Callout>\n\nOutro\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 3);

        let node = component(&segments[1]);
        assert_eq!(node.name, "Callout");
        assert_eq!(node.line, 3);
        assert_eq!(
            node.props.iter().collect::<Vec<_>>(),
            vec![
                (&"kind".to_string(), &"tip".to_string()),
                (&"title".to_string(), &"Heads up".to_string())
            ]
        );
        assert_eq!(
            node.children,
            vec![Segment::Markdown {
                text: "Be **careful**.\n".to_string(),
                line: 4
            }]
        );
        assert_eq!(
            node.source,
            "<Callout kind=\"tip\" title='Heads up'>\nBe **careful**.\n</Callout>\n"
        );
        assert_eq!(
            segments[2],
            Segment::Markdown {
                text: "\nOutro\n".to_string(),
                line: 6
            }
        );
    }

    #[test]
    fn test_self_closing_and_one_line_forms() {
        let md = "<Figure src=\"/a.png\" alt=\"A\" />\n<Callout>Short note</Callout>\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(component(&segments[0]).children.is_empty());
        assert_eq!(
            component(&segments[1]).children,
            vec![Segment::Markdown {
                text: "Short note\n".to_string(),
                line: 2
            }]
        );
    }

    #[test]
    fn test_boolean_attribute() {
        let segments = scan("<Callout open />\n").unwrap();
        assert_eq!(component(&segments[0]).props["open"], "true");
    }

    #[test]
    fn test_nested_components() {
        let md = "<CodeSample>\n<Callout>\ninner\n</Callout>\n</CodeSample>\n";
        let segments = scan(md).unwrap();
        let outer = component(&segments[0]);
        assert_eq!(outer.name, "CodeSample");
        let inner = component(&outer.children[0]);
        assert_eq!(inner.name, "Callout");
        assert_eq!(inner.line, 2);
    }

    #[test]
    fn test_tags_inside_fences_are_literal() {
        let md = "```html\n<Callout>\n```\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(matches!(segments[0], Segment::Markdown { .. }));
    }

    #[test]
    fn test_unterminated_fence() {
        let err = scan("text\n\n```js\nconsole.log(1)\n").unwrap_err();
        assert_eq!(
            err,
            PipelineError::parse(3, "unterminated code fence opened with '```'")
        );
    }

    #[test]
    fn test_longer_fence_needs_longer_close() {
        assert!(scan("````\n```\n").is_err());
        assert!(scan("````\n```\n````\n").is_ok());
        assert!(scan("~~~\ncode\n~~~\n").is_ok());
    }

    #[test]
    fn test_unclosed_component() {
        let err = scan("a\n<Callout>\nbody\n").unwrap_err();
        assert_eq!(err, PipelineError::parse(2, "unclosed component <Callout>"));
    }

    #[test]
    fn test_mismatched_close() {
        let err = scan("<Callout>\nx\n</Figure>\n").unwrap_err();
        assert_eq!(
            err,
            PipelineError::parse(3, "expected </Callout> but found </Figure>")
        );
    }

    #[test]
    fn test_stray_close() {
        let err = scan("x\n</Callout>\n").unwrap_err();
        assert!(matches!(err, PipelineError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_invalid_tag_syntax() {
        let err = scan("<Callout kind={tip}>\nx\n</Callout>\n").unwrap_err();
        assert!(matches!(err, PipelineError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = scan("<Figure src=\"a\" src=\"b\" />\n").unwrap_err();
        assert_eq!(err, PipelineError::parse(1, "duplicate attribute 'src'"));
    }

    #[test]
    fn test_indented_tag_is_code() {
        let segments = scan("    <Callout>\n").unwrap();
        assert!(matches!(segments[0], Segment::Markdown { .. }));
    }

    #[test]
    fn test_tab_indented_tag_is_code() {
        let segments = scan("\t<Callout>\n").unwrap();
        assert_eq!(
            segments,
            vec![Segment::Markdown {
                text: "\t<Callout>\n".to_string(),
                line: 1
            }]
        );
        let segments = scan("  \t<Callout>\n").unwrap();
        assert!(matches!(segments[0], Segment::Markdown { .. }));
    }

    #[test]
    fn test_fence_inside_indented_code_is_literal() {
        let md = "Example of a fence:\n\n    ```\n    let x = 1;\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_indented_fence_marker_does_not_close() {
        let md = "```\n    ```\n<Callout>\n```\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(matches!(segments[0], Segment::Markdown { .. }));
    }

    #[test]
    fn test_tags_inside_comment_block_are_literal() {
        let md = "<!--\n<Tweet id=\"1\" />\n-->\n<Figure src=\"a\" />\n";
        let segments = scan(md).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            Segment::Markdown {
                text: "<!--\n<Tweet id=\"1\" />\n-->\n".to_string(),
                line: 1
            }
        );
        assert_eq!(component(&segments[1]).name, "Figure");
    }

    #[test]
    fn test_one_line_comment_does_not_open_block() {
        let segments = scan("<!-- note -->\n<Figure src=\"a\" />\n").unwrap();
        assert_eq!(component(&segments[1]).name, "Figure");
    }

    #[test]
    fn test_indent_columns() {
        assert_eq!(indent_columns("   x"), 3);
        assert_eq!(indent_columns("\tx"), 4);
        assert_eq!(indent_columns(" \tx"), 4);
        assert_eq!(indent_columns("x"), 0);
    }

    #[test]
    fn test_lowercase_html_is_markdown() {
        let segments = scan("<div>\nhi\n</div>\n").unwrap();
        assert_eq!(segments.len(), 1);
    }
}
