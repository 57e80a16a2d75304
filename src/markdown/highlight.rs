//! Post-parse transforms and the syntect highlighting pass

use std::sync::Arc;
use syntect::easy::ScopeRangeIterator;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::blocks::{for_each_code_block, Block, CodeBlock, HighlightSpan};
use crate::error::PipelineError;

/// Prefix of every highlighting class
pub const CLASS_PREFIX: &str = "hl-";

/// A pass over compiled blocks, run after parsing and before components render
pub trait Transform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, blocks: &mut [Block]) -> Result<(), PipelineError>;
}

/// Annotates code blocks with syntax highlighting classes
#[derive(Clone)]
pub struct SyntaxHighlighter {
    syntax_set: Arc<SyntaxSet>,
}

impl SyntaxHighlighter {
    /// Create a highlighter with the default syntax definitions
    pub fn new() -> Self {
        Self::with_syntax_set(Arc::new(SyntaxSet::load_defaults_newlines()))
    }

    pub fn with_syntax_set(syntax_set: Arc<SyntaxSet>) -> Self {
        Self { syntax_set }
    }

    /// Highlight one code block in place; its literal text is never changed
    pub fn highlight(&self, block: &mut CodeBlock) {
        let syntax = self.find_syntax(block.language.as_deref(), &block.literal);

        let spans = match self.tokenize(&block.literal, syntax) {
            Ok(spans) => spans,
            Err(e) => {
                tracing::warn!("Failed to highlight {} block: {}", syntax.name, e);
                vec![HighlightSpan {
                    class: format!("{}text", CLASS_PREFIX),
                    text: block.literal.clone(),
                }]
            }
        };

        block.syntax = Some(syntax.name.clone());
        block.spans = spans;
    }

    /// Declared language first (by token, then extension), then first-line detection
    fn find_syntax(&self, language: Option<&str>, code: &str) -> &SyntaxReference {
        let found = match language {
            Some(lang) => self
                .syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang)),
            None => self.syntax_set.find_syntax_by_first_line(code),
        };
        found.unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn tokenize(&self, code: &str, syntax: &SyntaxReference) -> Result<Vec<HighlightSpan>, String> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut spans: Vec<HighlightSpan> = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state
                .parse_line(line, &self.syntax_set)
                .map_err(|e| e.to_string())?;

            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack.apply(op).map_err(|e| format!("{:?}", e))?;
                if range.is_empty() {
                    continue;
                }
                push_span(&mut spans, scope_class(&stack), &line[range]);
            }
        }

        Ok(spans)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for SyntaxHighlighter {
    fn name(&self) -> &'static str {
        "syntax-highlight"
    }

    fn apply(&self, blocks: &mut [Block]) -> Result<(), PipelineError> {
        for_each_code_block(blocks, &mut |code| self.highlight(code));
        Ok(())
    }
}

/// Class list for the innermost scope, e.g. `hl-keyword hl-control hl-js`
fn scope_class(stack: &ScopeStack) -> String {
    match stack.as_slice().last() {
        Some(scope) => scope
            .build_string()
            .split('.')
            .map(|atom| format!("{}{}", CLASS_PREFIX, atom))
            .collect::<Vec<_>>()
            .join(" "),
        None => format!("{}text", CLASS_PREFIX),
    }
}

/// Append text, merging with the previous span when the class matches
fn push_span(spans: &mut Vec<HighlightSpan>, class: String, text: &str) {
    if let Some(last) = spans.last_mut() {
        if last.class == class {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(HighlightSpan {
        class,
        text: text.to_string(),
    });
}

/// Stylesheet for the highlighting classes, built from a syntect theme
pub fn stylesheet(theme_name: &str) -> anyhow::Result<String> {
    let theme_set = ThemeSet::load_defaults();
    let theme = match theme_set.themes.get(theme_name) {
        Some(theme) => theme,
        None => {
            tracing::warn!("Unknown highlight theme '{}', using default", theme_name);
            theme_set
                .themes
                .values()
                .next()
                .ok_or_else(|| anyhow::anyhow!("No themes available"))?
        }
    };

    let css = css_for_theme_with_class_style(theme, ClassStyle::SpacedPrefixed { prefix: CLASS_PREFIX })?;
    Ok(css)
}
