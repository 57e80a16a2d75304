//! Markdown compiler with embedded components and syntax highlighting

mod blocks;
mod compiler;
mod component;
mod highlight;
mod scan;

pub use blocks::{Block, CodeBlock, CompiledContent, ComponentBlock, HighlightSpan, Props};
pub use compiler::{compile, MarkdownCompiler, UnresolvedPolicy};
pub use component::{Callout, CodeSample, Component, ComponentRegistry, Figure};
pub use highlight::{stylesheet, SyntaxHighlighter, Transform, CLASS_PREFIX};
