//! Error taxonomy for the post rendering pipeline

use thiserror::Error;

/// Errors raised while fetching, compiling, or rendering a post.
///
/// Every stage surfaces these unmodified to the page boundary; nothing
/// retries internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No post matches the requested slug
    #[error("no post found for slug '{slug}'")]
    NotFound { slug: String },

    /// The content source could not be reached or returned malformed data
    #[error("content source unavailable: {0}")]
    SourceUnavailable(String),

    /// Malformed markdown or embedded component syntax
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Markdown references a component missing from the registry
    #[error("unresolved component <{name}> at line {line}")]
    UnresolvedComponent { name: String, line: usize },
}

impl PipelineError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        PipelineError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably try the same request again
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::SourceUnavailable(_))
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::SourceUnavailable(err.to_string())
    }
}
