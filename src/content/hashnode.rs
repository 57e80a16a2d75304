//! Hashnode GraphQL content source

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::post::PostRecord;
use super::{ContentSource, Post};
use crate::error::PipelineError;

/// GraphQL lookup for a single post on a publication
const POST_QUERY: &str = r#"query PostBySlug($slug: String!, $hostname: String!) {
  post(slug: $slug, hostname: $hostname) {
    title
    contentMarkdown
    coverImage
    dateAdded
    tags { name }
  }
}"#;

/// Fetches posts from a Hashnode publication
#[derive(Debug, Clone)]
pub struct HashnodeSource {
    client: reqwest::Client,
    endpoint: String,
    hostname: String,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    slug: &'a str,
    hostname: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<PostData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct PostData {
    post: Option<PostRecord>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl HashnodeSource {
    /// Create a source for the publication at `hostname`
    pub fn new(endpoint: &str, hostname: &str) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            hostname: hostname.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentSource for HashnodeSource {
    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Post, PipelineError> {
        tracing::debug!("Fetching post '{}' from {}", slug, self.endpoint);

        let request = GraphQlRequest {
            query: POST_QUERY,
            variables: Variables {
                slug,
                hostname: &self.hostname,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::SourceUnavailable(format!(
                "{} responded with {}",
                self.endpoint, status
            )));
        }

        let body = response.bytes().await?;
        decode_response(slug, &body)
    }
}

/// Decode a GraphQL response body into a post
fn decode_response(slug: &str, body: &[u8]) -> Result<Post, PipelineError> {
    let response: GraphQlResponse = serde_json::from_slice(body)
        .map_err(|e| PipelineError::SourceUnavailable(format!("malformed response: {}", e)))?;

    if let Some(error) = response.errors.first() {
        return Err(PipelineError::SourceUnavailable(format!(
            "content source error: {}",
            error.message
        )));
    }

    let data = response
        .data
        .ok_or_else(|| PipelineError::SourceUnavailable("response carried no data".to_string()))?;

    match data.post {
        Some(record) => Ok(record.into_post(slug)),
        None => Err(PipelineError::NotFound {
            slug: slug.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_post() {
        let body = br##"{"data": {"post": {
            "title": "Hello World",
            "contentMarkdown": "# Hi",
            "coverImage": "/img/hw.png",
            "dateAdded": "2023-01-01T00:00:00Z",
            "tags": [{"name": "intro"}]
        }}}"##;
        let post = decode_response("hello-world", body).unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.tags.len(), 1);
    }

    #[test]
    fn test_decode_missing_post_is_not_found() {
        let body = br#"{"data": {"post": null}}"#;
        let err = decode_response("nope", body).unwrap_err();
        assert_eq!(
            err,
            PipelineError::NotFound {
                slug: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_decode_wrong_shape_is_unavailable() {
        let body = br#"{"data": {"post": {"title": "Only a title"}}}"#;
        let err = decode_response("x", body).unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable(_)));

        let err = decode_response("x", b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    }

    #[test]
    fn test_decode_graphql_errors() {
        let body = br#"{"data": null, "errors": [{"message": "rate limited"}]}"#;
        let err = decode_response("x", body).unwrap_err();
        assert_eq!(
            err,
            PipelineError::SourceUnavailable("content source error: rate limited".to_string())
        );
    }

    #[test]
    fn test_request_shape() {
        let request = GraphQlRequest {
            query: POST_QUERY,
            variables: Variables {
                slug: "hello-world",
                hostname: "blog.example.com",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["variables"]["slug"], "hello-world");
        assert_eq!(json["variables"]["hostname"], "blog.example.com");
        assert!(json["query"].as_str().unwrap().contains("contentMarkdown"));
    }
}
