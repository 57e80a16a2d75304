//! Front-matter parsing for locally stored posts

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::Tag;

/// Custom deserializer that handles both a single tag name and a list of them
fn tag_or_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct TagOrTags;

    impl<'de> Visitor<'de> for TagOrTags {
        type Value = Vec<Tag>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a tag name or a list of tag names")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![Tag::new(value)])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(name) = seq.next_element::<String>()? {
                tags.push(Tag::new(name));
            }
            Ok(tags)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(TagOrTags)
}

/// Front-matter of a post file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "cover_image", alias = "coverImage")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "tag_or_tags")]
    pub tags: Vec<Tag>,
}

impl FrontMatter {
    /// Split a post file into front-matter and markdown body.
    ///
    /// Files without a `---` block yield default front-matter and the whole
    /// content as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let trimmed = content.trim_start();
        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        match rest.find("\n---") {
            Some(end_pos) => {
                let yaml = &rest[..end_pos];
                let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);
                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                Ok((fm, body))
            }
            None => Ok((FrontMatter::default(), content)),
        }
    }

    /// Parse the date string into a UTC timestamp
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats post authors commonly write
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
cover: /img/hello.png
tags:
  - rust
  - web
---

This is the content."#;
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.cover.as_deref(), Some("/img/hello.png"));
        assert_eq!(fm.tags, vec![Tag::new("rust"), Tag::new("web")]);
        assert_eq!(body, "This is the content.");
        assert_eq!(
            fm.parse_date().unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_single_tag_and_alias() {
        let content = "---\ntitle: One\ncoverImage: /a.png\ntags: solo\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec![Tag::new("solo")]);
        assert_eq!(fm.cover.as_deref(), Some("/a.png"));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("# Just markdown").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "# Just markdown");
    }

    #[test]
    fn test_date_formats() {
        for s in ["2023-01-01", "2023-01-01T00:00:00Z", "2023-01-01 00:00"] {
            let dt = parse_date_string(s).unwrap();
            assert_eq!(dt.to_rfc3339(), "2023-01-01T00:00:00+00:00", "{}", s);
        }
        assert!(parse_date_string("last tuesday").is_none());
    }
}
