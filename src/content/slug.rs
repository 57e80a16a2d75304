//! Slug normalization for page metadata

/// Turn a URL slug into a title-cased sentence.
///
/// Each hyphen-separated token gets an upper-case first character and a
/// lower-case remainder. Empty tokens are dropped, digits and punctuation
/// pass through, and non-ASCII letters follow Unicode case mapping.
///
/// # Examples
/// ```
/// assert_eq!(folio::content::normalize("my-first-post"), "My First Post");
/// ```
pub fn normalize(slug: &str) -> String {
    slug.split('-')
        .filter(|token| !token.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("my-first-post"), "My First Post");
        assert_eq!(normalize("a-b-c"), "A B C");
        assert_eq!(normalize("hello-world"), "Hello World");
    }

    #[test]
    fn test_normalize_mixed_case() {
        assert_eq!(normalize("rUST-IS-fun"), "Rust Is Fun");
    }

    #[test]
    fn test_normalize_empty_tokens() {
        assert_eq!(normalize("-leading--double-trailing-"), "Leading Double Trailing");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_digits_and_unicode() {
        assert_eq!(normalize("top-10-tips"), "Top 10 Tips");
        assert_eq!(normalize("2023-recap"), "2023 Recap");
        assert_eq!(normalize("über-café"), "Über Café");
    }
}
