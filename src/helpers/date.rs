//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "January 1, 2023"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Generate a <time> HTML element
pub fn time_tag<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let datetime = date.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    format!(
        r#"<time datetime="{}">{}</time>"#,
        datetime,
        format_date(date, format)
    )
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    // One pass over the input; literal '%' becomes "%%"
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;
    'outer: while let Some(c) = rest.chars().next() {
        for (from, to) in replacements {
            if let Some(tail) = rest.strip_prefix(from) {
                result.push_str(to);
                rest = tail;
                continue 'outer;
            }
        }
        if c == '%' {
            result.push_str("%%");
        } else {
            result.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-05");
        assert_eq!(format_date(&date, "MMMM D, YYYY"), "January 5, 2024");
        assert_eq!(format_date(&date, "MMM DD YYYY"), "Jan 05 2024");
    }

    #[test]
    fn test_time_tag() {
        let date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            time_tag(&date, "MMMM D, YYYY"),
            r#"<time datetime="2023-01-01T00:00:00+00:00">January 1, 2023</time>"#
        );
    }

    #[test]
    fn test_literal_percent() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "D% MMMM"), "5% January");
        assert_eq!(format_date(&date, "100%"), "100%");
        assert_eq!(moment_to_chrono_format("%Y"), "%%Y");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("MMMM D, YYYY"), "%B %-d, %Y");
    }
}
