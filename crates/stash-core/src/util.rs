//! Small text and time helpers.

use url::Url;

/// Longest upstream error body echoed back to the user.
const ERROR_TEXT_LIMIT: usize = 180;

/// Trimmed `value`, or `None` when it is missing or blank.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Whether `value` parses as an absolute http or https URL.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(ERROR_TEXT_LIMIT).collect()
}

pub fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Collapse runs of whitespace, then cut to `max_chars` ending in `...`.
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    let words = value.split_whitespace().collect::<Vec<_>>().join(" ");
    match words.char_indices().nth(max_chars) {
        None => words,
        Some(_) => {
            let keep = max_chars.saturating_sub(3);
            let head: String = words.chars().take(keep).collect();
            format!("{head}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_text_is_dropped() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("\t \n".into())), None);
        assert_eq!(
            normalize_text_option(Some("  Reading list ".into())).as_deref(),
            Some("Reading list")
        );
    }

    #[test]
    fn only_web_schemes_count_as_links() {
        for link in ["https://docs.rs/tokio", "http://127.0.0.1:54321", "HTTPS://Example.org"] {
            assert!(is_http_url(link), "{link}");
        }
        for other in ["docs.rs", "mailto:me@example.org", "file:///etc/hosts", "http://"] {
            assert!(!is_http_url(other), "{other}");
        }
    }

    #[test]
    fn error_text_is_capped() {
        let body = format!("  {}  ", "x".repeat(500));
        assert_eq!(compact_text(&body).len(), ERROR_TEXT_LIMIT);
    }

    #[test]
    fn ellipsize_keeps_short_text_whole() {
        assert_eq!(ellipsize("Rust \n  book", 12), "Rust book");
        assert_eq!(ellipsize("exactly ten", 11), "exactly ten");
        assert_eq!(ellipsize("Release notes for the next version", 16), "Release notes...");
    }
}
