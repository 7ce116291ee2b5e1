//! Rich-text note markup handling.
//!
//! Note bodies are HTML produced by the editor toolbar. Stored markup is never
//! trusted: it is cleaned against an allow-list before it is written and again
//! before it is rendered.

use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

/// Tags the editor toolbar can produce.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "s", "strike", "h1", "h2", "ol", "ul", "li", "a",
    "img", "blockquote", "code", "pre",
];

const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

static BLOCK_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|li|h1|h2|blockquote|pre)>").expect("block boundary regex")
});

fn sanitizer() -> Builder<'static> {
    let mut builder = Builder::empty();
    builder
        .add_tags(ALLOWED_TAGS)
        .add_tag_attributes("a", &["href", "title"])
        .add_tag_attributes("img", &["src", "alt"])
        .add_url_schemes(ALLOWED_URL_SCHEMES)
        .add_clean_content_tags(&["script", "style"])
        .link_rel(Some("noopener noreferrer"));
    builder
}

/// Clean note markup against the editor allow-list.
///
/// Scripts, event-handler attributes, inline styles and non-http(s) links are
/// removed; allowed formatting is kept.
#[must_use]
pub fn sanitize_html(markup: &str) -> String {
    sanitizer().clean(markup).to_string()
}

/// Extract readable text from note markup, one line per block element.
#[must_use]
pub fn to_plain_text(markup: &str) -> String {
    let with_breaks = BLOCK_BOUNDARY.replace_all(markup, "\n");
    let mut stripper = Builder::empty();
    stripper.add_clean_content_tags(&["script", "style"]);
    let text = decode_entities(&stripper.clean(&with_breaks).to_string());

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap plain text as note markup, one paragraph per non-empty line.
#[must_use]
pub fn from_plain_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", escape_text(line)))
        .collect()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_toolbar_formatting() {
        let markup = "<h1>Title</h1><p><strong>bold</strong> <em>it</em> <u>u</u> <s>s</s></p><ol><li>one</li></ol>";
        assert_eq!(sanitize_html(markup), markup);
    }

    #[test]
    fn removes_scripts_and_event_handlers() {
        let cleaned = sanitize_html(
            r#"<p onclick="steal()">hi</p><script>alert(1)</script><img src="x.png" onerror="steal()">"#,
        );
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("alert"));
        assert!(!cleaned.contains("onclick"));
        assert!(!cleaned.contains("onerror"));
        assert!(cleaned.contains("<p>hi</p>"));
    }

    #[test]
    fn drops_javascript_links_and_marks_external_links() {
        let cleaned = sanitize_html(
            r#"<a href="javascript:steal()">bad</a><a href="https://example.com">good</a>"#,
        );
        assert!(!cleaned.contains("javascript"));
        assert!(cleaned.contains(r#"href="https://example.com""#));
        assert!(cleaned.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn plain_text_splits_blocks_and_decodes_entities() {
        assert_eq!(
            to_plain_text("<p>Fish &amp; chips</p><p>line<br>break</p>"),
            "Fish & chips\nline\nbreak"
        );
        assert_eq!(to_plain_text("<p><br></p>"), "");
        assert_eq!(to_plain_text("plain text"), "plain text");
    }

    #[test]
    fn plain_text_becomes_escaped_paragraphs() {
        let markup = from_plain_text("Fish & chips\n\n  <b>not bold</b>  ");
        assert_eq!(
            markup,
            "<p>Fish &amp; chips</p><p>&lt;b&gt;not bold&lt;/b&gt;</p>"
        );
        assert_eq!(to_plain_text(&markup), "Fish & chips\n<b>not bold</b>");
    }
}
