//! Share helpers: clipboard text and `mailto:` links for records.

use crate::models::{Bookmark, Note};

const BOOKMARK_MAIL_SUBJECT: &str = "Check out this bookmark";

/// Text placed on the clipboard when copying a bookmark (its URL).
#[must_use]
pub fn bookmark_clipboard_text(bookmark: &Bookmark) -> String {
    bookmark.url.clone()
}

/// A `mailto:` link that sends a bookmark to a recipient chosen in the mail client.
#[must_use]
pub fn bookmark_mailto(bookmark: &Bookmark) -> String {
    let body = format!(
        "{}\r\nURL: {}\r\n{}",
        bookmark.title, bookmark.url, bookmark.description
    );
    mailto(BOOKMARK_MAIL_SUBJECT, &body)
}

/// Text placed on the clipboard when copying a note.
#[must_use]
pub fn note_clipboard_text(note: &Note) -> String {
    format!("Title: {}\nContent: {}", note.title, note.plain_text())
}

/// A `mailto:` link carrying the note title and its plain text.
#[must_use]
pub fn note_mailto(note: &Note) -> String {
    let body = format!("{}\n{}", note.title, note.plain_text());
    mailto(&note.title, &body)
}

fn mailto(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
