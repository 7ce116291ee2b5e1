use std::io::Write;

use serde::Serialize;
use stash_core::store::{BookmarkStore, NoteStore};
use stash_core::{Bookmark, Library};

use crate::commands::common::{
    format_bookmark_lines, format_note_lines, normalize_search_query, note_to_list_item,
    NoteListItem,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SearchResults<'a> {
    bookmarks: &'a [Bookmark],
    notes: Vec<NoteListItem>,
}

/// Case-insensitive search over bookmark title/description and note
/// title/text.
pub async fn run_search<S, W>(
    library: &Library<S>,
    query: &str,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let query = normalize_search_query(query)?;
    let bookmarks = library.search_bookmarks(&query).await?;
    let notes = library.search_notes(&query).await?;

    if as_json {
        let results = SearchResults {
            bookmarks: &bookmarks,
            notes: notes.iter().map(note_to_list_item).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
        return Ok(());
    }

    if !bookmarks.is_empty() {
        writeln!(out, "Bookmarks")?;
        for line in format_bookmark_lines(&bookmarks) {
            writeln!(out, "  {line}")?;
        }
    }
    if !notes.is_empty() {
        writeln!(out, "Notes")?;
        for line in format_note_lines(&notes) {
            writeln!(out, "  {line}")?;
        }
    }
    if bookmarks.is_empty() && notes.is_empty() {
        writeln!(out, "No matches for '{query}'")?;
    }
    Ok(())
}
