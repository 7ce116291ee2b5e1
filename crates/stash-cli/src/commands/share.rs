use std::io::Write;

use stash_core::share::{bookmark_clipboard_text, bookmark_mailto, note_clipboard_text, note_mailto};
use stash_core::store::{BookmarkStore, NoteStore};
use stash_core::Library;

use crate::commands::bookmark::resolve_bookmark;
use crate::commands::note::resolve_note;
use crate::error::CliError;

pub async fn run_bookmark_share<S, W>(
    library: &Library<S>,
    id: &str,
    as_email: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let bookmark = resolve_bookmark(library, id).await?;
    let rendered = if as_email {
        bookmark_mailto(&bookmark)
    } else {
        bookmark_clipboard_text(&bookmark)
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

pub async fn run_note_share<S, W>(
    library: &Library<S>,
    id: &str,
    as_email: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let note = resolve_note(library, id).await?;
    let rendered = if as_email {
        note_mailto(&note)
    } else {
        note_clipboard_text(&note)
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
