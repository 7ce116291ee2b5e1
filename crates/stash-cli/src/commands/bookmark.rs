use std::io::Write;

use stash_core::store::{BookmarkStore, NoteStore};
use stash_core::{Bookmark, BookmarkInput, Library};

use crate::cli::{BookmarkCommands, BookmarkFields};
use crate::commands::common::{format_bookmark_lines, resolve_by_prefix};
use crate::commands::share::run_bookmark_share;
use crate::error::CliError;

pub async fn run_bookmark<S, W>(
    command: BookmarkCommands,
    library: &Library<S>,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    match command {
        BookmarkCommands::List { json } => run_bookmark_list(library, json, out).await,
        BookmarkCommands::Add {
            title,
            url,
            description,
        } => {
            let input = BookmarkInput::new(title, url, description);
            run_bookmark_add(library, input, out).await
        }
        BookmarkCommands::Edit { id, fields } => run_bookmark_edit(library, &id, fields, out).await,
        BookmarkCommands::Delete { id } => run_bookmark_delete(library, &id, out).await,
        BookmarkCommands::Share { id, email } => run_bookmark_share(library, &id, email, out).await,
    }
}

pub async fn run_bookmark_list<S, W>(
    library: &Library<S>,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let bookmarks = library.bookmarks().await?;
    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&bookmarks)?)?;
    } else {
        for line in format_bookmark_lines(&bookmarks) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

pub async fn run_bookmark_add<S, W>(
    library: &Library<S>,
    input: BookmarkInput,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let bookmark = library.create_bookmark(input).await?;
    writeln!(out, "{}", bookmark.id)?;
    Ok(())
}

pub async fn run_bookmark_edit<S, W>(
    library: &Library<S>,
    id: &str,
    fields: BookmarkFields,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    if fields == BookmarkFields::default() {
        return Err(CliError::NothingToEdit);
    }

    let existing = resolve_bookmark(library, id).await?;
    let updated = apply_fields(&existing, fields);
    if updated == existing {
        writeln!(out, "{}", existing.id)?;
        return Ok(());
    }

    let saved = library.update_bookmark(&updated).await?;
    writeln!(out, "{}", saved.id)?;
    Ok(())
}

pub async fn run_bookmark_delete<S, W>(
    library: &Library<S>,
    id: &str,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let bookmark = resolve_bookmark(library, id).await?;
    library.delete_bookmark(&bookmark.id).await?;
    writeln!(out, "{}", bookmark.id)?;
    Ok(())
}

pub async fn resolve_bookmark<S>(library: &Library<S>, id: &str) -> Result<Bookmark, CliError>
where
    S: BookmarkStore + NoteStore,
{
    let bookmarks = library.bookmarks().await?;
    resolve_by_prefix(&bookmarks, id, "Bookmark", |bookmark| bookmark.id.as_str())
}

fn apply_fields(existing: &Bookmark, fields: BookmarkFields) -> Bookmark {
    let current = existing.to_input();
    let input = BookmarkInput::new(
        fields.title.unwrap_or(current.title),
        fields.url.unwrap_or(current.url),
        fields.description.unwrap_or(current.description),
    );
    Bookmark::from_input(existing.id.clone(), input)
}
