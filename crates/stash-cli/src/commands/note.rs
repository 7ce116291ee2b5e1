use std::io::Write;

use serde::Serialize;
use stash_core::markup::from_plain_text;
use stash_core::store::{BookmarkStore, NoteStore};
use stash_core::{Library, Note, NoteInput};

use crate::cli::NoteCommands;
use crate::commands::common::{
    format_note_lines, note_to_list_item, resolve_by_prefix, NoteListItem,
};
use crate::commands::share::run_note_share;
use crate::editor::{note_text, Editor};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct NoteDetail<'a> {
    id: &'a str,
    title: &'a str,
    text: String,
    content: &'a str,
}

pub async fn run_note<S, W>(
    command: NoteCommands,
    library: &Library<S>,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    match command {
        NoteCommands::List { json } => run_note_list(library, json, out).await,
        NoteCommands::Show { id, json } => run_note_show(library, &id, json, out).await,
        NoteCommands::Add { title, content } => {
            let text = note_text(&content)?;
            run_note_add(library, &title, &text, out).await
        }
        NoteCommands::Edit { id, title, content } => {
            let editor = Editor::from_env();
            run_note_edit(library, &id, title.as_deref(), &content, &editor, out).await
        }
        NoteCommands::Delete { id } => run_note_delete(library, &id, out).await,
        NoteCommands::Share { id, email } => run_note_share(library, &id, email, out).await,
    }
}

pub async fn run_note_list<S, W>(
    library: &Library<S>,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let notes = library.notes().await?;
    if as_json {
        let items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
    } else {
        for line in format_note_lines(&notes) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

pub async fn run_note_show<S, W>(
    library: &Library<S>,
    id: &str,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let note = resolve_note(library, id).await?;
    if as_json {
        let detail = NoteDetail {
            id: note.id.as_str(),
            title: &note.title,
            text: note.plain_text(),
            content: &note.content,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
    } else {
        writeln!(out, "{}", note.title)?;
        writeln!(out)?;
        writeln!(out, "{}", note.plain_text())?;
    }
    Ok(())
}

/// Create a note from plain text; each line becomes a paragraph.
pub async fn run_note_add<S, W>(
    library: &Library<S>,
    title: &str,
    text: &str,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let note = library
        .create_note(NoteInput::new(title, from_plain_text(text)))
        .await?;
    writeln!(out, "{}", note.id)?;
    Ok(())
}

/// A note body as it is opened in the external editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditableBody {
    /// Paragraph-only notes are edited as plain lines.
    Plain(String),
    /// Anything with formatting is edited as markup so nothing is lost.
    Markup(String),
}

impl EditableBody {
    pub fn of(note: &Note) -> Self {
        let text = note.plain_text();
        if from_plain_text(&text) == note.content {
            Self::Plain(text)
        } else {
            Self::Markup(note.content.clone())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Markup(text) => text,
        }
    }

    /// Stored markup for what was saved in the editor.
    pub fn content_from(&self, edited: &str) -> String {
        match self {
            Self::Plain(_) => from_plain_text(edited),
            Self::Markup(_) => edited.to_string(),
        }
    }
}

pub async fn run_note_edit<S, W>(
    library: &Library<S>,
    id: &str,
    title: Option<&str>,
    content_parts: &[String],
    editor: &Editor,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let note = resolve_note(library, id).await?;

    let content = if !content_parts.is_empty() {
        from_plain_text(&content_parts.join(" "))
    } else if title.is_some() {
        note.content.clone()
    } else {
        let body = EditableBody::of(&note);
        let Some(edited) = editor.edit(body.text())? else {
            return Err(CliError::EmptyEditedContent);
        };
        if edited == body.text() {
            writeln!(out, "{}", note.id)?;
            return Ok(());
        }
        body.content_from(&edited)
    };

    let input = NoteInput::new(title.unwrap_or(note.title.as_str()), content);
    let updated = Note::from_input(note.id.clone(), input);
    if updated == note {
        writeln!(out, "{}", note.id)?;
        return Ok(());
    }

    let saved = library.update_note(&updated).await?;
    writeln!(out, "{}", saved.id)?;
    Ok(())
}

pub async fn run_note_delete<S, W>(
    library: &Library<S>,
    id: &str,
    out: &mut W,
) -> Result<(), CliError>
where
    S: BookmarkStore + NoteStore,
    W: Write,
{
    let note = resolve_note(library, id).await?;
    library.delete_note(&note.id).await?;
    writeln!(out, "{}", note.id)?;
    Ok(())
}

pub async fn resolve_note<S>(library: &Library<S>, id: &str) -> Result<Note, CliError>
where
    S: BookmarkStore + NoteStore,
{
    let notes = library.notes().await?;
    resolve_by_prefix(&notes, id, "Note", |note| note.id.as_str())
}
