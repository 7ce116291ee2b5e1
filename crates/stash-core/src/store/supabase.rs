use serde::Serialize;

use super::{BookmarkStore, NoteStore};
use crate::auth::SessionSlot;
use crate::error::{Error, Result};
use crate::models::{Bookmark, BookmarkId, BookmarkInput, Note, NoteId, NoteInput};
use crate::remote::RestClient;

pub const BOOKMARKS_TABLE: &str = "bookmarks";
pub const NOTES_TABLE: &str = "notes";

/// Store backed by the remote `bookmarks` and `notes` tables.
#[derive(Clone)]
pub struct SupabaseStore {
    rest: RestClient,
}

#[derive(Serialize)]
struct BookmarkRow<'a> {
    title: &'a str,
    url: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct NoteRow<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct NewNoteRow<'a> {
    title: &'a str,
    content: &'a str,
    user_id: &'a str,
}

impl SupabaseStore {
    #[must_use]
    pub const fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionSlot {
        self.rest.session()
    }
}

impl BookmarkStore for SupabaseStore {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.rest.select(BOOKMARKS_TABLE).await
    }

    async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark> {
        let row = BookmarkRow {
            title: &input.title,
            url: &input.url,
            description: &input.description,
        };
        let bookmark: Bookmark = self.rest.insert(BOOKMARKS_TABLE, &row).await?;
        tracing::info!(id = %bookmark.id, "Created bookmark");
        Ok(bookmark)
    }

    async fn update_bookmark(&self, bookmark: &Bookmark) -> Result<Bookmark> {
        let row = BookmarkRow {
            title: &bookmark.title,
            url: &bookmark.url,
            description: &bookmark.description,
        };
        self.rest
            .update(BOOKMARKS_TABLE, bookmark.id.as_str(), &row)
            .await
    }

    async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()> {
        self.rest.delete(BOOKMARKS_TABLE, id.as_str()).await
    }
}

impl NoteStore for SupabaseStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.rest.select(NOTES_TABLE).await
    }

    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        self.rest.select_one(NOTES_TABLE, id.as_str()).await
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note> {
        let user_id = self.session().user_id().ok_or(Error::Unauthenticated)?;
        let row = NewNoteRow {
            title: &input.title,
            content: &input.content,
            user_id: &user_id,
        };
        let note: Note = self.rest.insert(NOTES_TABLE, &row).await?;
        tracing::info!(id = %note.id, "Created note");
        Ok(note)
    }

    async fn update_note(&self, note: &Note) -> Result<Note> {
        let row = NoteRow {
            title: &note.title,
            content: &note.content,
        };
        self.rest.update(NOTES_TABLE, note.id.as_str(), &row).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.rest.delete(NOTES_TABLE, id.as_str()).await
    }
}
