//! Validated, cached access to bookmarks and notes.
//!
//! Reads go through the [`QueryClient`]; writes are checked first, then run as
//! mutations so that a successful write invalidates the matching reads.

use std::sync::Arc;

use crate::error::Result;
use crate::filter::{filter_bookmarks, filter_notes};
use crate::markup::sanitize_html;
use crate::models::{Bookmark, BookmarkId, BookmarkInput, Note, NoteId, NoteInput};
use crate::query::{EntityTag, QueryClient, QueryKey};
use crate::store::{BookmarkStore, NoteStore};

pub struct Library<S> {
    store: Arc<S>,
    client: QueryClient,
}

impl<S> Clone for Library<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            client: self.client.clone(),
        }
    }
}

impl<S> Library<S>
where
    S: BookmarkStore + NoteStore,
{
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_client(store, QueryClient::new())
    }

    #[must_use]
    pub fn with_client(store: S, client: QueryClient) -> Self {
        Self {
            store: Arc::new(store),
            client,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &QueryClient {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.client
            .fetch(QueryKey::all(EntityTag::Bookmarks), || {
                self.store.list_bookmarks()
            })
            .await
    }

    /// Bookmarks whose title or description contains `query`.
    pub async fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>> {
        let bookmarks = self.bookmarks().await?;
        Ok(filter_bookmarks(&bookmarks, query))
    }

    pub async fn create_bookmark(&self, input: BookmarkInput) -> Result<Bookmark> {
        let input = input.normalized();
        input.check()?;
        self.client
            .mutate(EntityTag::Bookmarks, self.store.create_bookmark(&input))
            .await
    }

    pub async fn update_bookmark(&self, bookmark: &Bookmark) -> Result<Bookmark> {
        let input = bookmark.to_input().normalized();
        input.check()?;
        let bookmark = Bookmark::from_input(bookmark.id.clone(), input);
        self.client
            .mutate(EntityTag::Bookmarks, self.store.update_bookmark(&bookmark))
            .await
    }

    pub async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()> {
        self.client
            .mutate(EntityTag::Bookmarks, self.store.delete_bookmark(id))
            .await
    }

    pub async fn notes(&self) -> Result<Vec<Note>> {
        self.client
            .fetch(QueryKey::all(EntityTag::Notes), || self.store.list_notes())
            .await
    }

    /// Notes whose title or text contains `query`.
    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self.notes().await?;
        Ok(filter_notes(&notes, query))
    }

    /// One note, or `None` if it does not exist.
    pub async fn note(&self, id: &NoteId) -> Result<Option<Note>> {
        self.client
            .fetch(QueryKey::one(EntityTag::Notes, id.as_str()), || {
                self.store.get_note(id)
            })
            .await
    }

    pub async fn create_note(&self, input: NoteInput) -> Result<Note> {
        let input = sanitized(input);
        input.check()?;
        self.client
            .mutate(EntityTag::Notes, self.store.create_note(&input))
            .await
    }

    pub async fn update_note(&self, note: &Note) -> Result<Note> {
        let input = sanitized(note.to_input());
        input.check()?;
        let note = Note::from_input(note.id.clone(), input);
        self.client
            .mutate(EntityTag::Notes, self.store.update_note(&note))
            .await
    }

    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.client
            .mutate(EntityTag::Notes, self.store.delete_note(id))
            .await
    }
}

/// Trimmed title and allow-listed markup, ready for `check()`.
fn sanitized(input: NoteInput) -> NoteInput {
    let input = input.normalized();
    NoteInput {
        content: sanitize_html(&input.content),
        ..input
    }
}
