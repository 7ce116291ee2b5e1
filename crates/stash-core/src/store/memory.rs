use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use super::{BookmarkStore, NoteStore};
use crate::error::{Error, Result};
use crate::models::{Bookmark, BookmarkId, BookmarkInput, Note, NoteId, NoteInput};

/// One kind of store operation, used to count calls and inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCall {
    ListBookmarks,
    CreateBookmark,
    UpdateBookmark,
    DeleteBookmark,
    ListNotes,
    GetNote,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

#[derive(Default)]
struct MemoryState {
    bookmarks: Vec<Bookmark>,
    notes: Vec<Note>,
    calls: HashMap<StoreCall, usize>,
    failures: HashMap<StoreCall, usize>,
}

/// In-process store, primarily for tests and offline demos.
///
/// Clones share state. Each operation counts as one remote call.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(bookmarks: Vec<Bookmark>, notes: Vec<Note>) -> Self {
        let store = Self::default();
        {
            let mut state = store.lock();
            state.bookmarks = bookmarks;
            state.notes = notes;
        }
        store
    }

    /// Number of times `call` has been issued.
    #[must_use]
    pub fn calls(&self, call: StoreCall) -> usize {
        self.lock().calls.get(&call).copied().unwrap_or(0)
    }

    /// Total operations issued.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.lock().calls.values().sum()
    }

    /// Make the next `call` fail with a service error.
    pub fn fail_next(&self, call: StoreCall) {
        *self.lock().failures.entry(call).or_insert(0) += 1;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, call: StoreCall) -> Result<std::sync::MutexGuard<'_, MemoryState>> {
        let mut state = self.lock();
        *state.calls.entry(call).or_insert(0) += 1;
        if let Some(remaining) = state.failures.get_mut(&call) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::Api {
                    status: 503,
                    message: format!("injected failure for {call:?}"),
                });
            }
        }
        Ok(state)
    }
}

fn next_id() -> String {
    Uuid::now_v7().to_string()
}

impl BookmarkStore for MemoryStore {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        Ok(self.begin(StoreCall::ListBookmarks)?.bookmarks.clone())
    }

    async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark> {
        let mut state = self.begin(StoreCall::CreateBookmark)?;
        let bookmark = Bookmark::from_input(BookmarkId::new(next_id()), input.clone());
        state.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn update_bookmark(&self, bookmark: &Bookmark) -> Result<Bookmark> {
        let mut state = self.begin(StoreCall::UpdateBookmark)?;
        let slot = state
            .bookmarks
            .iter_mut()
            .find(|existing| existing.id == bookmark.id)
            .ok_or_else(|| Error::NotFound(format!("bookmarks/{}", bookmark.id)))?;
        *slot = bookmark.clone();
        Ok(bookmark.clone())
    }

    async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()> {
        let mut state = self.begin(StoreCall::DeleteBookmark)?;
        let before = state.bookmarks.len();
        state.bookmarks.retain(|bookmark| &bookmark.id != id);
        if state.bookmarks.len() == before {
            return Err(Error::NotFound(format!("bookmarks/{id}")));
        }
        Ok(())
    }
}

impl NoteStore for MemoryStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.begin(StoreCall::ListNotes)?.notes.clone())
    }

    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        let state = self.begin(StoreCall::GetNote)?;
        Ok(state.notes.iter().find(|note| &note.id == id).cloned())
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note> {
        let mut state = self.begin(StoreCall::CreateNote)?;
        let note = Note::from_input(NoteId::new(next_id()), input.clone());
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, note: &Note) -> Result<Note> {
        let mut state = self.begin(StoreCall::UpdateNote)?;
        let slot = state
            .notes
            .iter_mut()
            .find(|existing| existing.id == note.id)
            .ok_or_else(|| Error::NotFound(format!("notes/{}", note.id)))?;
        *slot = note.clone();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let mut state = self.begin(StoreCall::DeleteNote)?;
        let before = state.notes.len();
        state.notes.retain(|note| &note.id != id);
        if state.notes.len() == before {
            return Err(Error::NotFound(format!("notes/{id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_ids_and_counts_calls() {
        let store = MemoryStore::new();
        let created = store
            .create_bookmark(&BookmarkInput::new(
                "Docs",
                "https://example.com",
                "Reference material",
            ))
            .await
            .unwrap();
        assert!(!created.id.as_str().is_empty());
        assert_eq!(store.list_bookmarks().await.unwrap(), vec![created]);
        assert_eq!(store.calls(StoreCall::CreateBookmark), 1);
        assert_eq!(store.calls(StoreCall::ListBookmarks), 1);
        assert_eq!(store.total_calls(), 2);
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let store = MemoryStore::new();
        store.fail_next(StoreCall::ListNotes);
        assert!(matches!(
            store.list_notes().await,
            Err(Error::Api { status: 503, .. })
        ));
        assert!(store.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let result = store.delete_note(&NoteId::new("missing")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
