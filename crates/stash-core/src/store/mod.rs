//! Persistence boundary for bookmarks and notes.
//!
//! Every operation returns a typed result; failures are never swallowed here.

mod memory;
mod supabase;

use std::future::Future;

pub use memory::{MemoryStore, StoreCall};
pub use supabase::{SupabaseStore, BOOKMARKS_TABLE, NOTES_TABLE};

use crate::error::Result;
use crate::models::{Bookmark, BookmarkId, BookmarkInput, Note, NoteId, NoteInput};

pub trait BookmarkStore: Send + Sync {
    fn list_bookmarks(&self) -> impl Future<Output = Result<Vec<Bookmark>>> + Send;

    /// Store a new bookmark and return it with its assigned id.
    fn create_bookmark(
        &self,
        input: &BookmarkInput,
    ) -> impl Future<Output = Result<Bookmark>> + Send;

    /// Overwrite all fields of an existing bookmark.
    fn update_bookmark(&self, bookmark: &Bookmark)
        -> impl Future<Output = Result<Bookmark>> + Send;

    fn delete_bookmark(&self, id: &BookmarkId) -> impl Future<Output = Result<()>> + Send;
}

pub trait NoteStore: Send + Sync {
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    fn get_note(&self, id: &NoteId) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Store a new note for the signed-in user and return it with its id.
    fn create_note(&self, input: &NoteInput) -> impl Future<Output = Result<Note>> + Send;

    fn update_note(&self, note: &Note) -> impl Future<Output = Result<Note>> + Send;

    fn delete_note(&self, id: &NoteId) -> impl Future<Output = Result<()>> + Send;
}
