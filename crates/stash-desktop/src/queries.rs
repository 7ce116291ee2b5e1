//! Reactive reads backed by the core query cache.
//!
//! Each hook runs its read through the [`stash_core::QueryClient`] held by the
//! library, so concurrent views share one cached result. The resource reads the
//! tag's generation signal, which makes it refetch whenever a successful
//! mutation invalidates that tag.

use std::future::Future;

use dioxus::prelude::*;

use stash_core::{Bookmark, EntityTag, ErrorKind, Note, NoteId};

use crate::state::{AppState, DesktopLibrary};

/// Render-ready state of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// No result yet (still connecting, or first fetch in flight)
    Loading,
    Failed { kind: ErrorKind, message: String },
    Ready(T),
}

impl<T: Clone> QueryState<T> {
    /// Map the latest finished fetch, if any, to a render state.
    #[must_use]
    pub fn from_outcome(outcome: Option<&stash_core::Result<T>>) -> Self {
        match outcome {
            None => Self::Loading,
            Some(Ok(value)) => Self::Ready(value.clone()),
            Some(Err(error)) => Self::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

fn use_library_query<T, F, Fut>(tag: EntityTag, run: F) -> Memo<QueryState<T>>
where
    T: Clone + PartialEq + 'static,
    F: Fn(DesktopLibrary) -> Fut + 'static,
    Fut: Future<Output = stash_core::Result<T>> + 'static,
{
    let state = use_context::<AppState>();

    let resource = use_resource(move || {
        let _generation = *state.generation_signal(tag).read();
        let request = (*state.library.read()).clone().map(&run);
        async move {
            match request {
                Some(request) => Some(request.await),
                None => None,
            }
        }
    });

    use_memo(move || {
        let guard = resource.read();
        let outcome: &Option<Option<stash_core::Result<T>>> = &guard;
        QueryState::from_outcome(outcome.as_ref().and_then(Option::as_ref))
    })
}

/// All bookmarks
pub fn use_bookmarks_query() -> Memo<QueryState<Vec<Bookmark>>> {
    use_library_query(EntityTag::Bookmarks, |library| async move {
        library.bookmarks().await
    })
}

/// All notes
pub fn use_notes_query() -> Memo<QueryState<Vec<Note>>> {
    use_library_query(EntityTag::Notes, |library| async move { library.notes().await })
}

/// A single note; `Ready(None)` when it does not exist.
pub fn use_note_query(id: NoteId) -> Memo<QueryState<Option<Note>>> {
    use_library_query(EntityTag::Notes, move |library| {
        let id = id.clone();
        async move { library.note(&id).await }
    })
}

/// Mark `tag` stale so every mounted read of it fetches again.
pub fn retry(state: AppState, tag: EntityTag) {
    if let Some(library) = state.library() {
        library.client().invalidate(tag);
    }
}
