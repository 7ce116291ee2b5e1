//! Library view: bookmarks and notes side by side with one search

use dioxus::prelude::*;

use crate::components::{BookmarkList, NoteList, SearchBar};
use crate::state::AppState;

#[component]
pub fn LibraryView() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let show_bookmarks = (state.show_bookmarks)();
    let show_notes = (state.show_notes)();

    rsx! {
        div {
            class: "library-view",
            style: "max-width: 1040px; margin: 0 auto; padding: 0 24px 32px 24px;",

            SearchBar {}

            if show_bookmarks {
                BookmarkList {}
            }
            if show_notes {
                NoteList {}
            }
            if !show_bookmarks && !show_notes {
                p {
                    style: "margin-top: 40px; text-align: center; color: {colors.text_muted};",
                    "Both sections are hidden. Tick Bookmarks or Notes above to show them."
                }
            }
        }
    }
}
