//! Note card component

use dioxus::prelude::*;

use stash_core::Note;

use crate::state::AppState;

const PREVIEW_CHARS: usize = 120;

/// A single note row rendered in the note list.
#[component]
pub fn NoteCard(note: Note, onclick: EventHandler<MouseEvent>) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let preview = note.preview(PREVIEW_CHARS);

    rsx! {
        div {
            class: "note-card",
            style: "
                padding: 12px 14px;
                border-bottom: 1px solid {colors.border};
                cursor: pointer;
                background: {colors.bg_primary};
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                style: "
                    font-weight: 500;
                    margin-bottom: 4px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    color: {colors.text_primary};
                ",
                "{note.title}"
            }
            div {
                style: "
                    font-size: 12px;
                    color: {colors.text_secondary};
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                ",
                "{preview}"
            }
        }
    }
}
