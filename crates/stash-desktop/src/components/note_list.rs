//! Notes section of the library view

use dioxus::prelude::*;

use stash_core::filter::filter_notes;
use stash_core::route::AppRoute;
use stash_core::EntityTag;

use super::button::{Button, ButtonVariant};
use super::load_error::LoadError;
use super::note_card::NoteCard;
use super::note_form::NoteForm;
use super::section::{Section, SectionMessage};
use crate::queries::{use_notes_query, QueryState};
use crate::state::AppState;

#[component]
pub fn NoteList() -> Element {
    let mut state = use_context::<AppState>();
    let colors = state.palette();
    let notes = use_notes_query();
    let mut quick_note_open = use_signal(|| false);

    let query = (state.search_query)();
    let (count, body) = match notes() {
        QueryState::Loading => (None, rsx! { SectionMessage { message: "Loading notes..." } }),
        QueryState::Failed { kind, message } => (
            None,
            rsx! { LoadError { tag: EntityTag::Notes, kind, message } },
        ),
        QueryState::Ready(all) => {
            let visible = filter_notes(&all, &query);
            let body = if all.is_empty() {
                rsx! { SectionMessage { message: "No notes yet." } }
            } else if visible.is_empty() {
                rsx! { SectionMessage { message: format!("No notes match \"{query}\".") } }
            } else {
                rsx! {
                    div {
                        style: "border: 1px solid {colors.border}; border-radius: 8px; overflow: hidden;",
                        for (key, note, id) in visible.iter().map(|n| (n.id.to_string(), n.clone(), n.id.clone())) {
                            NoteCard {
                                key: "{key}",
                                note,
                                onclick: move |_| state.navigate(AppRoute::edit_note(id.clone())),
                            }
                        }
                    }
                }
            };
            (Some(visible.len()), body)
        }
    };

    rsx! {
        Section {
            title: "Notes",
            count,
            actions: rsx! {
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| quick_note_open.set(true),
                    "Quick note"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| state.navigate(AppRoute::new_note()),
                    "New note"
                }
            },
            {body}
        }

        if quick_note_open() {
            NoteForm { on_close: move |_| quick_note_open.set(false) }
        }
    }
}
