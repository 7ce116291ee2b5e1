//! Bookmarks section of the library view

use dioxus::prelude::*;

use stash_core::filter::filter_bookmarks;
use stash_core::{Bookmark, EntityTag};

use super::bookmark_card::BookmarkCard;
use super::bookmark_dialog::BookmarkDialog;
use super::bookmark_form::BookmarkForm;
use super::button::{Button, ButtonVariant};
use super::load_error::LoadError;
use super::section::{Section, SectionMessage};
use crate::queries::{use_bookmarks_query, QueryState};
use crate::state::AppState;

#[component]
pub fn BookmarkList() -> Element {
    let state = use_context::<AppState>();
    let bookmarks = use_bookmarks_query();
    let mut adding = use_signal(|| false);
    let mut selected = use_signal(|| None::<Bookmark>);

    let query = (state.search_query)();
    let (count, body) = match bookmarks() {
        QueryState::Loading => (None, rsx! { SectionMessage { message: "Loading bookmarks..." } }),
        QueryState::Failed { kind, message } => (
            None,
            rsx! { LoadError { tag: EntityTag::Bookmarks, kind, message } },
        ),
        QueryState::Ready(all) => {
            let visible = filter_bookmarks(&all, &query);
            let body = if all.is_empty() {
                rsx! { SectionMessage { message: "No bookmarks yet." } }
            } else if visible.is_empty() {
                rsx! { SectionMessage { message: format!("No bookmarks match \"{query}\".") } }
            } else {
                rsx! {
                    div {
                        style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 10px;",
                        for (key, bookmark, picked) in visible.iter().map(|b| (b.id.to_string(), b.clone(), b.clone())) {
                            BookmarkCard {
                                key: "{key}",
                                bookmark,
                                onclick: move |_| selected.set(Some(picked.clone())),
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
            title: "Bookmarks",
            count,
            actions: rsx! {
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| adding.set(true),
                    "Add bookmark"
                }
            },
            {body}
        }

        if adding() {
            BookmarkForm { on_close: move |_| adding.set(false) }
        }
        if let Some(bookmark) = selected() {
            BookmarkDialog {
                key: "{bookmark.id}",
                bookmark: bookmark.clone(),
                on_close: move |_| selected.set(None),
            }
        }
    }
}
