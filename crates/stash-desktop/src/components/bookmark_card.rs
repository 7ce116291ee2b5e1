//! Bookmark card component

use dioxus::prelude::*;

use stash_core::util::ellipsize;
use stash_core::Bookmark;

use crate::state::AppState;

const DESCRIPTION_PREVIEW_CHARS: usize = 90;

/// A single bookmark tile in the bookmark grid.
#[component]
pub fn BookmarkCard(bookmark: Bookmark, onclick: EventHandler<MouseEvent>) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let description = ellipsize(&bookmark.description, DESCRIPTION_PREVIEW_CHARS);

    rsx! {
        div {
            class: "bookmark-card",
            style: "
                padding: 12px 14px;
                border: 1px solid {colors.border};
                border-radius: 8px;
                background: {colors.bg_primary};
                cursor: pointer;
                display: flex;
                flex-direction: column;
                gap: 4px;
                min-width: 0;
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                style: "font-weight: 600; color: {colors.text_primary}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                "{bookmark.title}"
            }
            div {
                style: "font-size: 12px; color: {colors.accent}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                "{bookmark.url}"
            }
            div {
                style: "font-size: 12px; color: {colors.text_secondary};",
                "{description}"
            }
        }
    }
}
