//! Search bar component

use dioxus::prelude::*;

use crate::state::AppState;

/// Search input plus the section visibility toggles
#[component]
pub fn SearchBar() -> Element {
    let mut state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        div {
            class: "search-bar",
            style: "
                display: flex;
                align-items: center;
                gap: 16px;
                padding: 12px 0;
                margin-bottom: 16px;
                border-bottom: 1px solid {colors.border};
            ",

            input {
                r#type: "search",
                placeholder: "Search bookmarks and notes...",
                value: "{state.search_query}",
                oninput: move |evt| {
                    state.search_query.set(evt.value());
                },
                style: "
                    flex: 1;
                    padding: 8px 12px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    font-size: 14px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }

            SectionToggle { label: "Bookmarks", visible: state.show_bookmarks }
            SectionToggle { label: "Notes", visible: state.show_notes }
        }
    }
}

#[component]
fn SectionToggle(label: String, visible: Signal<bool>) -> Element {
    let mut visible = visible;
    let state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        label {
            style: "display: flex; align-items: center; gap: 6px; font-size: 13px; color: {colors.text_secondary}; cursor: pointer;",
            input {
                r#type: "checkbox",
                checked: visible(),
                onchange: move |evt| visible.set(evt.checked()),
            }
            "{label}"
        }
    }
}
