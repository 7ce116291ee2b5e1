//! Library section frame: heading, count and actions

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn Section(
    title: String,
    #[props(default)] count: Option<usize>,
    actions: Element,
    children: Element,
) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        section {
            style: "margin-bottom: 28px;",
            div {
                style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 12px;",
                h2 {
                    style: "margin: 0; font-size: 16px; font-weight: 600; color: {colors.text_primary};",
                    "{title}"
                    if let Some(count) = count {
                        span {
                            style: "margin-left: 8px; font-size: 12px; font-weight: 400; color: {colors.text_muted};",
                            "{count}"
                        }
                    }
                }
                div { style: "display: flex; gap: 8px;", {actions} }
            }
            {children}
        }
    }
}

/// Muted single-line message inside a section
#[component]
pub fn SectionMessage(message: String) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        p { style: "margin: 8px 0; font-size: 13px; color: {colors.text_muted};", "{message}" }
    }
}
