//! Failure state for a read

use dioxus::prelude::*;

use stash_core::{EntityTag, ErrorKind};

use super::button::{Button, ButtonVariant};
use crate::queries::retry;
use crate::state::AppState;

/// Headline shown for a failed read of `tag`
pub fn failure_headline(tag: EntityTag, kind: ErrorKind) -> String {
    match kind {
        ErrorKind::Network => format!("Could not reach the server to load {tag}."),
        ErrorKind::Auth => format!("Your session was rejected while loading {tag}."),
        _ => format!("Loading {tag} failed."),
    }
}

#[component]
pub fn LoadError(tag: EntityTag, kind: ErrorKind, message: String) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let headline = failure_headline(tag, kind);

    rsx! {
        div {
            role: "alert",
            style: "
                padding: 12px 14px;
                border: 1px solid {colors.error};
                border-radius: 8px;
                background: {colors.error_bg};
                color: {colors.error};
                display: flex;
                align-items: center;
                justify-content: space-between;
                gap: 12px;
            ",
            div {
                div { style: "font-weight: 600;", "{headline}" }
                div { style: "font-size: 12px; margin-top: 2px;", "{message}" }
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| retry(state, tag),
                "Retry"
            }
        }
    }
}
