//! Confirmation prompt for destructive actions

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use super::modal::Modal;
use crate::state::AppState;

#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    #[props(default)] error: Option<String>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    rsx! {
        Modal {
            title,
            on_close: move |_| on_cancel.call(()),
            p { style: "margin: 0 0 16px 0; color: {colors.text_secondary};", "{message}" }
            if let Some(error) = error {
                p { style: "margin: 0 0 12px 0; color: {colors.error}; font-size: 13px;", "{error}" }
            }
            div {
                style: "display: flex; justify-content: flex-end; gap: 8px;",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Deleting..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
