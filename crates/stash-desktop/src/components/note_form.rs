//! Quick note modal

use dioxus::prelude::*;

use stash_core::markup::from_plain_text;
use stash_core::validation::ValidationReport;
use stash_core::NoteInput;

use super::button::{Button, ButtonVariant};
use super::form_field::{field_message, FormField};
use super::modal::Modal;
use crate::state::AppState;

/// Captures a title and plain-text body; each line becomes a paragraph.
#[component]
pub fn NoteForm(on_close: EventHandler<()>) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut report = use_signal(|| None::<ValidationReport>);
    let mut failure = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let input = NoteInput::new(title(), from_plain_text(&content()));
        if let Err(rejected) = input.check() {
            report.set(Some(rejected));
            return;
        }
        report.set(None);

        let Some(library) = state.library() else {
            failure.set(Some("Not connected to your library yet".to_string()));
            return;
        };
        saving.set(true);
        failure.set(None);

        spawn(async move {
            let result = library.create_note(input).await;
            saving.set(false);
            match result {
                Ok(note) => {
                    tracing::debug!("Saved quick note {}", note.id);
                    on_close.call(());
                }
                Err(error) => {
                    tracing::error!("Failed to save note: {error}");
                    match error.validation() {
                        Some(rejected) => report.set(Some(rejected.clone())),
                        None => failure.set(Some(error.to_string())),
                    }
                }
            }
        });
    };

    let errors = report();

    rsx! {
        Modal {
            title: "Quick note",
            on_close: move |_| on_close.call(()),

            FormField {
                label: "Title",
                value: title(),
                oninput: move |value| title.set(value),
                error: field_message(errors.as_ref(), "title"),
            }
            FormField {
                label: "Content",
                value: content(),
                multiline: true,
                placeholder: "Write something worth keeping...",
                oninput: move |value| content.set(value),
                error: field_message(errors.as_ref(), "content"),
            }

            if let Some(message) = failure() {
                p {
                    style: "margin: 0 0 12px 0; padding: 8px 10px; border-radius: 6px; background: {colors.error_bg}; color: {colors.error}; font-size: 13px;",
                    "{message}"
                }
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 8px;",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: submit,
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    }
}
