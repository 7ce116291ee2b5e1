//! Add / edit bookmark modal

use dioxus::prelude::*;

use stash_core::validation::ValidationReport;
use stash_core::{Bookmark, BookmarkInput};

use super::button::{Button, ButtonVariant};
use super::form_field::{field_message, FormField};
use super::modal::Modal;
use crate::state::AppState;

/// Creates a bookmark, or edits `bookmark` when one is given.
#[component]
pub fn BookmarkForm(
    #[props(default)] bookmark: Option<Bookmark>,
    on_close: EventHandler<()>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let initial = bookmark.as_ref().map(Bookmark::to_input).unwrap_or_default();
    let mut title = use_signal(|| initial.title.clone());
    let mut url = use_signal(|| initial.url.clone());
    let mut description = use_signal(|| initial.description.clone());
    let mut report = use_signal(|| None::<ValidationReport>);
    let mut failure = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let editing = bookmark.clone();
    let heading = if editing.is_some() {
        "Edit bookmark"
    } else {
        "Add bookmark"
    }
    .to_string();

    let submit = move |_: MouseEvent| {
        let input = BookmarkInput::new(title(), url(), description());
        if let Err(rejected) = input.check() {
            report.set(Some(rejected));
            return;
        }
        report.set(None);

        let Some(library) = state.library() else {
            failure.set(Some("Not connected to your library yet".to_string()));
            return;
        };
        let existing = editing.clone();
        saving.set(true);
        failure.set(None);

        spawn(async move {
            let result = match existing {
                Some(existing) => {
                    library
                        .update_bookmark(&Bookmark::from_input(existing.id, input))
                        .await
                }
                None => library.create_bookmark(input).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    tracing::debug!("Saved bookmark {}", saved.id);
                    on_close.call(());
                }
                Err(error) => {
                    tracing::error!("Failed to save bookmark: {error}");
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
            title: heading,
            on_close: move |_| on_close.call(()),

            FormField {
                label: "Title",
                value: title(),
                oninput: move |value| title.set(value),
                error: field_message(errors.as_ref(), "title"),
            }
            FormField {
                label: "URL",
                value: url(),
                placeholder: "https://",
                oninput: move |value| url.set(value),
                error: field_message(errors.as_ref(), "url"),
            }
            FormField {
                label: "Description",
                value: description(),
                multiline: true,
                oninput: move |value| description.set(value),
                error: field_message(errors.as_ref(), "description"),
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
