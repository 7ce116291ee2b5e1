//! Full-page note editor: create when no id is given, edit otherwise

use dioxus::prelude::*;

use stash_core::route::AppRoute;
use stash_core::share::{note_clipboard_text, note_mailto};
use stash_core::validation::ValidationReport;
use stash_core::{EntityTag, Note, NoteId, NoteInput};

use crate::components::{
    field_message, read_editor_html, Button, ButtonVariant, ConfirmDialog, LoadError,
    RichTextEditor, ShareMenu,
};
use crate::queries::{use_note_query, QueryState};
use crate::state::AppState;

#[component]
pub fn NoteEditorView(note_id: Option<NoteId>) -> Element {
    match note_id {
        Some(id) => rsx! { ExistingNoteEditor { id } },
        None => rsx! { NoteEditorForm {} },
    }
}

#[component]
fn ExistingNoteEditor(id: NoteId) -> Element {
    let mut state = use_context::<AppState>();
    let colors = state.palette();
    let note = use_note_query(id.clone());

    match note() {
        QueryState::Loading => rsx! {
            p { style: "padding: 32px; color: {colors.text_muted};", "Loading note..." }
        },
        QueryState::Failed { kind, message } => rsx! {
            div {
                style: "max-width: 860px; margin: 24px auto; padding: 0 24px;",
                LoadError { tag: EntityTag::Notes, kind, message }
            }
        },
        QueryState::Ready(None) => rsx! {
            div {
                style: "max-width: 860px; margin: 48px auto; padding: 0 24px; text-align: center;",
                p { style: "color: {colors.text_secondary};", "This note no longer exists." }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| state.navigate(AppRoute::Library),
                    "Back to library"
                }
            }
        },
        QueryState::Ready(Some(note)) => rsx! { NoteEditorForm { note } },
    }
}

#[component]
fn NoteEditorForm(#[props(default)] note: Option<Note>) -> Element {
    let mut state = use_context::<AppState>();
    let colors = state.palette();

    let mut title = use_signal(|| note.as_ref().map(|note| note.title.clone()).unwrap_or_default());
    let mut report = use_signal(|| None::<ValidationReport>);
    let mut failure = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let mut delete_error = use_signal(|| None::<String>);

    let existing_id = note.as_ref().map(|note| note.id.clone());
    let initial_html = note
        .as_ref()
        .map(|note| note.content.clone())
        .unwrap_or_default();

    let save_id = existing_id.clone();
    let save = move |_: MouseEvent| {
        let Some(library) = state.library() else {
            failure.set(Some("Not connected to your library yet".to_string()));
            return;
        };
        let existing = save_id.clone();
        saving.set(true);
        failure.set(None);

        spawn(async move {
            let content = match read_editor_html().await {
                Ok(content) => content,
                Err(error) => {
                    tracing::error!("Could not read editor content: {error}");
                    failure.set(Some("Could not read the note body".to_string()));
                    saving.set(false);
                    return;
                }
            };
            let input = NoteInput::new(title(), content);
            if let Err(rejected) = input.check() {
                report.set(Some(rejected));
                saving.set(false);
                return;
            }
            report.set(None);

            let result = match existing {
                Some(id) => library
                    .update_note(&Note::from_input(id, input))
                    .await
                    .map(|_| ()),
                None => library.create_note(input).await.map(|_| ()),
            };
            saving.set(false);
            match result {
                Ok(()) => state.navigate(AppRoute::Library),
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

    let delete_id = existing_id.clone();
    let delete = move |_: ()| {
        let (Some(library), Some(id)) = (state.library(), delete_id.clone()) else {
            return;
        };
        deleting.set(true);
        delete_error.set(None);
        spawn(async move {
            let result = library.delete_note(&id).await;
            deleting.set(false);
            match result {
                Ok(()) => state.navigate(AppRoute::Library),
                Err(error) => {
                    tracing::error!("Failed to delete note {id}: {error}");
                    delete_error.set(Some(error.to_string()));
                }
            }
        });
    };

    let errors = report();
    let title_error = field_message(errors.as_ref(), "title");
    let content_error = field_message(errors.as_ref(), "content");
    let title_border = if title_error.is_some() {
        colors.error
    } else {
        "transparent"
    };

    rsx! {
        div {
            class: "note-editor",
            style: "max-width: 860px; margin: 0 auto; padding: 16px 24px 32px 24px;",

            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 8px; margin-bottom: 16px;",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| state.navigate(AppRoute::Library),
                    "\u{2190} Library"
                }
                div {
                    style: "display: flex; align-items: center; gap: 8px;",
                    if let Some(note) = note.as_ref() {
                        ShareMenu {
                            clipboard_text: note_clipboard_text(note),
                            mailto: note_mailto(note),
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| confirm_delete.set(true),
                            "Delete"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| state.navigate(AppRoute::Library),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: saving(),
                        onclick: save,
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }

            input {
                r#type: "text",
                placeholder: "Untitled note",
                value: "{title}",
                oninput: move |evt| title.set(evt.value()),
                style: "
                    width: 100%;
                    box-sizing: border-box;
                    padding: 6px 4px;
                    margin-bottom: 4px;
                    border: none;
                    border-bottom: 1px solid {title_border};
                    background: transparent;
                    color: {colors.text_primary};
                    font-size: 26px;
                    font-weight: 600;
                    outline: none;
                ",
            }
            if let Some(message) = title_error {
                p { style: "margin: 0 0 8px 4px; font-size: 12px; color: {colors.error};", "{message}" }
            }

            div {
                style: "margin-top: 12px;",
                RichTextEditor { initial_html }
            }
            if let Some(message) = content_error {
                p { style: "margin: 6px 0 0 4px; font-size: 12px; color: {colors.error};", "{message}" }
            }

            if let Some(message) = failure() {
                p {
                    role: "alert",
                    style: "margin: 12px 0 0 0; padding: 8px 10px; border-radius: 6px; background: {colors.error_bg}; color: {colors.error}; font-size: 13px;",
                    "{message}"
                }
            }
        }

        if confirm_delete() {
            ConfirmDialog {
                title: "Delete note?",
                message: format!("\"{}\" will be deleted permanently.", title()),
                busy: deleting(),
                error: delete_error(),
                on_confirm: delete,
                on_cancel: move |_| confirm_delete.set(false),
            }
        }
    }
}
