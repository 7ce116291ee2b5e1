//! Bookmark detail dialog

use dioxus::prelude::*;

use stash_core::share::{bookmark_clipboard_text, bookmark_mailto};
use stash_core::Bookmark;

use super::bookmark_form::BookmarkForm;
use super::button::{Button, ButtonVariant};
use super::confirm_dialog::ConfirmDialog;
use super::modal::Modal;
use super::share_menu::ShareMenu;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogMode {
    Details,
    Editing,
    ConfirmDelete,
}

/// Shows one bookmark with Edit, Delete and Close actions.
#[component]
pub fn BookmarkDialog(bookmark: Bookmark, on_close: EventHandler<()>) -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();
    let mut mode = use_signal(|| DialogMode::Details);
    let mut deleting = use_signal(|| false);
    let mut delete_error = use_signal(|| None::<String>);

    let id = bookmark.id.clone();
    let confirm_delete = move |_: ()| {
        let Some(library) = state.library() else {
            return;
        };
        let id = id.clone();
        deleting.set(true);
        delete_error.set(None);
        spawn(async move {
            let result = library.delete_bookmark(&id).await;
            deleting.set(false);
            match result {
                Ok(()) => on_close.call(()),
                Err(error) => {
                    tracing::error!("Failed to delete bookmark {id}: {error}");
                    delete_error.set(Some(error.to_string()));
                }
            }
        });
    };

    match mode() {
        DialogMode::Editing => rsx! {
            BookmarkForm {
                bookmark: bookmark.clone(),
                on_close: move |_| on_close.call(()),
            }
        },
        DialogMode::ConfirmDelete => rsx! {
            ConfirmDialog {
                title: "Delete bookmark?",
                message: format!("\"{}\" will be removed from your library.", bookmark.title),
                busy: deleting(),
                error: delete_error(),
                on_confirm: confirm_delete,
                on_cancel: move |_| mode.set(DialogMode::Details),
            }
        },
        DialogMode::Details => rsx! {
            Modal {
                title: bookmark.title.clone(),
                on_close: move |_| on_close.call(()),

                a {
                    href: "{bookmark.url}",
                    style: "display: block; margin-bottom: 10px; color: {colors.accent}; word-break: break-all;",
                    "{bookmark.url}"
                }
                p {
                    style: "margin: 0 0 16px 0; color: {colors.text_secondary}; line-height: 1.5;",
                    "{bookmark.description}"
                }

                ShareMenu {
                    clipboard_text: bookmark_clipboard_text(&bookmark),
                    mailto: bookmark_mailto(&bookmark),
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 18px;",
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| mode.set(DialogMode::ConfirmDelete),
                        "Delete"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| mode.set(DialogMode::Editing),
                        "Edit"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        },
    }
}
