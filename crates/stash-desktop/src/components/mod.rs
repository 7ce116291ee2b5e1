//! UI Components
//!
//! Reusable UI components for the desktop application.

mod bookmark_card;
mod bookmark_dialog;
mod bookmark_form;
mod bookmark_list;
mod button;
mod confirm_dialog;
mod form_field;
mod load_error;
mod modal;
mod note_card;
mod note_form;
mod note_list;
mod rich_text;
mod search_bar;
mod section;
mod share_menu;

pub use bookmark_list::BookmarkList;
pub use button::{Button, ButtonVariant};
pub use confirm_dialog::ConfirmDialog;
pub use form_field::field_message;
pub use load_error::LoadError;
pub use note_list::NoteList;
pub use rich_text::{read_editor_html, RichTextEditor};
pub use search_bar::SearchBar;
pub use share_menu::ShareMenu;
