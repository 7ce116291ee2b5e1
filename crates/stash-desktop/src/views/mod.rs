//! Application views

mod library;
mod note_editor;

pub use library::LibraryView;
pub use note_editor::NoteEditorView;
