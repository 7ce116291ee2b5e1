//! Application routes shared by the interactive clients.

use std::fmt;

use crate::models::NoteId;

pub const LIBRARY_PATH: &str = "/my-library";
const NOTES_PREFIX: &str = "/notes/";
const NEW_NOTE_SEGMENT: &str = "new";

/// A view the application can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Bookmarks and notes lists
    #[default]
    Library,
    /// Full-page note editor; `None` creates a new note
    NoteEditor { note_id: Option<NoteId> },
}

impl AppRoute {
    /// Editor for a new note
    #[must_use]
    pub const fn new_note() -> Self {
        Self::NoteEditor { note_id: None }
    }

    /// Editor for an existing note
    #[must_use]
    pub const fn edit_note(note_id: NoteId) -> Self {
        Self::NoteEditor {
            note_id: Some(note_id),
        }
    }

    /// Resolve a path. Anything unrecognized falls back to the library.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if let Some(segment) = path.strip_prefix(NOTES_PREFIX) {
            if segment.is_empty() || segment.contains('/') {
                return Self::Library;
            }
            if segment == NEW_NOTE_SEGMENT {
                return Self::new_note();
            }
            return urlencoding::decode(segment).map_or(Self::Library, |decoded| {
                Self::edit_note(NoteId::new(decoded.into_owned()))
            });
        }

        Self::Library
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Library => LIBRARY_PATH.to_string(),
            Self::NoteEditor { note_id: None } => format!("{NOTES_PREFIX}{NEW_NOTE_SEGMENT}"),
            Self::NoteEditor { note_id: Some(id) } => {
                format!("{NOTES_PREFIX}{}", urlencoding::encode(id.as_str()))
            }
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(AppRoute::parse("/my-library"), AppRoute::Library);
        assert_eq!(AppRoute::parse("/notes/new"), AppRoute::new_note());
        assert_eq!(
            AppRoute::parse("/notes/n1"),
            AppRoute::edit_note(NoteId::new("n1"))
        );
        assert_eq!(
            AppRoute::parse("/notes/n1/?tab=x"),
            AppRoute::edit_note(NoteId::new("n1"))
        );
    }

    #[test]
    fn unknown_paths_redirect_to_library() {
        for path in ["/", "", "/bookmarks", "/notes", "/notes/", "/notes/a/b", "/anything"] {
            assert_eq!(AppRoute::parse(path), AppRoute::Library, "path {path}");
        }
    }

    #[test]
    fn path_round_trips() {
        for route in [
            AppRoute::Library,
            AppRoute::new_note(),
            AppRoute::edit_note(NoteId::new("a b")),
        ] {
            assert_eq!(AppRoute::parse(&route.path()), route);
        }
    }
}
