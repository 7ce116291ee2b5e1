//! Note model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::Error;
use crate::markup::to_plain_text;
use crate::util::ellipsize;
use crate::validation::{FieldError, ValidationReport};

/// Server-assigned note identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_opaque_id(deserializer).map(Self)
    }
}

impl NoteId {
    /// Wrap an identifier returned by the remote store
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationReport::from(vec![
                FieldError::new("id", "Note id must not be empty"),
            ])));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A stored note. `content` holds rich-text markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    #[must_use]
    pub fn from_input(id: NoteId, input: NoteInput) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
        }
    }

    #[must_use]
    pub fn to_input(&self) -> NoteInput {
        NoteInput {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    /// Content with markup removed
    #[must_use]
    pub fn plain_text(&self) -> String {
        to_plain_text(&self.content)
    }

    /// Single-line plain text preview, truncated to `max_chars`
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        ellipsize(&self.plain_text(), max_chars)
    }
}

/// Note fields as entered by the user.
///
/// The content maximum applies to the stored markup; the minimum is checked
/// against the plain text in [`NoteInput::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NoteInput {
    #[validate(length(min = 3, max = 50, message = "Title must be between 3 and 50 characters"))]
    pub title: String,
    #[validate(length(max = 3000, message = "Content must be at most 3000 characters"))]
    pub content: String,
}

impl NoteInput {
    /// Create input with the title trimmed
    #[must_use]
    pub fn new(title: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            content: content.into(),
        }
    }

    /// Same values with the title trimmed; markup is left as written
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(&self.title, self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_strips_markup() {
        let note = Note {
            id: NoteId::new("n1"),
            title: "Groceries".to_string(),
            content: "<p><strong>Milk</strong> and eggs</p><p>Bread</p>".to_string(),
        };
        assert_eq!(note.preview(60), "Milk and eggs Bread");
    }

    #[test]
    fn note_ignores_owner_column_when_reading_rows() {
        let note: Note = serde_json::from_str(
            r#"{"id":7,"title":"Plan","content":"<p>Write it down</p>","user_id":"u-1"}"#,
        )
        .unwrap();
        assert_eq!(note.id, NoteId::new("7"));
        assert_eq!(note.title, "Plan");
    }

    #[test]
    fn input_round_trips_through_note() {
        let input = NoteInput::new(" Plan ", "<p>Write it down</p>");
        let note = Note::from_input(NoteId::new("n1"), input.clone());
        assert_eq!(note.to_input(), input);
    }
}
