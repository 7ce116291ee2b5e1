//! Bookmark model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::Error;
use crate::validation::{FieldError, ValidationReport};

/// Server-assigned bookmark identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookmarkId(String);

impl<'de> Deserialize<'de> for BookmarkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_opaque_id(deserializer).map(Self)
    }
}

impl BookmarkId {
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

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BookmarkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationReport::from(vec![FieldError::new(
                "id",
                "Bookmark id must not be empty",
            )])));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A stored bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    pub description: String,
}

impl Bookmark {
    /// Build a bookmark from an identifier and form values
    #[must_use]
    pub fn from_input(id: BookmarkId, input: BookmarkInput) -> Self {
        Self {
            id,
            title: input.title,
            url: input.url,
            description: input.description,
        }
    }

    /// Current field values as editable form input
    #[must_use]
    pub fn to_input(&self) -> BookmarkInput {
        BookmarkInput {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
        }
    }
}

/// Bookmark fields as entered by the user; everything except the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookmarkInput {
    #[validate(length(min = 3, max = 50, message = "Title must be between 3 and 50 characters"))]
    pub title: String,
    #[validate(url(message = "URL must be a well-formed URL"))]
    pub url: String,
    #[validate(length(
        min = 10,
        max = 200,
        message = "Description must be between 10 and 200 characters"
    ))]
    pub description: String,
}

impl BookmarkInput {
    /// Create input with every field trimmed
    #[must_use]
    pub fn new(
        title: impl AsRef<str>,
        url: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            url: url.as_ref().trim().to_string(),
            description: description.as_ref().trim().to_string(),
        }
    }

    /// Same values with surrounding whitespace removed
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(&self.title, &self.url, &self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_text_and_numeric_ids() {
        let text: Bookmark = serde_json::from_str(
            r#"{"id":"b1","title":"Docs","url":"https://example.com","description":"Reference material here"}"#,
        )
        .unwrap();
        assert_eq!(text.id.as_str(), "b1");

        let numeric: Bookmark = serde_json::from_str(
            r#"{"id":42,"title":"Docs","url":"https://example.com","description":"Reference material here","created_at":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(numeric.id.as_str(), "42");
    }

    #[test]
    fn input_trims_fields() {
        let input = BookmarkInput::new("  Docs ", " https://example.com ", " Reference material here ");
        assert_eq!(input.title, "Docs");
        assert_eq!(input.url, "https://example.com");
        assert_eq!(input.description, "Reference material here");
    }

    #[test]
    fn normalized_trims_literal_input() {
        let padded = BookmarkInput {
            title: "   AB   ".to_string(),
            url: " https://example.com".to_string(),
            description: "Reference material here\n".to_string(),
        };
        assert_eq!(
            padded.normalized(),
            BookmarkInput::new("AB", "https://example.com", "Reference material here")
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!("  ".parse::<BookmarkId>().is_err());
        assert_eq!("b7".parse::<BookmarkId>().unwrap().as_str(), "b7");
    }
}
