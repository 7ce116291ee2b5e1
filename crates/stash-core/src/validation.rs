//! Form validation for bookmarks and notes.
//!
//! Field constraints are declared on the input types with `validator`; this
//! module runs them, adds the rules a derive cannot express, and reports
//! per-field messages the UI can show next to the offending input.

use std::fmt;

use validator::{Validate, ValidationErrors};

use crate::markup::to_plain_text;
use crate::models::{BookmarkInput, NoteInput};
use crate::util::is_http_url;

/// Minimum number of plain-text characters a note body must contain.
pub const NOTE_CONTENT_MIN_CHARS: usize = 10;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors for one submission, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message reported for `field`
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
        self.errors.sort_by(|a, b| a.field.cmp(&b.field));
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for ValidationReport {
    fn from(mut errors: Vec<FieldError>) -> Self {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self { errors }
    }
}

impl From<ValidationErrors> for ValidationReport {
    fn from(value: ValidationErrors) -> Self {
        let errors = value
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                    FieldError::new(field.clone(), message)
                })
            })
            .collect::<Vec<_>>();
        Self::from(errors)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

impl std::error::Error for ValidationReport {}

fn run_derived<T: Validate>(input: &T) -> ValidationReport {
    input
        .validate()
        .map_or_else(ValidationReport::from, |()| ValidationReport::default())
}

impl BookmarkInput {
    /// Validate every field; nothing is sent anywhere when this fails.
    ///
    /// Only http and https links are accepted since the URL is rendered as a
    /// clickable link.
    pub fn check(&self) -> Result<(), ValidationReport> {
        let mut report = run_derived(self);
        if report.field("url").is_none() && !is_http_url(&self.url) {
            report.push(FieldError::new(
                "url",
                "URL must start with http:// or https://",
            ));
        }
        report.into_result()
    }
}

impl NoteInput {
    /// Validate title and content, counting the content minimum on plain text
    /// so that empty editor markup such as `<p><br></p>` is rejected.
    pub fn check(&self) -> Result<(), ValidationReport> {
        let mut report = run_derived(self);
        if report.field("content").is_none()
            && to_plain_text(&self.content).trim().chars().count() < NOTE_CONTENT_MIN_CHARS
        {
            report.push(FieldError::new(
                "content",
                format!("Content must be at least {NOTE_CONTENT_MIN_CHARS} characters"),
            ));
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn docs_bookmark() -> BookmarkInput {
        BookmarkInput::new("Docs", "https://example.com", "Reference material here")
    }

    #[test]
    fn accepts_valid_bookmark() {
        assert!(docs_bookmark().check().is_ok());
    }

    #[test]
    fn rejects_two_character_title() {
        let input = BookmarkInput {
            title: "AB".to_string(),
            ..docs_bookmark()
        };
        let report = input.check().unwrap_err();
        assert_eq!(
            report.field("title").map(|error| error.message.as_str()),
            Some("Title must be between 3 and 50 characters")
        );
        assert!(report.field("url").is_none());
    }

    #[test]
    fn rejects_malformed_url() {
        let input = BookmarkInput {
            url: "not-a-url".to_string(),
            ..docs_bookmark()
        };
        let report = input.check().unwrap_err();
        assert!(report.field("url").is_some());
    }

    #[test]
    fn rejects_script_and_non_web_schemes() {
        for url in ["javascript:alert(1)", "data:text/html,hi", "ftp://example.com/file"] {
            let input = BookmarkInput {
                url: url.to_string(),
                ..docs_bookmark()
            };
            assert!(input.check().unwrap_err().field("url").is_some(), "{url}");
        }

        let script = BookmarkInput {
            url: "javascript:alert(1)".to_string(),
            ..docs_bookmark()
        };
        assert_eq!(
            script
                .check()
                .unwrap_err()
                .field("url")
                .map(|error| error.message.as_str()),
            Some("URL must start with http:// or https://")
        );
    }

    #[test]
    fn reports_every_failing_field_in_order() {
        let input = BookmarkInput::new("A", "nope", "short");
        let fields = input
            .check()
            .unwrap_err()
            .errors()
            .iter()
            .map(|error| error.field.clone())
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["description", "title", "url"]);
    }

    #[test]
    fn bookmark_bounds_are_inclusive() {
        let input = BookmarkInput::new("abc", "https://example.com", "x".repeat(200));
        assert!(input.check().is_ok());
        let input = BookmarkInput::new("a".repeat(51), "https://example.com", "x".repeat(201));
        let report = input.check().unwrap_err();
        assert!(report.field("title").is_some());
        assert!(report.field("description").is_some());
    }

    #[test]
    fn note_content_minimum_ignores_markup() {
        let empty_editor = NoteInput::new("Plan", "<p><br></p><p><br></p>");
        let report = empty_editor.check().unwrap_err();
        assert_eq!(
            report.field("content").map(|error| error.message.as_str()),
            Some("Content must be at least 10 characters")
        );

        let formatted = NoteInput::new("Plan", "<p><strong>Write</strong> it all down</p>");
        assert!(formatted.check().is_ok());
    }

    #[test]
    fn note_content_maximum_is_three_thousand() {
        let at_limit = NoteInput::new("Plan", "y".repeat(3000));
        assert!(at_limit.check().is_ok());
        let over = NoteInput::new("Plan", "y".repeat(3001));
        assert_eq!(
            over.check()
                .unwrap_err()
                .field("content")
                .map(|error| error.message.as_str()),
            Some("Content must be at most 3000 characters")
        );
    }
}
