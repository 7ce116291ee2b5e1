//! Client-side list filtering (case-insensitive substring search).

use crate::models::{Bookmark, Note};

/// Records that can be matched against a search string.
pub trait Searchable {
    /// Lowercased text fields a query is matched against
    fn search_fields(&self) -> Vec<String>;

    fn matches(&self, normalized_query: &str) -> bool {
        normalized_query.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.contains(normalized_query))
    }
}

impl Searchable for Bookmark {
    fn search_fields(&self) -> Vec<String> {
        vec![self.title.to_lowercase(), self.description.to_lowercase()]
    }
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<String> {
        vec![self.title.to_lowercase(), self.plain_text().to_lowercase()]
    }
}

/// Keep records whose searchable text contains `search_query`, ignoring case.
///
/// Whitespace in the query is matched literally; only the empty query keeps
/// every record, in order.
#[must_use]
pub fn filter_records<T: Searchable + Clone>(records: &[T], search_query: &str) -> Vec<T> {
    let query = search_query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&query))
        .cloned()
        .collect()
}

/// Bookmarks matching on title or description
#[must_use]
pub fn filter_bookmarks(bookmarks: &[Bookmark], search_query: &str) -> Vec<Bookmark> {
    filter_records(bookmarks, search_query)
}

/// Notes matching on title or the plain text of their content
#[must_use]
pub fn filter_notes(notes: &[Note], search_query: &str) -> Vec<Note> {
    filter_records(notes, search_query)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::models::{BookmarkId, NoteId};

    fn bookmark(id: &str, title: &str, description: &str) -> Bookmark {
        Bookmark {
            id: BookmarkId::new(id),
            title: title.to_string(),
            url: "https://example.com".to_string(),
            description: description.to_string(),
        }
    }

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: NoteId::new(id),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn matches_bookmark_title_or_description_case_insensitively() {
        let bookmarks = vec![
            bookmark("1", "Rust Docs", "The standard library reference"),
            bookmark("2", "Recipes", "Weeknight dinners for RUSTic kitchens"),
            bookmark("3", "News", "Daily headlines"),
        ];

        let ids = filter_bookmarks(&bookmarks, "rust")
            .into_iter()
            .map(|b| b.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn url_is_not_searched() {
        let bookmarks = vec![bookmark("1", "Docs", "Reference material here")];
        assert!(filter_bookmarks(&bookmarks, "example.com").is_empty());
    }

    #[test]
    fn matches_note_text_but_not_markup() {
        let notes = vec![
            note("1", "Shopping", "<p><strong>Milk</strong> and eggs</p>"),
            note("2", "Ideas", "<p>Start a garden</p>"),
        ];

        assert_eq!(filter_notes(&notes, "MILK").len(), 1);
        assert_eq!(filter_notes(&notes, "ideas")[0].id, NoteId::new("2"));
        assert!(filter_notes(&notes, "strong").is_empty());
    }

    #[test]
    fn empty_query_returns_everything() {
        let notes = vec![note("1", "Shopping", "<p>Milk</p>"), note("2", "Ideas", "")];
        assert_eq!(filter_notes(&notes, ""), notes);
    }

    #[test]
    fn query_whitespace_is_part_of_the_match() {
        let bookmarks = vec![bookmark("1", "Docs", "Reference")];
        assert!(filter_bookmarks(&bookmarks, "docs ").is_empty());
        assert!(filter_bookmarks(&bookmarks, "   ").is_empty());

        let spaced = vec![bookmark("2", "Rust Docs", "Reference material")];
        assert_eq!(filter_bookmarks(&spaced, "rust d").len(), 1);
    }

    proptest! {
        #[test]
        fn empty_query_keeps_full_list(titles in proptest::collection::vec("[a-zA-Z ]{0,20}", 0..8)) {
            let bookmarks = titles
                .iter()
                .enumerate()
                .map(|(index, title)| bookmark(&index.to_string(), title, "description text"))
                .collect::<Vec<_>>();
            prop_assert_eq!(filter_bookmarks(&bookmarks, ""), bookmarks);
        }

        #[test]
        fn query_case_never_changes_the_result(title in "[a-zA-Z]{1,12}", query in "[a-zA-Z]{1,4}") {
            let bookmarks = vec![bookmark("1", &title, "description text")];
            prop_assert_eq!(
                filter_bookmarks(&bookmarks, &query.to_uppercase()),
                filter_bookmarks(&bookmarks, &query.to_lowercase())
            );
        }

        #[test]
        fn every_title_matches_its_own_substring(title in "[a-z]{5,20}", start in 0usize..3, len in 1usize..3) {
            let needle = &title[start..start + len];
            let bookmarks = vec![bookmark("1", &title, "description text")];
            prop_assert_eq!(filter_bookmarks(&bookmarks, needle).len(), 1);
        }
    }
}
