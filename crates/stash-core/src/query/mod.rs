//! Tag-indexed query cache.
//!
//! Reads are cached under a [`QueryKey`]. A successful mutation invalidates
//! every entry sharing its [`EntityTag`] and bumps that tag's generation, which
//! observers use to refetch.

mod client;

use std::fmt;

pub use client::{QueryClient, QueryError, QueryObserver, QuerySnapshot};

/// Coarse entity grouping used for invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Bookmarks,
    Notes,
}

impl EntityTag {
    pub const ALL: [Self; 2] = [Self::Bookmarks, Self::Notes];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bookmarks => "bookmarks",
            Self::Notes => "notes",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Bookmarks => 0,
            Self::Notes => 1,
        }
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact identity of a cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub tag: EntityTag,
    pub id: Option<String>,
}

impl QueryKey {
    /// The full list of a tag.
    #[must_use]
    pub const fn all(tag: EntityTag) -> Self {
        Self { tag, id: None }
    }

    /// A single record of a tag.
    #[must_use]
    pub fn one(tag: EntityTag, id: impl Into<String>) -> Self {
        Self {
            tag,
            id: Some(id.into()),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}/{id}", self.tag),
            None => write!(f, "{}", self.tag),
        }
    }
}
