//! Data models for Stash

mod bookmark;
mod note;

pub use bookmark::{Bookmark, BookmarkId, BookmarkInput};
pub use note::{Note, NoteId, NoteInput};

use serde::{Deserialize, Deserializer};

/// Remote tables may use text or integer primary keys; both are kept as
/// opaque strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Text(text) => Ok(text),
        RawId::Integer(number) => Ok(number.to_string()),
    }
}
