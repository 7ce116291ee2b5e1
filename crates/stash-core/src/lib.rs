//! stash-core - Core library for Stash
//!
//! This crate contains the shared models, validation rules, remote data access
//! and the tag-invalidated query cache used by every Stash interface
//! (desktop, CLI).

pub mod auth;
pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
pub mod library;
pub mod markup;
pub mod models;
pub mod query;
pub mod remote;
pub mod route;
pub mod share;
pub mod store;
pub mod util;
pub mod validation;

pub use error::{Error, ErrorKind, Result};
pub use connection::Connection;
pub use library::Library;
pub use models::{Bookmark, BookmarkId, BookmarkInput, Note, NoteId, NoteInput};
pub use query::{EntityTag, QueryClient, QueryKey};
