use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] stash_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Record ID cannot be empty")]
    EmptyRecordId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Nothing to change; pass at least one field")]
    NothingToEdit,
    #[error("{kind} not found for id/prefix: {query}")]
    RecordNotFound { kind: &'static str, query: String },
    #[error("{0}")]
    AmbiguousId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error(
        "Service is not configured. Run `stash config init` or set SUPABASE_URL and SUPABASE_ANON_KEY."
    )]
    NotConfigured,
    #[error(
        "Not signed in. Run `stash auth login` or set STASH_ACCOUNT_EMAIL and STASH_ACCOUNT_PASSWORD."
    )]
    NotSignedIn,
}
