use serde::Serialize;
use stash_core::config::{AccountCredentials, ServiceConfig};
use stash_core::store::SupabaseStore;
use stash_core::{Bookmark, Error, Library, Note};

use crate::auth::connect;
use crate::config_profiles::ProfilesFile;
use crate::editor::non_blank;
use crate::error::CliError;

const SHORT_ID_CHARS: usize = 13;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
}

/// Profile name plus whatever service configuration applies to it.
///
/// A complete profile wins; otherwise the environment is consulted.
pub fn resolve_service_config(
    explicit_profile: Option<&str>,
) -> Result<(String, Option<ServiceConfig>), CliError> {
    let config = ProfilesFile::load()?;
    let profile_name = config.resolve_profile_name(explicit_profile);
    if let Some(service) = config
        .profile(&profile_name)
        .map(crate::config_profiles::Profile::service_config)
        .transpose()?
        .flatten()
    {
        return Ok((profile_name, Some(service)));
    }
    Ok((profile_name, ServiceConfig::from_env()?))
}

/// Connect, authenticate and return a library for data commands.
pub async fn open_library(profile: Option<&str>) -> Result<Library<SupabaseStore>, CliError> {
    let (profile_name, service) = resolve_service_config(profile)?;
    let service = service.ok_or(CliError::NotConfigured)?;
    let connection = connect(&profile_name, service)?;

    let credentials = AccountCredentials::from_env();
    match connection.authenticate(credentials.as_ref()).await {
        Ok((session, source)) => {
            tracing::debug!(profile = %profile_name, user_id = %session.user.id, ?source, "Authenticated");
        }
        Err(Error::Unauthenticated) => return Err(CliError::NotSignedIn),
        Err(error) => return Err(error.into()),
    }

    Ok(connection.library())
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_CHARS).collect()
}

/// Find the one record whose id equals `query` or starts with it.
pub fn resolve_by_prefix<T: Clone>(
    records: &[T],
    query: &str,
    kind: &'static str,
    id_of: impl Fn(&T) -> &str,
) -> Result<T, CliError> {
    let query = normalize_record_identifier(query)?;
    if let Some(exact) = records.iter().find(|record| id_of(record) == query) {
        return Ok(exact.clone());
    }

    let matches = records
        .iter()
        .filter(|record| id_of(record).starts_with(&query))
        .collect::<Vec<_>>();
    match matches.as_slice() {
        [] => Err(CliError::RecordNotFound {
            kind,
            query: query.clone(),
        }),
        [record] => Ok((*record).clone()),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|record| short_id(id_of(record)))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_bookmark_lines(bookmarks: &[Bookmark]) -> Vec<String> {
    bookmarks
        .iter()
        .map(|bookmark| {
            let short_id = short_id(bookmark.id.as_str());
            let title = stash_core::util::ellipsize(&bookmark.title, 30);
            format!("{short_id:<13}  {title:<30}  {}", bookmark.url)
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(note.id.as_str());
            let title = stash_core::util::ellipsize(&note.title, 30);
            let preview = note.preview(40);
            format!("{short_id:<13}  {title:<30}  {preview}")
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note.preview(80),
        content: note.content.clone(),
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    non_blank(query).ok_or(CliError::EmptySearchQuery)
}

pub fn normalize_record_identifier(id: &str) -> Result<String, CliError> {
    non_blank(id).ok_or(CliError::EmptyRecordId)
}
