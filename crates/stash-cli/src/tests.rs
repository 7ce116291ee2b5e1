use pretty_assertions::assert_eq;
use stash_core::store::{MemoryStore, StoreCall};
use stash_core::{Bookmark, BookmarkId, BookmarkInput, Library, Note, NoteId, NoteInput};

use crate::cli::{BookmarkFields, CompletionShell};
use crate::commands::auth_cmd::resolve_credentials;
use crate::commands::bookmark::{
    run_bookmark_add, run_bookmark_delete, run_bookmark_edit, run_bookmark_list,
};
use crate::commands::common::{normalize_search_query, resolve_by_prefix};
use crate::commands::completions::render_completions;
use crate::commands::config::{init_profile, missing_fields, ProfileUpdate};
use crate::commands::note::{
    run_note_add, run_note_delete, run_note_edit, run_note_show, EditableBody,
};
use crate::commands::search::run_search;
use crate::commands::share::{run_bookmark_share, run_note_share};
use crate::config_profiles::{Profile, ProfilesFile};
use crate::editor::Editor;
use crate::error::CliError;

fn bookmark(id: &str, title: &str, url: &str, description: &str) -> Bookmark {
    Bookmark::from_input(
        BookmarkId::new(id),
        BookmarkInput::new(title, url, description),
    )
}

fn note(id: &str, title: &str, content: &str) -> Note {
    Note {
        id: NoteId::new(id),
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn seeded_library() -> Library<MemoryStore> {
    Library::new(MemoryStore::with_records(
        vec![
            bookmark(
                "b-100",
                "Docs",
                "https://example.com",
                "Reference material here",
            ),
            bookmark(
                "b-101",
                "Recipes",
                "https://food.example.com",
                "Things to cook on weekends",
            ),
            bookmark(
                "b-200",
                "Rust book",
                "https://doc.rust-lang.org/book",
                "The Rust programming language",
            ),
        ],
        vec![note(
            "n-1",
            "Groceries",
            "<p>Milk and eggs</p><p>Fresh bread</p>",
        )],
    ))
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

#[test]
fn normalize_search_query_rejects_blank() {
    assert!(matches!(
        normalize_search_query("   "),
        Err(CliError::EmptySearchQuery)
    ));
    assert_eq!(normalize_search_query(" docs ").unwrap(), "docs");
}

#[test]
fn resolve_by_prefix_prefers_exact_then_unique_prefix() {
    fn id<'a>(record: &'a &str) -> &'a str {
        record
    }
    let records = vec!["b-100", "b-101", "b-200", "b-1"];

    assert_eq!(resolve_by_prefix(&records, "b-1", "Bookmark", id).unwrap(), "b-1");
    assert_eq!(resolve_by_prefix(&records, "b-2", "Bookmark", id).unwrap(), "b-200");
    assert!(matches!(
        resolve_by_prefix(&records, "b-10", "Bookmark", id),
        Err(CliError::AmbiguousId(message)) if message.contains("b-100")
    ));
    assert!(matches!(
        resolve_by_prefix(&records, "zzz", "Bookmark", id),
        Err(CliError::RecordNotFound { kind: "Bookmark", .. })
    ));
    assert!(matches!(
        resolve_by_prefix(&records, " ", "Bookmark", id),
        Err(CliError::EmptyRecordId)
    ));
}

#[tokio::test]
async fn bookmark_add_then_list_shows_new_record() {
    let library = Library::new(MemoryStore::new());
    let mut buffer = Vec::new();
    run_bookmark_add(
        &library,
        BookmarkInput::new(" Docs ", "https://example.com", "Reference material here"),
        &mut buffer,
    )
    .await
    .unwrap();
    let id = output(buffer).trim().to_string();
    assert!(!id.is_empty());

    let mut buffer = Vec::new();
    run_bookmark_list(&library, true, &mut buffer).await.unwrap();
    let listed: Vec<Bookmark> = serde_json::from_str(&output(buffer)).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.as_str(), id);
    assert_eq!(listed[0].title, "Docs");
}

#[tokio::test]
async fn invalid_bookmark_is_rejected_before_any_call() {
    let library = Library::new(MemoryStore::new());
    let mut buffer = Vec::new();
    let error = run_bookmark_add(
        &library,
        BookmarkInput::new("AB", "not-a-url", "short"),
        &mut buffer,
    )
    .await
    .unwrap_err();

    assert!(matches!(error, CliError::Core(ref core) if core.validation().is_some()));
    assert!(error.to_string().contains("title"));
    assert_eq!(library.store().total_calls(), 0);
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn bookmark_edit_changes_only_given_fields() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_bookmark_edit(
        &library,
        "b-2",
        BookmarkFields {
            title: Some("The Book".to_string()),
            ..BookmarkFields::default()
        },
        &mut buffer,
    )
    .await
    .unwrap();
    assert_eq!(output(buffer).trim(), "b-200");

    let bookmarks = library.bookmarks().await.unwrap();
    let edited = bookmarks
        .iter()
        .find(|bookmark| bookmark.id.as_str() == "b-200")
        .unwrap();
    assert_eq!(edited.title, "The Book");
    assert_eq!(edited.url, "https://doc.rust-lang.org/book");
}

#[tokio::test]
async fn bookmark_edit_without_fields_is_rejected() {
    let library = seeded_library();
    let result = run_bookmark_edit(&library, "b-200", BookmarkFields::default(), &mut Vec::new()).await;
    assert!(matches!(result, Err(CliError::NothingToEdit)));
    assert_eq!(library.store().calls(StoreCall::UpdateBookmark), 0);
}

#[tokio::test]
async fn bookmark_delete_by_prefix_removes_it() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_bookmark_delete(&library, "b-2", &mut buffer).await.unwrap();
    assert_eq!(output(buffer).trim(), "b-200");

    let remaining = library.bookmarks().await.unwrap();
    assert_eq!(remaining.len(), 2);

    let ambiguous = run_bookmark_delete(&library, "b-1", &mut Vec::new()).await;
    assert!(matches!(ambiguous, Err(CliError::AmbiguousId(_))));
    assert_eq!(library.store().calls(StoreCall::DeleteBookmark), 1);
}

#[tokio::test]
async fn bookmark_share_prints_url_or_mailto() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_bookmark_share(&library, "b-100", false, &mut buffer)
        .await
        .unwrap();
    assert_eq!(output(buffer), "https://example.com\n");

    let mut buffer = Vec::new();
    run_bookmark_share(&library, "b-100", true, &mut buffer)
        .await
        .unwrap();
    let rendered = output(buffer);
    assert!(rendered.starts_with("mailto:?subject=Check%20out%20this%20bookmark&body="));
}

#[tokio::test]
async fn note_add_wraps_plain_text_and_show_prints_it() {
    let library = Library::new(MemoryStore::new());
    let mut buffer = Vec::new();
    run_note_add(&library, "Ideas", "First idea here\nSecond & last", &mut buffer)
        .await
        .unwrap();
    let id = output(buffer).trim().to_string();

    let notes = library.notes().await.unwrap();
    assert_eq!(
        notes[0].content,
        "<p>First idea here</p><p>Second &amp; last</p>"
    );

    let mut buffer = Vec::new();
    run_note_show(&library, &id, false, &mut buffer).await.unwrap();
    assert_eq!(
        output(buffer),
        "Ideas\n\nFirst idea here\nSecond & last\n"
    );
}

#[tokio::test]
async fn note_add_rejects_short_content() {
    let library = Library::new(MemoryStore::new());
    let error = run_note_add(&library, "Ideas", "tiny", &mut Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::Core(ref core) if core.validation().is_some()));
    assert_eq!(library.store().total_calls(), 0);
}

#[tokio::test]
async fn note_edit_title_keeps_content() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_note_edit(&library, "n-1", Some("Shopping"), &[], &Editor::new("true"), &mut buffer)
        .await
        .unwrap();
    assert_eq!(output(buffer).trim(), "n-1");

    let updated = library.note(&NoteId::new("n-1")).await.unwrap().unwrap();
    assert_eq!(updated.title, "Shopping");
    assert_eq!(updated.content, "<p>Milk and eggs</p><p>Fresh bread</p>");
}

#[tokio::test]
async fn note_edit_replaces_content_from_arguments() {
    let library = seeded_library();
    run_note_edit(
        &library,
        "n-1",
        None,
        &["Only".to_string(), "cheese today".to_string()],
        &Editor::new("true"),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    let updated = library.note(&NoteId::new("n-1")).await.unwrap().unwrap();
    assert_eq!(updated.title, "Groceries");
    assert_eq!(updated.content, "<p>Only cheese today</p>");
}

#[test]
fn formatted_notes_are_edited_as_markup() {
    let plain = note("n-1", "Groceries", "<p>Milk and eggs</p><p>Fresh bread</p>");
    assert_eq!(
        EditableBody::of(&plain),
        EditableBody::Plain("Milk and eggs\nFresh bread".to_string())
    );

    let formatted = note("n-2", "Plan", "<h1>Plan</h1><ul><li>Milk</li></ul>");
    let body = EditableBody::of(&formatted);
    assert_eq!(body.text(), formatted.content);
    assert_eq!(
        body.content_from("<h1>Plan</h1><ul><li>Cheese</li></ul>"),
        "<h1>Plan</h1><ul><li>Cheese</li></ul>"
    );
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn note_edit_in_editor_keeps_formatting() {
    let library = seeded_library();
    let created = library
        .create_note(NoteInput::new(
            "Weekend",
            "<h1>Plan</h1><ul><li><strong>Milk</strong> and eggs</li></ul>",
        ))
        .await
        .unwrap();

    run_note_edit(
        &library,
        created.id.as_str(),
        None,
        &[],
        &Editor::new("sed -i s/eggs/butter/"),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    let updated = library.note(&created.id).await.unwrap().unwrap();
    assert_eq!(
        updated.content,
        "<h1>Plan</h1><ul><li><strong>Milk</strong> and butter</li></ul>"
    );
}

#[tokio::test]
async fn note_delete_then_show_is_not_found() {
    let library = seeded_library();
    run_note_delete(&library, "n-1", &mut Vec::new())
        .await
        .unwrap();
    let result = run_note_show(&library, "n-1", false, &mut Vec::new()).await;
    assert!(matches!(
        result,
        Err(CliError::RecordNotFound { kind: "Note", .. })
    ));
}

#[tokio::test]
async fn note_share_prints_title_and_text() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_note_share(&library, "n-1", false, &mut buffer)
        .await
        .unwrap();
    assert_eq!(
        output(buffer),
        "Title: Groceries\nContent: Milk and eggs\nFresh bread\n"
    );
}

#[tokio::test]
async fn search_matches_bookmarks_and_notes() {
    let library = seeded_library();
    let mut buffer = Vec::new();
    run_search(&library, "BREAD", false, &mut buffer).await.unwrap();
    let rendered = output(buffer);
    assert!(rendered.contains("Notes"));
    assert!(rendered.contains("Groceries"));
    assert!(!rendered.contains("Bookmarks"));

    let mut buffer = Vec::new();
    run_search(&library, "reference", true, &mut buffer)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output(buffer)).unwrap();
    assert_eq!(json["bookmarks"].as_array().unwrap().len(), 1);
    assert_eq!(json["notes"].as_array().unwrap().len(), 0);

    let mut buffer = Vec::new();
    run_search(&library, "nothing-matches", false, &mut buffer)
        .await
        .unwrap();
    assert_eq!(output(buffer), "No matches for 'nothing-matches'\n");
}

#[test]
fn init_profile_updates_only_given_fields() {
    let mut config = ProfilesFile::default();
    config.profiles.insert(
        "work".to_string(),
        Profile {
            supabase_url: Some("https://old.supabase.co".to_string()),
            supabase_anon_key: Some("old-key".to_string()),
        },
    );

    let update = ProfileUpdate {
        supabase_url: None,
        supabase_anon_key: Some("new-key".to_string()),
    };
    let name = init_profile(&mut config, Some("work"), update, true).unwrap();
    assert_eq!(name, "work");
    assert_eq!(config.active_profile.as_deref(), Some("work"));

    let profile = config.profile("work").unwrap();
    assert_eq!(profile.supabase_url.as_deref(), Some("https://old.supabase.co"));
    assert_eq!(profile.supabase_anon_key.as_deref(), Some("new-key"));
    assert!(missing_fields(profile).is_empty());
}

#[test]
fn init_profile_without_activation_keeps_active_profile() {
    let mut config = ProfilesFile {
        active_profile: Some("home".to_string()),
        ..ProfilesFile::default()
    };
    let update = ProfileUpdate {
        supabase_url: Some("https://demo.supabase.co/".to_string()),
        supabase_anon_key: None,
    };
    init_profile(&mut config, Some("staging"), update, false).unwrap();

    assert_eq!(config.active_profile.as_deref(), Some("home"));
    let staging = config.profile("staging").unwrap();
    assert_eq!(staging.supabase_url.as_deref(), Some("https://demo.supabase.co"));
    assert_eq!(missing_fields(staging), vec!["supabase_anon_key"]);
}

#[test]
fn init_profile_rejects_non_http_url() {
    let mut config = ProfilesFile::default();
    let update = ProfileUpdate {
        supabase_url: Some("ftp://example.com".to_string()),
        supabase_anon_key: Some("key".to_string()),
    };
    let result = init_profile(&mut config, Some("bad"), update, false);
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn explicit_credentials_win() {
    let credentials =
        resolve_credentials(Some(" me@example.com ".to_string()), Some("pw".to_string())).unwrap();
    assert_eq!(credentials.email, "me@example.com");
    assert_eq!(credentials.password, "pw");
}

#[test]
fn completions_mention_subcommands() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("stash"));
    assert!(script.contains("bookmark"));
    assert!(script.contains("note"));
}
