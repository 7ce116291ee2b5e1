//! Main application component

use dioxus::prelude::*;

use stash_core::route::AppRoute;
use stash_core::{EntityTag, QueryClient, QueryKey};

use crate::services::connect;
use crate::state::{AppState, ConnectionStatus};
use crate::theme::ResolvedTheme;
use crate::views::{LibraryView, NoteEditorView};
use crate::INITIAL_ROUTE;

const GLOBAL_STYLE: &str = "
body { margin: 0; }
.note-body h1 { font-size: 1.6em; margin: 0.6em 0 0.3em 0; }
.note-body h2 { font-size: 1.3em; margin: 0.6em 0 0.3em 0; }
.note-body p { margin: 0 0 0.6em 0; }
.note-body img { max-width: 100%; }
";

/// Copy the query cache's invalidation generation for `tag` into `generation`
/// until the client goes away.
async fn follow_invalidations(client: QueryClient, tag: EntityTag, mut generation: Signal<u64>) {
    let mut observer = client.observe(QueryKey::all(tag));
    while observer.changed().await {
        let current = client.generation(tag);
        tracing::debug!("{tag} invalidated, generation {current}");
        generation.set(current);
    }
}

/// Root application component
#[component]
pub fn App() -> Element {
    let initial_route = INITIAL_ROUTE.get().cloned().unwrap_or_default();
    let mut state = use_context_provider(|| AppState::new(initial_route));

    // Connect once at startup
    use_future(move || async move {
        match connect().await {
            Ok((library, session)) => {
                let email = session.user.email.clone().unwrap_or(session.user.id);
                for tag in EntityTag::ALL {
                    spawn(follow_invalidations(
                        library.client().clone(),
                        tag,
                        state.generation_signal(tag),
                    ));
                }
                state.library.set(Some(library));
                state.connection.set(ConnectionStatus::Connected { email });
            }
            Err(error) => {
                tracing::error!("Failed to connect: {error}");
                state.connection.set(ConnectionStatus::Failed(error.to_string()));
            }
        }
    });

    let colors = state.palette();
    let theme_attr = match (state.theme)() {
        ResolvedTheme::Light => "light",
        ResolvedTheme::Dark => "dark",
    };
    let route = (state.route)();
    let route_key = route.path();
    let view = match route {
        AppRoute::Library => rsx! { LibraryView {} },
        AppRoute::NoteEditor { note_id } => rsx! {
            NoteEditorView { key: "{route_key}", note_id }
        },
    };

    rsx! {
        style { {GLOBAL_STYLE} }

        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_secondary};
                color: {colors.text_primary};
            ",
            AppHeader {}
            ConnectionBanner {}
            {view}
        }
    }
}

#[component]
fn AppHeader() -> Element {
    let mut state = use_context::<AppState>();
    let colors = state.palette();
    let status = match (state.connection)() {
        ConnectionStatus::Connecting => "Connecting...".to_string(),
        ConnectionStatus::Connected { email } => email,
        ConnectionStatus::Failed(_) => "Offline".to_string(),
    };

    rsx! {
        header {
            style: "
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 12px 24px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_primary};
            ",
            a {
                href: "#",
                style: "font-size: 18px; font-weight: 700; color: {colors.text_primary}; text-decoration: none;",
                onclick: move |evt| {
                    evt.prevent_default();
                    state.navigate(AppRoute::Library);
                },
                "Stash"
            }
            span { style: "font-size: 12px; color: {colors.text_muted};", "{status}" }
        }
    }
}

/// Startup failure, shown until the app is restarted
#[component]
fn ConnectionBanner() -> Element {
    let state = use_context::<AppState>();
    let colors = state.palette();

    let ConnectionStatus::Failed(message) = (state.connection)() else {
        return rsx! {};
    };

    rsx! {
        div {
            role: "alert",
            style: "
                margin: 16px 24px 0 24px;
                padding: 10px 14px;
                border: 1px solid {colors.error};
                border-radius: 8px;
                background: {colors.error_bg};
                color: {colors.error};
            ",
            div { style: "font-weight: 600;", "Could not open your library" }
            div { style: "font-size: 12px; margin-top: 2px;", "{message}" }
        }
    }
}
