//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use stash_core::route::AppRoute;
use stash_core::store::SupabaseStore;
use stash_core::{EntityTag, Library};

use crate::theme::{ColorPalette, ResolvedTheme};

/// Library backed by the remote tables
pub type DesktopLibrary = Library<SupabaseStore>;

/// Progress of the startup connection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected { email: String },
    Failed(String),
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Data library, available once the startup connection succeeds
    pub library: Signal<Option<DesktopLibrary>>,
    pub connection: Signal<ConnectionStatus>,
    /// Current view
    pub route: Signal<AppRoute>,
    /// Current search query, applied to both library sections
    pub search_query: Signal<String>,
    pub show_bookmarks: Signal<bool>,
    pub show_notes: Signal<bool>,
    /// Mirrors of the query cache's per-tag invalidation generation.
    /// Reading one inside a resource makes it refetch after each invalidation.
    pub bookmarks_generation: Signal<u64>,
    pub notes_generation: Signal<u64>,
    pub theme: Signal<ResolvedTheme>,
}

impl AppState {
    pub fn new(route: AppRoute) -> Self {
        Self {
            library: Signal::new(None),
            connection: Signal::new(ConnectionStatus::Connecting),
            route: Signal::new(route),
            search_query: Signal::new(String::new()),
            show_bookmarks: Signal::new(true),
            show_notes: Signal::new(true),
            bookmarks_generation: Signal::new(0),
            notes_generation: Signal::new(0),
            theme: Signal::new(ResolvedTheme::from_env()),
        }
    }

    /// Library handle for event handlers; does not subscribe.
    #[must_use]
    pub fn library(&self) -> Option<DesktopLibrary> {
        (*self.library.peek()).clone()
    }

    #[must_use]
    pub fn palette(&self) -> &'static ColorPalette {
        (self.theme)().palette()
    }

    pub fn navigate(&mut self, route: AppRoute) {
        tracing::debug!("Navigating to {route}");
        self.route.set(route);
    }

    /// Generation signal mirroring `tag`
    #[must_use]
    pub const fn generation_signal(&self, tag: EntityTag) -> Signal<u64> {
        match tag {
            EntityTag::Bookmarks => self.bookmarks_generation,
            EntityTag::Notes => self.notes_generation,
        }
    }
}
