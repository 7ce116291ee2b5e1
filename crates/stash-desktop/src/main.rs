//! Stash Desktop Application
//!
//! Browse, search and edit bookmarks and rich-text notes.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod queries;
mod services;
mod state;
mod theme;
mod views;

use std::sync::OnceLock;

use dioxus::desktop::{Config, WindowBuilder};
use stash_core::route::AppRoute;

/// Route the first window opens on, taken from the first CLI argument
/// (for example `stash-desktop /notes/new`).
pub static INITIAL_ROUTE: OnceLock<AppRoute> = OnceLock::new();

fn main() {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "stash=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Stash...");

    let route = route_from_args(std::env::args());
    tracing::debug!("Initial route: {route}");
    INITIAL_ROUTE.set(route).ok();

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Stash")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 760.0)),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}

/// Route named by the first argument after the program name, if any.
fn route_from_args(args: impl IntoIterator<Item = String>) -> AppRoute {
    args.into_iter()
        .nth(1)
        .map_or_else(AppRoute::default, |path| AppRoute::parse(&path))
}

#[cfg(test)]
mod tests {
    use stash_core::NoteId;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn first_argument_picks_the_route() {
        assert_eq!(route_from_args(args(&["stash-desktop"])), AppRoute::Library);
        assert_eq!(
            route_from_args(args(&["stash-desktop", "/notes/n7"])),
            AppRoute::NoteEditor {
                note_id: Some(NoteId::new("n7"))
            }
        );
        assert_eq!(
            route_from_args(args(&["stash-desktop", "/elsewhere"])),
            AppRoute::Library
        );
    }
}
