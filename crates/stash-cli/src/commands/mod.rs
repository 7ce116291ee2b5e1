pub mod auth_cmd;
pub mod bookmark;
pub mod common;
pub mod completions;
pub mod config;
pub mod note;
pub mod search;
pub mod share;
