//! Stash CLI - manage bookmarks and notes from the terminal

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod editor;
mod error;

#[cfg(test)]
mod tests;

use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::bookmark::run_bookmark;
use crate::commands::common::open_library;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::note::run_note;
use crate::commands::search::run_search;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();
    let mut stdout = io::stdout();

    match cli.command {
        Some(Commands::Bookmark { command }) => {
            let library = open_library(profile).await?;
            run_bookmark(command, &library, &mut stdout).await?;
        }
        Some(Commands::Note { command }) => {
            let library = open_library(profile).await?;
            run_note(command, &library, &mut stdout).await?;
        }
        Some(Commands::Search { query, json }) => {
            let library = open_library(profile).await?;
            run_search(&library, &query, json, &mut stdout).await?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, profile)?,
        Some(Commands::Auth { command }) => run_auth(command, profile).await?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "stash=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
