use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "stash")]
#[command(about = "Manage bookmarks and notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name for service configuration and stored session
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage bookmarks
    #[command(alias = "b")]
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Manage notes
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Search bookmarks and notes
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, inspect or clear the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum BookmarkCommands {
    /// List bookmarks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a bookmark
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: String,
    },
    /// Change fields of a bookmark
    Edit {
        /// Bookmark ID or unique ID prefix
        id: String,
        #[command(flatten)]
        fields: BookmarkFields,
    },
    /// Delete a bookmark
    Delete {
        /// Bookmark ID or unique ID prefix
        id: String,
    },
    /// Print a bookmark's link, or an e-mail link with --email
    Share {
        /// Bookmark ID or unique ID prefix
        id: String,
        #[arg(long)]
        email: bool,
    },
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct BookmarkFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note as plain text
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note; content comes from arguments, stdin or $EDITOR
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        title: String,
        /// Note content
        content: Vec<String>,
    },
    /// Edit a note's title or content
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Replacement content; opens $EDITOR when omitted and no title is given.
        /// Formatted notes open as markup so their formatting is kept.
        content: Vec<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Print a note as shareable text, or an e-mail link with --email
    Share {
        /// Note ID or unique ID prefix
        id: String,
        #[arg(long)]
        email: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email/password and store the session in the keychain
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Account email (defaults to STASH_ACCOUNT_EMAIL)
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,
        /// Account password (defaults to STASH_ACCOUNT_PASSWORD)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// Show auth status for profile
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
