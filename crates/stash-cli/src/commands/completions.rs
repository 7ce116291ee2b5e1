use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

const BIN_NAME: &str = "stash";

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
        }
    }
}

/// Write the completion script to `output_path`, or stdout.
pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = render_completions(shell);
    match output_path {
        Some(path) => {
            fs::write(path, &script)?;
            tracing::info!(path = %path.display(), "Wrote {shell:?} completions");
            println!("{}", path.display());
        }
        None => io::stdout().lock().write_all(&script)?,
    }
    Ok(())
}

pub fn render_completions(shell: CompletionShell) -> Vec<u8> {
    let mut script = Vec::new();
    clap_complete::generate(Shell::from(shell), &mut Cli::command(), BIN_NAME, &mut script);
    script
}
