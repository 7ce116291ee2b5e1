//! Note text entry: command arguments, piped stdin or `$VISUAL`/`$EDITOR`.

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::process::Command;

use crate::error::CliError;

const FALLBACK_EDITOR: &str = if cfg!(windows) { "notepad" } else { "vi" };

/// Trimmed text, or `None` when only whitespace is left.
pub fn non_blank(text: &str) -> Option<String> {
    Some(text.trim())
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// External editor command, possibly with arguments (`code --wait`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    command: String,
}

impl Editor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// `$VISUAL`, then `$EDITOR`, then the platform default.
    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .into_iter()
            .find_map(|name| env::var(name).ok().as_deref().and_then(non_blank))
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        Self::new(command)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Open `initial` in a scratch file and return what was saved.
    pub fn edit(&self, initial: &str) -> Result<Option<String>, CliError> {
        let mut scratch = tempfile::Builder::new()
            .prefix("stash-note-")
            .suffix(".txt")
            .tempfile()?;
        scratch.write_all(initial.as_bytes())?;
        scratch.flush()?;

        self.open(scratch.path())?;
        Ok(non_blank(&fs::read_to_string(scratch.path())?))
    }

    fn open(&self, path: &Path) -> Result<(), CliError> {
        let mut words = self.command.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| CliError::EditorFailed("editor command is empty".into()))?;

        tracing::debug!(editor = %self.command, "Opening editor");
        let status = Command::new(program).args(words).arg(path).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(CliError::EditorFailed(format!(
                "`{}` exited with {status}",
                self.command
            )))
        }
    }
}

/// Whatever was piped to stdin; `None` for an interactive terminal.
pub fn piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    Ok(non_blank(&text))
}

/// Note text from `args`, else piped stdin, else the editor.
pub fn note_text(args: &[String]) -> Result<String, CliError> {
    if let Some(text) = non_blank(&args.join(" ")) {
        return Ok(text);
    }
    if let Some(text) = piped_stdin()? {
        return Ok(text);
    }
    Editor::from_env().edit("")?.ok_or(CliError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_blank("  hello \n"), Some("hello".to_string()));
        assert_eq!(non_blank(" \n\t "), None);
    }

    #[test]
    fn arguments_are_joined() {
        let args = vec!["Milk".to_string(), "and".to_string(), "eggs".to_string()];
        assert_eq!(note_text(&args).unwrap(), "Milk and eggs");
    }

    #[test]
    fn empty_editor_command_is_rejected() {
        let error = Editor::new("   ").edit("draft").unwrap_err();
        assert!(matches!(error, CliError::EditorFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_reports_its_command() {
        let error = Editor::new("false").edit("draft").unwrap_err();
        assert!(error.to_string().contains("`false` exited"));
    }

    #[cfg(unix)]
    #[test]
    fn successful_editor_keeps_saved_text() {
        // `true` leaves the scratch file as written
        let saved = Editor::new("true").edit("  kept text  ").unwrap();
        assert_eq!(saved.as_deref(), Some("kept text"));
    }
}
