//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `scripted` - Canned operator answers for tests
//! - This module - The [Operator] seam and its interactive terminal implementation

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command as Process;

use tempfile::Builder;

use crate::error::{GitxError, Result};

pub mod formatter;
pub mod scripted;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_command_log, display_error, display_message, display_status,
    display_success, display_warning,
};
pub use scripted::ScriptedOperator;

/// Everything the workflows need from the person at the keyboard.
pub trait Operator {
    /// Ask a yes/no question. Anything but "y"/"yes" declines.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for one line of free text. May be empty.
    fn ask(&self, prompt: &str) -> Result<String>;

    /// Collect multi-line text starting from `template`.
    ///
    /// Lines beginning with `#` are dropped from the result.
    fn compose(&self, template: &str) -> Result<String>;

    /// Show progress information.
    fn say(&self, text: &str) {
        display_status(text);
    }
}

/// Drops comment lines and surrounding blank space from composed text.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Operator backed by stdin/stdout and `$EDITOR`
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    fn read_line(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Operator for TerminalOperator {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("\n{} (y/N): ", prompt);
        let response = self.read_line()?.to_lowercase();
        Ok(response == "y" || response == "yes")
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        print!("\n{} ", prompt);
        self.read_line()
    }

    fn compose(&self, template: &str) -> Result<String> {
        let editor = env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".to_string());
        let mut file = Builder::new().prefix("gitx-message-").suffix(".md").tempfile()?;
        file.write_all(template.as_bytes())?;
        file.flush()?;

        let status = Process::new(&editor)
            .arg(file.path())
            .status()
            .map_err(|e| GitxError::prompt(format!("could not start '{}': {}", editor, e)))?;
        if !status.success() {
            return Err(GitxError::prompt(format!("'{}' exited with {}", editor, status)));
        }
        let text = fs::read_to_string(file.path())?;
        Ok(strip_comments(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[cfg(unix)]
    #[serial]
    fn test_compose_reads_back_edited_file() {
        env::set_var("VISUAL", "true");
        let text = TerminalOperator.compose("\n\nFixes the widget\n# Describe your pull request\n");
        env::remove_var("VISUAL");
        assert_eq!(text.unwrap(), "Fixes the widget");
    }

    #[test]
    #[cfg(unix)]
    #[serial]
    fn test_compose_with_failing_editor() {
        env::set_var("VISUAL", "false");
        let text = TerminalOperator.compose("template");
        env::remove_var("VISUAL");
        assert!(matches!(text, Err(GitxError::Prompt(_))));
    }

    #[test]
    fn test_strip_comments() {
        let text = "\n\nFixes the widget\n# Describe your pull request\nSecond line\n";
        assert_eq!(strip_comments(text), "Fixes the widget\nSecond line");
    }

    #[test]
    fn test_strip_comments_only_template() {
        assert_eq!(strip_comments("\n\n# Describe your pull request\n"), "");
    }
}
