//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::domain::Command;
use crate::warning::WorkflowWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a workflow warning to the user.
pub fn display_warning(warning: &WorkflowWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Echo a command before it runs.
pub fn display_command(command: &Command) {
    println!("{}", style(format!("> {}", command)).cyan());
}

/// Show the commands a failed workflow managed to issue.
///
/// The last entry is the command that failed.
pub fn display_command_log(commands: &[Command]) {
    if commands.is_empty() {
        return;
    }
    eprintln!("\n{}", style("Commands issued before the failure:").bold());
    for (i, command) in commands.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, command);
    }
}

/// Display a message that would have been posted to the activity feed.
pub fn display_message(body: &str, url: Option<&str>) {
    println!("\n{}", style("Message:").bold());
    for line in body.lines() {
        println!("  {}", line);
    }
    if let Some(url) = url {
        println!("  {}", style(url).underlined());
    }
}

/// Lists branches affected by a reset.
pub fn format_affected_branches(branches: &[String]) -> String {
    let mut lines = vec!["the following branches were affected:".to_string()];
    lines.extend(branches.iter().map(|b| format!("* {}", b)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_affected_branches() {
        let text = format_affected_branches(&["dev-bar".to_string(), "dev-baz".to_string()]);
        assert_eq!(
            text,
            "the following branches were affected:\n* dev-bar\n* dev-baz"
        );
    }

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed to stdout/stderr
        display_status("test status");
        display_success("test success");
        display_command(&Command::checkout("master"));
        display_command_log(&[Command::checkout("master")]);
        display_message("#worklog test", Some("http://example.com"));
    }
}
