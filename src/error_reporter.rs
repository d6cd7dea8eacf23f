//! Error reporting for the CLI
//!
//! Builds on [`LatexBotError::display_for_user`] with hints for the command
//! that failed.

use latexbot_utils::error::{CompileError, LatexBotError, UserFriendlyError};

/// Render the user report for `error`, raised while running `operation`.
pub(crate) fn create_contextual_report(error: &LatexBotError, operation: &str) -> String {
    let mut report = format!("✗ {}", error.display_for_user());
    report.push_str(&format!("\nCategory: {}\n", error.category()));

    if let Some(hint) = operation_hint(error, operation) {
        report.push_str(&format!("\nHint: {hint}\n"));
    }
    report
}

fn operation_hint(error: &LatexBotError, operation: &str) -> Option<&'static str> {
    match (error, operation) {
        (LatexBotError::Compile(CompileError::PassFailed { .. }), "new" | "fonts") => {
            Some("The project files were written; fix the error and run `latexbot compile`")
        }
        (LatexBotError::Template(_), "new") => {
            Some("Run `latexbot template list` to see the available templates")
        }
        (LatexBotError::Config(_), _) => Some("Run `latexbot config` to see the effective values"),
        _ => None,
    }
}

/// Suggestions for errors that never became a [`LatexBotError`].
pub(crate) fn enhance_error_context(error: &anyhow::Error) -> Option<Vec<String>> {
    let error_str = format!("{error:#}");

    if error_str.contains("Permission denied") {
        Some(vec![
            "Check file and directory permissions".to_string(),
            "Ensure you have write access to the target directory".to_string(),
        ])
    } else if error_str.contains("No such file or directory") {
        Some(vec![
            "Verify the specified paths exist".to_string(),
            "Check that you're running from the correct directory".to_string(),
        ])
    } else if error_str.contains("not UTF-8") {
        Some(vec!["Use a directory whose path is valid UTF-8".to_string()])
    } else {
        None
    }
}
