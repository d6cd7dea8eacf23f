use std::fmt;
use thiserror::Error;

pub use latexbot_runner::RunnerError;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `LatexBotError` is what the scaffolding and compile operations surface to
/// the CLI. It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes for consistent error reporting
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors, missing input file |
/// | 3 | Project directory already exists |
/// | 4 | Unknown template, rendering failure |
/// | 5 | TeX tool not installed |
/// | 6 | Compiler or bib pass failed |
/// | 7 | Pass timed out |
/// | 1 | Other errors |
///
/// # Example
///
/// ```rust
/// use latexbot_utils::error::{LatexBotError, TemplateError};
/// use latexbot_utils::exit_codes::ExitCode;
///
/// let err = LatexBotError::Template(TemplateError::ProjectExists {
///     path: "new_thesis".to_string(),
/// });
/// assert_eq!(err.to_exit_code(), ExitCode::PROJECT_EXISTS);
/// assert!(err.display_for_user().contains("Suggestions:"));
/// ```
///
/// Library code returns `LatexBotError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum LatexBotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Template,
    Compilation,
    ToolMissing,
    FileSystem,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Template => write!(f, "Template"),
            Self::Compilation => write!(f, "Compilation"),
            Self::ToolMissing => write!(f, "Tool Missing"),
            Self::FileSystem => write!(f, "File System"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => {
                format!("Configuration file not found: {path}")
            }
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [defaults] and [author] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, value: _ } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::NotFound { path: _ } => Some(
                "An explicit --config path must point at an existing file.".to_string(),
            ),
            Self::DiscoveryFailed { reason: _ } => Some(
                "latexbot searches for .latexbot/config.toml starting from the current directory upward."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax using a TOML validator".to_string(),
                "Run 'latexbot config' to see which file was loaded".to_string(),
            ],
            Self::InvalidValue { key, value: _ } => match key.as_str() {
                "compiler" => vec![
                    "Use one of 'pdflatex', 'xelatex', 'lualatex' or 'auto'".to_string(),
                    "Example: --compiler xelatex".to_string(),
                ],
                "bib_tool" => vec![
                    "Use one of 'bibtex', 'biber', 'auto' or 'none'".to_string(),
                    "Use 'auto' to pick the tool from the document source".to_string(),
                ],
                "timeout_secs" => vec![
                    "Use a whole number of seconds between 1 and 3600".to_string(),
                    "Example: --timeout 120".to_string(),
                ],
                _ => vec![
                    "Check the README for valid values for this option".to_string(),
                    "Remove the option to use the default value".to_string(),
                ],
            },
            Self::NotFound { path: _ } => vec![
                "Check the path passed to --config".to_string(),
                "Omit --config to use .latexbot/config.toml discovery".to_string(),
            ],
            Self::DiscoveryFailed { reason: _ } => vec![
                "Check file permissions in the current directory and parent directories"
                    .to_string(),
                "Use --config <path> to specify configuration file explicitly".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

// ============================================================================
// TemplateError
// ============================================================================

/// Project scaffolding errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown template: {id}")]
    UnknownTemplate { id: String },

    #[error("The project directory already exists at `{path}`")]
    ProjectExists { path: String },

    #[error("Template '{template}' references unknown placeholder <<{name}>>")]
    UnknownPlaceholder { template: String, name: String },

    #[error("Too many authors: {count} given, at most {max} supported")]
    TooManyAuthors { count: usize, max: usize },

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

impl UserFriendlyError for TemplateError {
    fn user_message(&self) -> String {
        match self {
            Self::UnknownTemplate { id } => format!("'{id}' is not a known project template"),
            Self::ProjectExists { path } => {
                format!("The project directory already exists at `{path}`")
            }
            Self::UnknownPlaceholder { template, name } => {
                format!("Template '{template}' has no value for placeholder <<{name}>>")
            }
            Self::TooManyAuthors { count, max } => {
                format!("{count} authors were given but the template supports at most {max}")
            }
            Self::WriteFailed { path, reason } => {
                format!("Could not write project file {path}: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::UnknownTemplate { .. } => Some(
                "Templates are built into latexbot and selected by id.".to_string(),
            ),
            Self::ProjectExists { .. } => Some(
                "Projects are only created in directories that do not exist yet, so no existing work is overwritten."
                    .to_string(),
            ),
            Self::UnknownPlaceholder { .. } => Some(
                "Embedded templates use <<name>> placeholders that are filled from the project options."
                    .to_string(),
            ),
            Self::TooManyAuthors { .. } => Some(
                "AMS author macros are numbered One through Nine.".to_string(),
            ),
            Self::WriteFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownTemplate { .. } => vec![
                "Run 'latexbot template list' to see available templates".to_string(),
                "Valid ids: plainart, newart, amsart, thesis, beamer".to_string(),
            ],
            Self::ProjectExists { .. } => vec![
                "Choose another directory with --dir".to_string(),
                "Remove or rename the existing directory".to_string(),
            ],
            Self::UnknownPlaceholder { .. } => vec![
                "This is a bug in the embedded template; please report it".to_string(),
            ],
            Self::TooManyAuthors { .. } => vec![
                "Add the remaining authors by editing main.tex after generation".to_string(),
            ],
            Self::WriteFailed { .. } => vec![
                "Check that the parent directory is writable".to_string(),
                "Check available disk space".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::WriteFailed { .. } => ErrorCategory::FileSystem,
            _ => ErrorCategory::Template,
        }
    }
}

// ============================================================================
// CompileError
// ============================================================================

/// Compile driver errors
#[derive(Error, Debug)]
pub enum CompileError {
    #[error(
        "No input file given and no main.tex in {dir}\n\nUsage: latexbot compile [FILE]\n  FILE defaults to ./main.tex"
    )]
    NoInput { dir: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Pass {pass} ({engine}) failed with exit code {}", code_label(.exit_code))]
    PassFailed {
        pass: usize,
        engine: String,
        exit_code: Option<i32>,
        errors: Vec<String>,
    },

    #[error("Required tool not found: {tool}")]
    ToolMissing { tool: String },

    #[error("Pass {pass} ({tool}) timed out after {seconds} seconds")]
    Timeout {
        pass: usize,
        tool: String,
        seconds: u64,
    },

    #[error("Failed to open {path} with {viewer}: {reason}")]
    ViewerFailed {
        path: String,
        viewer: String,
        reason: String,
    },
}

fn code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl UserFriendlyError for CompileError {
    fn user_message(&self) -> String {
        match self {
            Self::NoInput { dir } => {
                format!("No input file given and no main.tex found in {dir}")
            }
            Self::InputNotFound { path } => format!("Input file does not exist: {path}"),
            Self::PassFailed {
                pass,
                engine,
                exit_code,
                errors,
            } => {
                let code = code_label(exit_code);
                if errors.is_empty() {
                    format!("Pass {pass} ({engine}) failed with exit code {code}")
                } else {
                    format!(
                        "Pass {pass} ({engine}) failed with exit code {code}:\n  {}",
                        errors.join("\n  ")
                    )
                }
            }
            Self::ToolMissing { tool } => format!("'{tool}' is not installed or not in PATH"),
            Self::Timeout {
                pass,
                tool,
                seconds,
            } => format!("Pass {pass} ({tool}) did not finish within {seconds} seconds"),
            Self::ViewerFailed {
                path,
                viewer,
                reason,
            } => format!("Could not open {path} with {viewer}: {reason}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::NoInput { .. } => {
                Some("Usage: latexbot compile [FILE]  (FILE defaults to ./main.tex)".to_string())
            }
            Self::PassFailed { engine, .. } => Some(format!(
                "{engine} stopped at the first error. The full transcript is in the .log file next to the source."
            )),
            Self::ToolMissing { .. } => Some(
                "latexbot drives an existing TeX installation such as TeX Live or MiKTeX."
                    .to_string(),
            ),
            Self::Timeout { .. } => Some(
                "Passes run non-interactively; a pass that hangs is usually waiting on a missing file."
                    .to_string(),
            ),
            Self::InputNotFound { .. } | Self::ViewerFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoInput { .. } => vec![
                "Pass the .tex file explicitly: latexbot compile paper.tex".to_string(),
                "Run the command from a project created with 'latexbot new'".to_string(),
            ],
            Self::InputNotFound { .. } => vec![
                "Check the file name and extension".to_string(),
            ],
            Self::PassFailed { .. } => vec![
                "Fix the first error listed; later errors are often consequences".to_string(),
                "Re-run with -v to see every pass".to_string(),
            ],
            Self::ToolMissing { tool } => vec![
                format!("Install '{tool}' (it ships with TeX Live and MiKTeX)"),
                "Run 'latexbot doctor' to check the TeX toolchain".to_string(),
            ],
            Self::Timeout { .. } => vec![
                "Increase the limit with --timeout or timeout_secs in config".to_string(),
                "Check the .log file for the point where the pass stalled".to_string(),
            ],
            Self::ViewerFailed { .. } => vec![
                "Set 'viewer' in the [defaults] section of .latexbot/config.toml".to_string(),
                "Open the PDF manually".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolMissing { .. } => ErrorCategory::ToolMissing,
            Self::NoInput { .. } | Self::InputNotFound { .. } => ErrorCategory::FileSystem,
            _ => ErrorCategory::Compilation,
        }
    }
}

// ============================================================================
// RunnerError
// ============================================================================

impl UserFriendlyError for RunnerError {
    fn user_message(&self) -> String {
        match self {
            Self::ToolNotFound { program } => format!("'{program}' is not installed or not in PATH"),
            Self::SpawnFailed { program, reason } => {
                format!("Failed to start '{program}': {reason}")
            }
            Self::Timeout {
                program,
                timeout_seconds,
            } => format!("'{program}' did not finish within {timeout_seconds} seconds"),
            Self::ExecutionFailed { reason } => format!("Process execution failed: {reason}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::ToolNotFound { .. } => {
                Some("latexbot looks up TeX tools on the PATH.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ToolNotFound { .. } => vec![
                "Run 'latexbot doctor' to check the TeX toolchain".to_string(),
            ],
            Self::Timeout { .. } => vec![
                "Increase the limit with --timeout".to_string(),
            ],
            _ => vec!["Check system resources and permissions".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolNotFound { .. } => ErrorCategory::ToolMissing,
            _ => ErrorCategory::Internal,
        }
    }
}

// ============================================================================
// LatexBotError
// ============================================================================

impl UserFriendlyError for LatexBotError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Template(err) => err.user_message(),
            Self::Compile(err) => err.user_message(),
            Self::Runner(err) => err.user_message(),
            Self::Io(io_err) => format!("File system operation failed: {io_err}"),
            Self::Other(msg) => msg.clone(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Template(err) => err.context(),
            Self::Compile(err) => err.context(),
            Self::Runner(err) => err.context(),
            Self::Io(_) => Some("A file could not be read or written.".to_string()),
            Self::Other(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Template(err) => err.suggestions(),
            Self::Compile(err) => err.suggestions(),
            Self::Runner(err) => err.suggestions(),
            Self::Io(_) => vec![
                "Check file permissions".to_string(),
                "Check available disk space".to_string(),
            ],
            Self::Other(_) => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Template(err) => err.category(),
            Self::Compile(err) => err.category(),
            Self::Runner(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Other(_) => ErrorCategory::Internal,
        }
    }
}

impl LatexBotError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    ///   • <suggestion 2>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error: {}\n", self.user_message()));

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the CLI exit code.
    ///
    /// ```rust
    /// use latexbot_utils::error::{CompileError, LatexBotError};
    /// use latexbot_utils::exit_codes::ExitCode;
    ///
    /// let err = LatexBotError::Compile(CompileError::ToolMissing {
    ///     tool: "biber".to_string(),
    /// });
    /// assert_eq!(err.to_exit_code(), ExitCode::TOOL_MISSING);
    /// ```
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            LatexBotError::Config(_) => ExitCode::CLI_ARGS,

            LatexBotError::Template(TemplateError::ProjectExists { .. }) => {
                ExitCode::PROJECT_EXISTS
            }
            LatexBotError::Template(TemplateError::WriteFailed { .. }) => ExitCode::INTERNAL,
            LatexBotError::Template(_) => ExitCode::TEMPLATE_ERROR,

            LatexBotError::Compile(compile_err) => match compile_err {
                CompileError::NoInput { .. } | CompileError::InputNotFound { .. } => {
                    ExitCode::CLI_ARGS
                }
                CompileError::PassFailed { .. } => ExitCode::COMPILE_FAILED,
                CompileError::ToolMissing { .. } => ExitCode::TOOL_MISSING,
                CompileError::Timeout { .. } => ExitCode::TIMEOUT,
                CompileError::ViewerFailed { .. } => ExitCode::INTERNAL,
            },

            LatexBotError::Runner(RunnerError::ToolNotFound { .. }) => ExitCode::TOOL_MISSING,
            LatexBotError::Runner(RunnerError::Timeout { .. }) => ExitCode::TIMEOUT,

            _ => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::ExitCode;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::FileSystem.to_string(), "File System");
        assert_eq!(ErrorCategory::ToolMissing.to_string(), "Tool Missing");
        assert_eq!(ErrorCategory::Compilation.to_string(), "Compilation");
    }

    #[test]
    fn test_project_exists_message_names_path() {
        let err = TemplateError::ProjectExists {
            path: "/tmp/new_thesis".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The project directory already exists at `/tmp/new_thesis`"
        );
        assert_eq!(err.category(), ErrorCategory::Template);
    }

    #[test]
    fn test_invalid_value_suggestions_are_key_specific() {
        let compiler = ConfigError::InvalidValue {
            key: "compiler".to_string(),
            value: "must be one of pdflatex, xelatex, lualatex, auto".to_string(),
        };
        assert!(compiler.suggestions()[0].contains("xelatex"));

        let timeout = ConfigError::InvalidValue {
            key: "timeout_secs".to_string(),
            value: "must be between 1 and 3600".to_string(),
        };
        assert!(timeout.suggestions()[0].contains("3600"));

        let other = ConfigError::InvalidValue {
            key: "viewer".to_string(),
            value: "x".to_string(),
        };
        assert!(other.suggestions()[1].contains("default"));
    }

    #[test]
    fn test_pass_failed_lists_log_errors() {
        let err = CompileError::PassFailed {
            pass: 1,
            engine: "pdflatex".to_string(),
            exit_code: Some(1),
            errors: vec![
                "main.tex:12: Undefined control sequence.".to_string(),
                "Emergency stop.".to_string(),
            ],
        };
        assert_eq!(err.to_string(), "Pass 1 (pdflatex) failed with exit code 1");
        let msg = err.user_message();
        assert!(msg.contains("Undefined control sequence"));
        assert!(msg.contains("Emergency stop"));
    }

    #[test]
    fn test_pass_failed_without_exit_code() {
        let err = CompileError::PassFailed {
            pass: 3,
            engine: "xelatex".to_string(),
            exit_code: None,
            errors: Vec::new(),
        };
        assert_eq!(err.to_string(), "Pass 3 (xelatex) failed with exit code none");
    }

    #[test]
    fn test_no_input_message_includes_usage() {
        let err = CompileError::NoInput {
            dir: "/work".to_string(),
        };
        assert!(err.to_string().contains("Usage: latexbot compile [FILE]"));
    }

    #[test]
    fn test_display_for_user_layout() {
        let err = LatexBotError::Compile(CompileError::ToolMissing {
            tool: "biber".to_string(),
        });
        let report = err.display_for_user();
        assert!(report.starts_with("Error: 'biber' is not installed or not in PATH\n"));
        assert!(report.contains("\nContext: "));
        assert!(report.contains("\nSuggestions:\n  • Install 'biber'"));
    }

    #[test]
    fn test_display_for_user_other_has_no_sections() {
        let err = LatexBotError::Other("boom".to_string());
        assert_eq!(err.display_for_user(), "Error: boom\n");
    }

    #[test]
    fn test_to_exit_code_table() {
        let cases: Vec<(LatexBotError, ExitCode)> = vec![
            (
                ConfigError::InvalidFile("bad".to_string()).into(),
                ExitCode::CLI_ARGS,
            ),
            (
                TemplateError::ProjectExists {
                    path: "x".to_string(),
                }
                .into(),
                ExitCode::PROJECT_EXISTS,
            ),
            (
                TemplateError::UnknownTemplate {
                    id: "memoir".to_string(),
                }
                .into(),
                ExitCode::TEMPLATE_ERROR,
            ),
            (
                TemplateError::TooManyAuthors { count: 10, max: 9 }.into(),
                ExitCode::TEMPLATE_ERROR,
            ),
            (
                CompileError::ToolMissing {
                    tool: "pdflatex".to_string(),
                }
                .into(),
                ExitCode::TOOL_MISSING,
            ),
            (
                CompileError::PassFailed {
                    pass: 1,
                    engine: "pdflatex".to_string(),
                    exit_code: Some(1),
                    errors: Vec::new(),
                }
                .into(),
                ExitCode::COMPILE_FAILED,
            ),
            (
                CompileError::Timeout {
                    pass: 2,
                    tool: "bibtex".to_string(),
                    seconds: 5,
                }
                .into(),
                ExitCode::TIMEOUT,
            ),
            (
                CompileError::NoInput {
                    dir: ".".to_string(),
                }
                .into(),
                ExitCode::CLI_ARGS,
            ),
            (
                RunnerError::ToolNotFound {
                    program: "fc-list".to_string(),
                }
                .into(),
                ExitCode::TOOL_MISSING,
            ),
            (
                RunnerError::Timeout {
                    program: "lualatex".to_string(),
                    timeout_seconds: 1,
                }
                .into(),
                ExitCode::TIMEOUT,
            ),
            (
                std::io::Error::other("disk full").into(),
                ExitCode::INTERNAL,
            ),
            (LatexBotError::Other("x".to_string()), ExitCode::INTERNAL),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_exit_code(), expected, "mapping for {err:?}");
        }
    }
}
