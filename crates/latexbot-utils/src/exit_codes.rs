//! Exit code constants and error mapping for latexbot.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `PROJECT_EXISTS` | Target project directory already exists |
//! | 4 | `TEMPLATE_ERROR` | Unknown template or rendering failure |
//! | 5 | `TOOL_MISSING` | Required TeX tool not found in PATH |
//! | 6 | `COMPILE_FAILED` | A compiler or bibliography pass failed |
//! | 7 | `TIMEOUT` | A pass exceeded the configured timeout |

/// Exit codes matching the documented exit code table.
///
/// The numeric values are part of the public API and will not change in 1.x
/// releases.
///
/// ```rust
/// use latexbot_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::COMPILE_FAILED.as_i32(), 6);
/// assert_eq!(ExitCode::SUCCESS, ExitCode::from_i32(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or configuration values
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// The directory a new project would be written to already exists
    pub const PROJECT_EXISTS: ExitCode = ExitCode(3);

    /// Unknown template id or a template that failed to render
    pub const TEMPLATE_ERROR: ExitCode = ExitCode(4);

    /// A TeX engine, bib tool or helper is not installed
    pub const TOOL_MISSING: ExitCode = ExitCode(5);

    /// A compiler or bibliography pass returned an error
    pub const COMPILE_FAILED: ExitCode = ExitCode(6);

    /// A pass exceeded the configured timeout
    pub const TIMEOUT: ExitCode = ExitCode(7);

    /// Get the numeric exit code value for `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
