//! Foundation utilities shared by the latexbot crates: error types and their
//! exit-code mapping, tracing setup, styled console reports, atomic file
//! writes and UTF-8 path helpers.

pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod paths;
pub mod types;

pub use error::{
    CompileError, ConfigError, ErrorCategory, LatexBotError, TemplateError, UserFriendlyError,
};
pub use exit_codes::ExitCode;
