//! Error types for runner module

use thiserror::Error;

/// Errors raised while launching or waiting on an external tool
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Tool not found: {program}")]
    ToolNotFound { program: String },

    #[error("Failed to spawn {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("{program} timed out after {timeout_seconds} seconds")]
    Timeout {
        program: String,
        timeout_seconds: u64,
    },

    #[error("Execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

impl RunnerError {
    /// Name of the program involved, when the error carries one.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        match self {
            Self::ToolNotFound { program }
            | Self::SpawnFailed { program, .. }
            | Self::Timeout { program, .. } => Some(program),
            Self::ExecutionFailed { .. } => None,
        }
    }
}
