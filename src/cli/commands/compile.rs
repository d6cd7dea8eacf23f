//! Compile command implementation
//!
//! Handles `latexbot compile`.

use anyhow::Result;
use std::path::PathBuf;

use latexbot_compiler::resolve_tex_path;
use latexbot_utils::paths::{current_dir, to_utf8};

use super::common::compile_and_report;
use crate::{Config, ExitCode, LatexBotError};

/// Execute the compile command.
///
/// `--engine`, `--bib`, `--open` and `--clean` reach this point through the
/// configuration, where they take precedence over file and environment.
pub fn execute_compile_command(file: Option<PathBuf>, config: &Config) -> Result<ExitCode> {
    let cwd = current_dir()?;
    let file = file.map(to_utf8).transpose()?;
    let tex = resolve_tex_path(file.as_deref(), &cwd).map_err(LatexBotError::from)?;

    compile_and_report(&tex, config)?;
    Ok(ExitCode::SUCCESS)
}
