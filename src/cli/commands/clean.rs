//! Clean command implementation
//!
//! Handles `latexbot clean`.

use anyhow::Result;
use std::path::PathBuf;

use latexbot_compiler::clean;

use super::common::resolve_dir;
use crate::{ExitCode, LatexBotError};

/// Execute the clean command
pub fn execute_clean_command(dir: Option<PathBuf>, stem: Option<&str>) -> Result<ExitCode> {
    let dir = resolve_dir(dir)?;
    let removed = clean(&dir, stem).map_err(LatexBotError::from)?;

    if removed.is_empty() {
        println!("Nothing to clean in {dir}");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Removed {} auxiliary files from {dir}:", removed.len());
    for path in &removed {
        println!("  - {}", path.strip_prefix(&dir).unwrap_or(path));
    }
    Ok(ExitCode::SUCCESS)
}
