//! Fonts command implementation
//!
//! Handles `latexbot fonts` subcommands.

use anyhow::Result;
use camino::Utf8PathBuf;
use chrono::Local;
use std::path::PathBuf;

use latexbot_runner::NativeRunner;
use latexbot_tex::LATEX_FONTS;
use latexbot_tex::fonts::{fonts_demo_tex, fonts_tex, system_fonts};
use latexbot_utils::atomic_write::write_file_atomic;
use latexbot_utils::logging::print_success;

use super::common::{compile_and_report, resolve_dir};
use crate::cli::args::FontsCommands;
use crate::{Config, ExitCode, LatexBotError};

pub(crate) const FONTS_FILE: &str = "fonts.tex";
pub(crate) const FONTS_DEMO_FILE: &str = "fonts_demo.tex";

/// Execute font catalog commands
pub fn execute_fonts_command(cmd: FontsCommands, config: &Config) -> Result<ExitCode> {
    match cmd {
        FontsCommands::List => {
            println!("{:<14} {:<22} Font", "Id", "Environment");
            for entry in LATEX_FONTS {
                println!("{:<14} {:<22} {}", entry.id, entry.env_name(), entry.name);
            }
            println!();
            println!(
                "{} fonts. Write the environments with `latexbot fonts generate`.",
                LATEX_FONTS.len()
            );
        }
        FontsCommands::Generate { dir } => {
            let path = write_fonts_file(dir, FONTS_FILE, config, fonts_tex)?;
            print_success(&format!("Wrote {path}"));
            println!("  Add \\input{{fonts}} to your preamble, then wrap text in an environment:");
            println!("  \\begin{{courier_font}} ... \\end{{courier_font}}");
        }
        FontsCommands::Demo { dir, compile } => {
            let path = write_fonts_file(dir, FONTS_DEMO_FILE, config, fonts_demo_tex)?;
            print_success(&format!("Wrote {path}"));
            if compile {
                compile_and_report(&path, config)?;
            }
        }
        FontsCommands::System => {
            let families = system_fonts(&NativeRunner::new()).map_err(LatexBotError::from)?;
            for family in &families {
                println!("{family}");
            }
            tracing::debug!(count = families.len(), "listed system fonts");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn write_fonts_file(
    dir: Option<PathBuf>,
    name: &str,
    config: &Config,
    render: fn(&str, chrono::NaiveDate) -> String,
) -> Result<Utf8PathBuf> {
    let dir = resolve_dir(dir)?;
    let path = dir.join(name);
    let content = render(config.author_name(), Local::now().date_naive());
    write_file_atomic(&path, &content)?;
    Ok(path)
}
