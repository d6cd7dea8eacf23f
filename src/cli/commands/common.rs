//! Common helpers shared across CLI commands
//!
//! Compile option assembly from config, the compile-and-report flow used by
//! `compile`, `new --compile` and `fonts demo --compile`, and author details.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use crossterm::style::Color;
use std::path::PathBuf;

use latexbot_compiler::{
    BibTool, CompileOptions, CompileReport, Compiler, Engine, clean, open_pdf,
};
use latexbot_runner::NativeRunner;
use latexbot_tex::Author;
use latexbot_utils::logging::{paint, print_success, print_warning};
use latexbot_utils::paths::{current_dir, resolve_against, tex_stem, to_utf8};

use crate::{Config, LatexBotError};

/// Build compile options from the effective configuration.
///
/// `auto` leaves engine or bibliography tool to detection.
pub(crate) fn compile_options(config: &Config) -> CompileOptions {
    CompileOptions {
        engine: match config.compiler() {
            "auto" => None,
            name => name.parse::<Engine>().ok(),
        },
        bib_tool: match config.bib_tool() {
            "auto" => None,
            name => name.parse::<BibTool>().ok(),
        },
        timeout: config.timeout(),
        open_viewer: config.open_viewer(),
        viewer: config.viewer().map(str::to_string),
        ..CompileOptions::default()
    }
}

/// `dir` resolved against the working directory, or the working directory.
pub(crate) fn resolve_dir(dir: Option<PathBuf>) -> Result<Utf8PathBuf> {
    let cwd = current_dir()?;
    match dir {
        Some(dir) => Ok(resolve_against(&cwd, &to_utf8(dir)?)),
        None => Ok(cwd),
    }
}

/// Author for generated files from the `[author]` section and CLI flags.
///
/// The country, when set, becomes the last address line.
pub(crate) fn author_from_config(config: &Config) -> Author {
    let a = &config.author;
    let mut address = a.address.clone().unwrap_or_default();
    if let Some(country) = &a.country {
        address.push(country.clone());
    }

    let mut author = Author::new(config.author_name())
        .department(a.department.clone().unwrap_or_default())
        .institute(a.institute.clone().unwrap_or_default())
        .address(address);
    if let Some(email) = &a.email {
        author = author.email(email);
    }
    author
}

/// Compile `tex`, print the summary, then clean and open as configured.
pub(crate) fn compile_and_report(tex: &Utf8Path, config: &Config) -> Result<CompileReport> {
    let options = compile_options(config);
    let open = options.open_viewer;
    let viewer = options.viewer.clone();

    let compiler = Compiler::new(NativeRunner::new(), options);
    let report = compiler.compile(tex).map_err(LatexBotError::from)?;
    print_compile_report(&report);

    if config.clean_after() {
        let dir = report
            .pdf_path
            .parent()
            .unwrap_or_else(|| Utf8Path::new("."));
        let removed = clean(dir, tex_stem(tex)).map_err(LatexBotError::from)?;
        println!("  Removed {} auxiliary files", removed.len());
    }

    if open {
        open_pdf(&report.pdf_path, viewer.as_deref()).map_err(LatexBotError::from)?;
        println!("  Opened {}", report.pdf_path);
    }

    Ok(report)
}

fn print_compile_report(report: &CompileReport) {
    println!(
        "{} {} ({}, bibliography: {})",
        paint("Compiled", Color::Cyan, true),
        report.pdf_path,
        report.engine,
        report.bib_tool
    );
    for pass in &report.passes {
        println!(
            "  {} pass {} {:<9} {:>6} ms",
            paint("✓", Color::Green, true),
            pass.number,
            pass.tool,
            pass.duration.as_millis()
        );
    }

    for warning in &report.warnings {
        print_warning(warning);
    }
    print_success(&format!(
        "Wrote {} in {:.1}s",
        report.pdf_path,
        report.duration.as_secs_f64()
    ));
}
