//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Dispatches to command handlers
//! - Handles all error output

use anyhow::Result;
use clap::Parser;

use latexbot_utils::logging::init_tracing;
use latexbot_utils::paths::to_utf8;

use super::args::{Cli, Commands};
use super::commands;
use crate::error_reporter::{create_contextual_report, enhance_error_context};
use crate::{CliArgs, Config, ExitCode, LatexBotError};

/// Main CLI execution function.
///
/// Handles ALL output including errors. Returns `Ok(())` on success, or the
/// exit code after the error report has been printed. main.rs only maps the
/// code to the process exit status.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let cli_args = match build_cli_args(&cli) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("✗ {error:#}");
            return Err(ExitCode::CLI_ARGS);
        }
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = LatexBotError::Config(err);
            eprintln!("{}", create_contextual_report(&err, "config"));
            return Err(err.to_exit_code());
        }
    };

    // A second subscriber cannot be installed; ignore that in embedded use
    let _ = init_tracing(config.verbose());
    tracing::debug!(config_path = ?config.config_path, "configuration loaded");

    let operation = operation_name(&cli.command);
    let result = dispatch(cli.command, &config);

    match result {
        Ok(code) if code == ExitCode::SUCCESS => Ok(()),
        Ok(code) => Err(code),
        Err(error) => Err(report_error(&error, operation)),
    }
}

/// Map global and per-command flags onto the configuration precedence chain.
pub(crate) fn build_cli_args(cli: &Cli) -> Result<CliArgs> {
    let mut args = CliArgs {
        config_path: cli.config.clone().map(to_utf8).transpose()?,
        compiler: cli.compiler.clone(),
        timeout_secs: cli.timeout,
        verbose: cli.verbose.then_some(true),
        ..CliArgs::default()
    };

    match &cli.command {
        Commands::New {
            author,
            email,
            institute,
            department,
            ..
        } => {
            args.author_name = author.clone();
            args.author_email = email.clone();
            args.author_institute = institute.clone();
            args.author_department = department.clone();
        }
        Commands::Compile {
            engine,
            bib,
            open,
            clean,
            ..
        } => {
            if engine.is_some() {
                args.compiler = engine.clone();
            }
            args.bib_tool = bib.clone();
            args.open_viewer = open.then_some(true);
            args.clean_after = clean.then_some(true);
        }
        _ => {}
    }
    Ok(args)
}

fn operation_name(command: &Commands) -> &'static str {
    match command {
        Commands::New { .. } => "new",
        Commands::Template(_) => "template",
        Commands::Compile { .. } => "compile",
        Commands::Clean { .. } => "clean",
        Commands::Fonts(_) => "fonts",
        Commands::Config { .. } => "config",
        Commands::Doctor { .. } => "doctor",
    }
}

fn dispatch(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::New {
            template,
            dir,
            title,
            compile,
            ..
        } => commands::execute_new_command(&template, dir, title, compile, config),
        Commands::Template(cmd) => commands::execute_template_command(cmd),
        Commands::Compile { file, .. } => commands::execute_compile_command(file, config),
        Commands::Clean { dir, stem } => commands::execute_clean_command(dir, stem.as_deref()),
        Commands::Fonts(cmd) => commands::execute_fonts_command(cmd, config),
        Commands::Config { json } => commands::execute_config_command(json, config),
        Commands::Doctor { json, strict_exit } => {
            commands::execute_doctor_command(json, strict_exit, config)
        }
    }
}

/// Print the report for `error` and pick the exit code.
fn report_error(error: &anyhow::Error, operation: &str) -> ExitCode {
    if let Some(latexbot_error) = error.downcast_ref::<LatexBotError>() {
        eprintln!("{}", create_contextual_report(latexbot_error, operation));
        return latexbot_error.to_exit_code();
    }

    eprintln!("✗ Unexpected error: {error:#}");
    if let Some(suggestions) = enhance_error_context(error) {
        eprintln!("\n  Suggestions:");
        for (i, suggestion) in suggestions.iter().enumerate() {
            eprintln!("    {}. {}", i + 1, suggestion);
        }
    }
    eprintln!("\n  General troubleshooting:");
    eprintln!("    - Run with --verbose for more detailed output");
    eprintln!("    - Run `latexbot doctor` to check the TeX installation");

    ExitCode::INTERNAL
}
