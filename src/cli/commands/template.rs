//! Template command implementation
//!
//! Handles `latexbot template` subcommands.

use anyhow::{Context, Result};

use latexbot_templates::{TemplateInfo, get_template, list_templates};
use latexbot_utils::error::TemplateError;

use crate::cli::args::TemplateCommands;
use crate::{ExitCode, LatexBotError};

/// Execute template inspection commands
pub fn execute_template_command(cmd: TemplateCommands) -> Result<ExitCode> {
    match cmd {
        TemplateCommands::List { json } => {
            let templates = list_templates();
            if json {
                let output = serde_json::to_string_pretty(&templates)
                    .context("Failed to emit template JSON")?;
                println!("{output}");
                return Ok(ExitCode::SUCCESS);
            }

            println!("Available templates:\n");
            for t in &templates {
                print_template(t);
                println!();
            }
            println!("To create a project from a template:");
            println!("  latexbot new <template> [--dir DIR]");
            Ok(ExitCode::SUCCESS)
        }
        TemplateCommands::Show { template } => {
            let info = get_template(&template).ok_or_else(|| {
                LatexBotError::from(TemplateError::UnknownTemplate {
                    id: template.clone(),
                })
            })?;
            print_template(&info);
            println!();
            println!("Create it with:");
            println!("  latexbot new {}", info.id);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_template(t: &TemplateInfo) {
    println!("  {}", t.id);
    println!("    Name: {}", t.name);
    println!("    Description: {}", t.description);
    println!("    Use case: {}", t.use_case);
    println!("    Default directory: {}", t.default_dir);
    if !t.prerequisites.is_empty() {
        println!("    Prerequisites: {}", t.prerequisites.join(", "));
    }
}
