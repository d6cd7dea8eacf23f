//! New project command implementation
//!
//! Handles `latexbot new <template>`.

use anyhow::Result;
use std::path::PathBuf;

use latexbot_templates::{ProjectOptions, create_project, get_template};
use latexbot_utils::error::TemplateError;
use latexbot_utils::logging::print_success;

use super::common::{author_from_config, compile_and_report, resolve_dir};
use crate::{Config, ExitCode, LatexBotError};

/// Execute the new command.
///
/// Author flags are already merged into `config.author`.
pub fn execute_new_command(
    template: &str,
    dir: Option<PathBuf>,
    title: Option<String>,
    compile: bool,
    config: &Config,
) -> Result<ExitCode> {
    let info = get_template(template).ok_or_else(|| {
        LatexBotError::from(TemplateError::UnknownTemplate {
            id: template.to_string(),
        })
    })?;

    let mut opts = ProjectOptions::new(author_from_config(config));
    opts.title = title;
    if dir.is_some() {
        opts.dir = Some(resolve_dir(dir)?);
    }

    let project = create_project(info.id, &opts).map_err(LatexBotError::from)?;
    tracing::info!(template = info.id, root = %project.root, files = project.files.len(), "project created");

    print_success(&format!(
        "Created {} project in {}",
        info.name, project.root
    ));
    println!();
    println!("Created files:");
    for file in &project.files {
        println!("  - {}", file.strip_prefix(&project.root).unwrap_or(file));
    }

    if compile {
        println!();
        compile_and_report(&project.main_tex(), config)?;
    } else {
        println!();
        println!("Next steps:");
        println!("  cd {}", project.root);
        println!("  latexbot compile");
    }
    Ok(ExitCode::SUCCESS)
}
