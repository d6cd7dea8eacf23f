//! Doctor command implementation
//!
//! Handles `latexbot doctor` command for environment health checks.

use anyhow::{Context, Result};

use latexbot_doctor::DoctorCommand;
use latexbot_utils::logging::log_doctor_report;
use latexbot_utils::paths::current_dir;

use crate::{Config, ExitCode};

/// Execute the doctor command for environment health checks.
///
/// Returns [`ExitCode::INTERNAL`] when a check failed, or warned under
/// `--strict-exit`.
pub fn execute_doctor_command(json: bool, strict_exit: bool, config: &Config) -> Result<ExitCode> {
    let doctor = DoctorCommand::new(config.clone(), current_dir()?);
    let output = doctor
        .run(strict_exit)
        .context("Failed to run doctor checks")?;

    if json {
        let json_output =
            serde_json::to_string_pretty(&output).context("Failed to emit doctor JSON")?;
        println!("{json_output}");
    } else {
        log_doctor_report(&output);

        if !output.ok {
            println!();
            if strict_exit {
                println!(
                    "Some checks failed or warned (strict mode). Please address the issues above."
                );
            } else {
                println!(
                    "Some checks failed. Please address the issues above before compiling."
                );
            }
        }
    }

    Ok(if output.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::INTERNAL
    })
}
