//! Config command implementation
//!
//! Handles `latexbot config`: the effective configuration with the source of
//! every value.

use anyhow::{Context, Result};
use crossterm::style::Color;
use serde::Serialize;
use std::collections::BTreeMap;

use latexbot_utils::logging::paint;

use crate::{Config, ExitCode};

#[derive(Debug, Serialize)]
pub(crate) struct ConfigValue {
    pub value: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConfigOutput {
    pub config_path: Option<String>,
    pub values: BTreeMap<String, ConfigValue>,
}

pub(crate) fn effective_config_json(config: &Config) -> ConfigOutput {
    ConfigOutput {
        config_path: config.config_path.as_ref().map(ToString::to_string),
        values: config
            .effective_config()
            .into_iter()
            .map(|(key, (value, source))| (key, ConfigValue { value, source }))
            .collect(),
    }
}

/// Execute the config command
pub fn execute_config_command(json: bool, config: &Config) -> Result<ExitCode> {
    if json {
        let output = serde_json::to_string_pretty(&effective_config_json(config))
            .context("Failed to emit config JSON")?;
        println!("{output}");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", paint("Effective configuration", Color::Cyan, true));
    match &config.config_path {
        Some(path) => println!("  Config file: {path}"),
        None => println!("  Config file: (none found, using defaults)"),
    }
    println!();
    for (key, (value, source)) in config.effective_config() {
        println!("  {key:<18} = {value:<24} [{source}]");
    }
    Ok(ExitCode::SUCCESS)
}
