use latexbot_utils::error::ConfigError;

use super::{BIB_TOOL_CHOICES, COMPILER_CHOICES, Config, MAX_TIMEOUT_SECS};

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(compiler) = &self.defaults.compiler {
            if !COMPILER_CHOICES.contains(&compiler.as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: "compiler".to_string(),
                    value: format!(
                        "'{compiler}' must be one of {}",
                        COMPILER_CHOICES.join(", ")
                    ),
                });
            }
        }

        if let Some(bib_tool) = &self.defaults.bib_tool {
            if !BIB_TOOL_CHOICES.contains(&bib_tool.as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: "bib_tool".to_string(),
                    value: format!(
                        "'{bib_tool}' must be one of {}",
                        BIB_TOOL_CHOICES.join(", ")
                    ),
                });
            }
        }

        if let Some(timeout) = self.defaults.timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "timeout_secs".to_string(),
                    value: "must be greater than 0".to_string(),
                });
            }
            if timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    key: "timeout_secs".to_string(),
                    value: format!("exceeds maximum limit of {MAX_TIMEOUT_SECS} seconds (1 hour)"),
                });
            }
        }

        if let Some(viewer) = &self.defaults.viewer {
            let problem = match shell_words::split(viewer) {
                Ok(words) if words.is_empty() => Some("must not be empty".to_string()),
                Ok(_) => None,
                Err(e) => Some(format!("'{viewer}' is not a valid command line: {e}")),
            };
            if let Some(value) = problem {
                return Err(ConfigError::InvalidValue {
                    key: "viewer".to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}
