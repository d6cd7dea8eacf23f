use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::ConfigSource;

/// Built-in per-pass timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Upper bound accepted for `timeout_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Engines accepted for `compiler`.
pub const COMPILER_CHOICES: &[&str] = &["pdflatex", "xelatex", "lualatex", "auto"];

/// Tools accepted for `bib_tool`.
pub const BIB_TOOL_CHOICES: &[&str] = &["bibtex", "biber", "auto", "none"];

/// Fallback author name when none is configured.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Effective configuration after discovery.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub defaults: Defaults,
    pub author: AuthorConfig,
    /// Where each effective value came from, keyed by option name
    pub source_attribution: HashMap<String, ConfigSource>,
    /// The configuration file that was loaded, if any
    pub config_path: Option<Utf8PathBuf>,
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub compiler: Option<String>,
    pub bib_tool: Option<String>,
    pub timeout_secs: Option<u64>,
    pub open_viewer: Option<bool>,
    pub viewer: Option<String>,
    pub verbose: Option<bool>,
    pub clean_after: Option<bool>,
}

/// `[author]` section, used to fill template author fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub institute: Option<String>,
    /// Postal address, one entry per line
    pub address: Option<Vec<String>>,
    pub country: Option<String>,
}

impl Config {
    /// Configured compiler, `auto` when unset.
    #[must_use]
    pub fn compiler(&self) -> &str {
        self.defaults.compiler.as_deref().unwrap_or("auto")
    }

    /// Configured bibliography tool, `auto` when unset.
    #[must_use]
    pub fn bib_tool(&self) -> &str {
        self.defaults.bib_tool.as_deref().unwrap_or("auto")
    }

    /// Per-pass timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.defaults.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn open_viewer(&self) -> bool {
        self.defaults.open_viewer.unwrap_or(false)
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&str> {
        self.defaults.viewer.as_deref()
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    #[must_use]
    pub fn clean_after(&self) -> bool {
        self.defaults.clean_after.unwrap_or(false)
    }

    /// Author name for generated files, `Anonymous` when none is configured.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.author.name.as_deref().unwrap_or(ANONYMOUS_AUTHOR)
    }
}
