use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use latexbot_utils::error::ConfigError;

use super::{AuthorConfig, CliArgs, Config, ConfigSource, Defaults};

/// Environment variable overriding `[defaults].compiler`
pub const ENV_COMPILER: &str = "LATEXBOT_COMPILER";

/// Environment variable overriding `[defaults].timeout_secs`
pub const ENV_TIMEOUT: &str = "LATEXBOT_TIMEOUT";

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    defaults: Option<Defaults>,
    author: Option<AuthorConfig>,
}

/// Keys reported by `effective_config`, in `[defaults]` order.
const DEFAULT_KEYS: &[&str] = &[
    "compiler",
    "bib_tool",
    "timeout_secs",
    "open_viewer",
    "viewer",
    "verbose",
    "clean_after",
];

fn apply<T>(
    slot: &mut Option<T>,
    value: Option<T>,
    key: &str,
    source: &ConfigSource,
    attribution: &mut HashMap<String, ConfigSource>,
) {
    if value.is_some() {
        *slot = value;
        attribution.insert(key.to_string(), source.clone());
    }
}

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir()
            .map_err(|e| ConfigError::DiscoveryFailed {
                reason: format!("cannot read current directory: {e}"),
            })
            .and_then(|p| {
                Utf8PathBuf::from_path_buf(p).map_err(|p| ConfigError::DiscoveryFailed {
                    reason: format!("current directory is not UTF-8: {}", p.display()),
                })
            })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory.
    ///
    /// The path-driven variant used by tests to avoid depending on the cwd.
    pub fn discover_from(start_dir: &Utf8Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut source_attribution = HashMap::new();
        let mut defaults = Defaults::default();
        let mut author = AuthorConfig::default();

        for key in DEFAULT_KEYS {
            source_attribution.insert((*key).to_string(), ConfigSource::Default);
        }

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::NotFound {
                        path: explicit.to_string(),
                    });
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir)
                .or_else(Self::user_config_file),
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path, "loading configuration file");
            let file_config = Self::load_config_file(path)?;
            let source = ConfigSource::ConfigFile(path.to_string());
            let attr = &mut source_attribution;

            if let Some(fd) = file_config.defaults {
                apply(&mut defaults.compiler, fd.compiler, "compiler", &source, attr);
                apply(&mut defaults.bib_tool, fd.bib_tool, "bib_tool", &source, attr);
                apply(&mut defaults.timeout_secs, fd.timeout_secs, "timeout_secs", &source, attr);
                apply(&mut defaults.open_viewer, fd.open_viewer, "open_viewer", &source, attr);
                apply(&mut defaults.viewer, fd.viewer, "viewer", &source, attr);
                apply(&mut defaults.verbose, fd.verbose, "verbose", &source, attr);
                apply(&mut defaults.clean_after, fd.clean_after, "clean_after", &source, attr);
            }

            if let Some(fa) = file_config.author {
                apply(&mut author.name, fa.name, "author.name", &source, attr);
                apply(&mut author.email, fa.email, "author.email", &source, attr);
                apply(&mut author.department, fa.department, "author.department", &source, attr);
                apply(&mut author.institute, fa.institute, "author.institute", &source, attr);
                apply(&mut author.address, fa.address, "author.address", &source, attr);
                apply(&mut author.country, fa.country, "author.country", &source, attr);
            }
        }

        // Environment overrides the file
        let env = ConfigSource::Env;
        let env_compiler = std::env::var(ENV_COMPILER).ok().filter(|v| !v.is_empty());
        apply(
            &mut defaults.compiler,
            env_compiler,
            "compiler",
            &env,
            &mut source_attribution,
        );
        if let Some(raw) = std::env::var(ENV_TIMEOUT).ok().filter(|v| !v.is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "timeout_secs".to_string(),
                    value: format!("{ENV_TIMEOUT}='{raw}' is not a whole number of seconds"),
                })?;
            apply(
                &mut defaults.timeout_secs,
                Some(secs),
                "timeout_secs",
                &env,
                &mut source_attribution,
            );
        }

        // CLI overrides everything
        let cli = ConfigSource::Cli;
        let attr = &mut source_attribution;
        apply(&mut defaults.compiler, cli_args.compiler.clone(), "compiler", &cli, attr);
        apply(&mut defaults.bib_tool, cli_args.bib_tool.clone(), "bib_tool", &cli, attr);
        apply(&mut defaults.timeout_secs, cli_args.timeout_secs, "timeout_secs", &cli, attr);
        apply(&mut defaults.verbose, cli_args.verbose, "verbose", &cli, attr);
        apply(&mut defaults.open_viewer, cli_args.open_viewer, "open_viewer", &cli, attr);
        apply(&mut defaults.clean_after, cli_args.clean_after, "clean_after", &cli, attr);
        apply(&mut author.name, cli_args.author_name.clone(), "author.name", &cli, attr);
        apply(&mut author.email, cli_args.author_email.clone(), "author.email", &cli, attr);
        apply(
            &mut author.department,
            cli_args.author_department.clone(),
            "author.department",
            &cli,
            attr,
        );
        apply(
            &mut author.institute,
            cli_args.author_institute.clone(),
            "author.institute",
            &cli,
            attr,
        );

        let config = Config {
            defaults,
            author,
            source_attribution,
            config_path,
        };

        config.validate()?;

        Ok(config)
    }

    /// Search upward from `start_dir` for `.latexbot/config.toml`.
    ///
    /// Stops at a repository root (`.git`, `.hg`, `.svn`) or the filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(".latexbot").join("config.toml");
            if config_path.is_file() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                break;
            }

            let Some(parent) = current_dir.parent() else {
                break;
            };
            current_dir = parent.to_path_buf();
        }

        None
    }

    /// `<config_dir>/latexbot/config.toml` when it exists.
    #[must_use]
    pub fn user_config_file() -> Option<Utf8PathBuf> {
        let dir = dirs::config_dir()?;
        let path = Utf8PathBuf::from_path_buf(dir.join("latexbot").join("config.toml")).ok()?;
        path.is_file().then_some(path)
    }

    fn load_config_file(path: &Utf8Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("failed to read {path}: {e}"))
        })?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("failed to parse {path}: {e}")))
    }

    /// Every option with its effective value and source, sorted by key.
    ///
    /// Unset options show as `(unset)`.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let d = &self.defaults;
        let a = &self.author;

        let values: Vec<(&str, Option<String>)> = vec![
            ("compiler", Some(self.compiler().to_string())),
            ("bib_tool", Some(self.bib_tool().to_string())),
            ("timeout_secs", Some(self.timeout().as_secs().to_string())),
            ("open_viewer", Some(self.open_viewer().to_string())),
            ("viewer", d.viewer.clone()),
            ("verbose", Some(self.verbose().to_string())),
            ("clean_after", Some(self.clean_after().to_string())),
            ("author.name", a.name.clone()),
            ("author.email", a.email.clone()),
            ("author.department", a.department.clone()),
            ("author.institute", a.institute.clone()),
            ("author.address", a.address.as_ref().map(|lines| lines.join(", "))),
            ("author.country", a.country.clone()),
        ];

        values
            .into_iter()
            .map(|(key, value)| {
                let source = self
                    .source_attribution
                    .get(key)
                    .cloned()
                    .unwrap_or(ConfigSource::Default);
                (
                    key.to_string(),
                    (
                        value.unwrap_or_else(|| "(unset)".to_string()),
                        source.to_string(),
                    ),
                )
            })
            .collect()
    }
}
