//! Doctor command for environment health checks
//!
//! Checks that the TeX engines, bibliography tools and helper utilities are
//! on `PATH`, that the working directory is writable with atomic renames,
//! and that the configuration parsed.

pub use latexbot_utils::types::{CheckStatus, DoctorCheck, DoctorOutput};

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;

use latexbot_compiler::DEFAULT_VIEWER;
use latexbot_config::Config;
use latexbot_runner::{CommandSpec, NativeRunner, ProcessRunner};

/// The one engine every template compiles with.
pub const REQUIRED_ENGINE: &str = "pdflatex";

/// Tools whose absence only limits what can be compiled.
pub const OPTIONAL_TOOLS: &[&str] = &["xelatex", "lualatex", "bibtex", "biber", "makeindex", "fc-list"];

const VERSION_TIMEOUT: Duration = Duration::from_secs(15);

/// Finds executables on `PATH`.
pub trait ToolLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// [`ToolLocator`] backed by `which`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLocator;

impl ToolLocator for WhichLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

/// Doctor command implementation
pub struct DoctorCommand<L: ToolLocator = WhichLocator, R: ProcessRunner = NativeRunner> {
    config: Config,
    locator: L,
    runner: R,
    work_dir: Utf8PathBuf,
}

impl DoctorCommand {
    /// Create a doctor command checking the real `PATH` and `work_dir`.
    #[must_use]
    pub fn new(config: Config, work_dir: Utf8PathBuf) -> Self {
        Self::with_tools(config, work_dir, WhichLocator, NativeRunner::new())
    }
}

impl<L: ToolLocator, R: ProcessRunner> DoctorCommand<L, R> {
    pub fn with_tools(config: Config, work_dir: Utf8PathBuf, locator: L, runner: R) -> Self {
        Self {
            config,
            locator,
            runner,
            work_dir,
        }
    }

    /// Run all health checks.
    ///
    /// In strict mode, warnings are treated as failures for the `ok` flag.
    pub fn run(&self, strict_exit: bool) -> Result<DoctorOutput> {
        let mut checks = vec![self.check_tool(REQUIRED_ENGINE, CheckStatus::Fail)];
        checks.extend(
            OPTIONAL_TOOLS
                .iter()
                .map(|tool| self.check_tool(tool, CheckStatus::Warn)),
        );
        checks.push(self.check_viewer());
        checks.push(self.check_engine_version());
        checks.push(self.check_write_permissions());
        checks.push(self.check_atomic_rename());
        checks.push(self.check_config_parse());

        // Sort checks by name for stable output
        checks.sort_by(|a, b| a.name.cmp(&b.name));

        let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
        let has_warn = checks.iter().any(|c| c.status == CheckStatus::Warn);
        let ok = !has_fail && (!strict_exit || !has_warn);
        tracing::debug!(ok, has_fail, has_warn, strict_exit, "doctor finished");

        Ok(DoctorOutput {
            schema_version: "1".to_string(),
            emitted_at: Utc::now(),
            ok,
            checks,
        })
    }

    /// `<tool>_path`: is the executable on `PATH`
    fn check_tool(&self, tool: &str, missing: CheckStatus) -> DoctorCheck {
        let name = format!("{}_path", tool.replace('-', "_"));
        match self.locator.locate(tool) {
            Some(path) => DoctorCheck {
                name,
                status: CheckStatus::Pass,
                details: format!("Found {tool} at {}", path.display()),
            },
            None => DoctorCheck {
                name,
                status: missing,
                details: format!("{tool} not found in PATH"),
            },
        }
    }

    fn check_viewer(&self) -> DoctorCheck {
        let viewer = self
            .config
            .viewer()
            .and_then(|v| shell_words::split(v).ok())
            .and_then(|words| words.into_iter().next())
            .unwrap_or_else(|| DEFAULT_VIEWER.to_string());
        let mut check = self.check_tool(&viewer, CheckStatus::Warn);
        check.name = "viewer_path".to_string();
        check
    }

    /// First line of `pdflatex --version`
    fn check_engine_version(&self) -> DoctorCheck {
        let name = format!("{REQUIRED_ENGINE}_version");
        let cmd = CommandSpec::new(REQUIRED_ENGINE).arg("--version");
        match self.runner.run(&cmd, VERSION_TIMEOUT) {
            Ok(output) if output.success() => DoctorCheck {
                name,
                status: CheckStatus::Pass,
                details: output
                    .stdout_string()
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            },
            Ok(output) => DoctorCheck {
                name,
                status: CheckStatus::Fail,
                details: format!(
                    "{cmd} failed with exit code: {}",
                    output.exit_code.unwrap_or(-1)
                ),
            },
            Err(e) => DoctorCheck {
                name,
                status: CheckStatus::Fail,
                details: format!("Failed to execute {cmd}: {e}"),
            },
        }
    }

    /// Create and remove a file in the working directory
    fn check_write_permissions(&self) -> DoctorCheck {
        match tempfile::NamedTempFile::new_in(&self.work_dir) {
            Ok(file) => match file.close() {
                Ok(()) => DoctorCheck {
                    name: "write_permissions".to_string(),
                    status: CheckStatus::Pass,
                    details: format!("{} is writable", self.work_dir),
                },
                Err(e) => DoctorCheck {
                    name: "write_permissions".to_string(),
                    status: CheckStatus::Fail,
                    details: format!("Cannot remove test file in {}: {e}", self.work_dir),
                },
            },
            Err(e) => DoctorCheck {
                name: "write_permissions".to_string(),
                status: CheckStatus::Fail,
                details: format!("Cannot write to {}: {e}", self.work_dir),
            },
        }
    }

    /// Same-volume rename, which atomic project writes rely on
    fn check_atomic_rename(&self) -> DoctorCheck {
        let fail = |details: String| DoctorCheck {
            name: "atomic_rename".to_string(),
            status: CheckStatus::Fail,
            details,
        };
        let scratch = match tempfile::tempdir_in(&self.work_dir) {
            Ok(dir) => dir,
            Err(e) => return fail(format!("Cannot create test directory: {e}")),
        };
        let source = scratch.path().join(".doctor_rename_test");
        let target = scratch.path().join(".doctor_rename_target");
        if let Err(e) = std::fs::write(&source, "test") {
            return fail(format!("Cannot create test file: {e}"));
        }
        match std::fs::rename(&source, &target) {
            Ok(()) => DoctorCheck {
                name: "atomic_rename".to_string(),
                status: CheckStatus::Pass,
                details: "Atomic rename works on same volume".to_string(),
            },
            Err(e) => fail(format!("Atomic rename failed: {e}")),
        }
    }

    /// Config was parsed before the doctor was built; report what was loaded
    fn check_config_parse(&self) -> DoctorCheck {
        let details = match &self.config.config_path {
            Some(path) => format!("Configuration parsed from {path}"),
            None => "No configuration file found; using defaults".to_string(),
        };
        DoctorCheck {
            name: "config_parse".to_string(),
            status: CheckStatus::Pass,
            details,
        }
    }

    #[must_use]
    pub fn work_dir(&self) -> &Utf8Path {
        &self.work_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latexbot_runner::{ProcessOutput, RunnerError};
    use std::collections::HashSet;
    use tempfile::TempDir;

    struct FakePath(HashSet<&'static str>);

    impl ToolLocator for FakePath {
        fn locate(&self, tool: &str) -> Option<PathBuf> {
            self.0
                .contains(tool)
                .then(|| PathBuf::from(format!("/usr/bin/{tool}")))
        }
    }

    struct VersionRunner(Option<&'static str>);

    impl ProcessRunner for VersionRunner {
        fn run(&self, cmd: &CommandSpec, _timeout: Duration) -> Result<ProcessOutput, RunnerError> {
            match self.0 {
                Some(out) => Ok(ProcessOutput::new(out.as_bytes().to_vec(), Vec::new(), Some(0), false)),
                None => Err(RunnerError::ToolNotFound {
                    program: cmd.program_name(),
                }),
            }
        }
    }

    const PDFTEX_VERSION: &str = "pdfTeX 3.141592653-2.6-1.40.25 (TeX Live 2023)\nkpathsea version 6.3.5\n";

    fn doctor(
        temp: &TempDir,
        tools: &[&'static str],
        version: Option<&'static str>,
    ) -> DoctorCommand<FakePath, VersionRunner> {
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        DoctorCommand::with_tools(
            Config::default(),
            dir,
            FakePath(tools.iter().copied().collect()),
            VersionRunner(version),
        )
    }

    fn all_tools() -> Vec<&'static str> {
        let mut tools = vec![REQUIRED_ENGINE, DEFAULT_VIEWER];
        tools.extend(OPTIONAL_TOOLS);
        tools
    }

    fn status_of(output: &DoctorOutput, name: &str) -> CheckStatus {
        output
            .checks
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no check named {name}"))
            .status
    }

    #[test]
    fn test_doctor_output_structure() {
        let temp = TempDir::new().unwrap();
        let output = doctor(&temp, &all_tools(), Some(PDFTEX_VERSION)).run(false).unwrap();

        assert_eq!(output.schema_version, "1");
        assert!(output.ok);
        assert_eq!(output.checks.len(), 1 + OPTIONAL_TOOLS.len() + 5);

        let names: Vec<String> = output.checks.iter().map(|c| c.name.clone()).collect();
        let mut sorted_names = names.clone();
        sorted_names.sort();
        assert_eq!(names, sorted_names, "Checks should be sorted by name");
        assert!(names.contains(&"fc_list_path".to_string()));
    }

    #[test]
    fn test_version_first_line() {
        let temp = TempDir::new().unwrap();
        let output = doctor(&temp, &all_tools(), Some(PDFTEX_VERSION)).run(false).unwrap();
        let check = output
            .checks
            .iter()
            .find(|c| c.name == "pdflatex_version")
            .unwrap();
        assert_eq!(check.details, "pdfTeX 3.141592653-2.6-1.40.25 (TeX Live 2023)");
    }

    #[test]
    fn test_missing_pdflatex_fails() {
        let temp = TempDir::new().unwrap();
        let output = doctor(&temp, &["bibtex"], None).run(false).unwrap();

        assert!(!output.ok);
        assert_eq!(status_of(&output, "pdflatex_path"), CheckStatus::Fail);
        assert_eq!(status_of(&output, "pdflatex_version"), CheckStatus::Fail);
        assert_eq!(status_of(&output, "biber_path"), CheckStatus::Warn);
        assert_eq!(status_of(&output, "bibtex_path"), CheckStatus::Pass);
    }

    #[test]
    fn test_strict_mode_counts_warnings() {
        let temp = TempDir::new().unwrap();
        let tools = [REQUIRED_ENGINE, DEFAULT_VIEWER];
        let relaxed = doctor(&temp, &tools, Some(PDFTEX_VERSION)).run(false).unwrap();
        let strict = doctor(&temp, &tools, Some(PDFTEX_VERSION)).run(true).unwrap();

        assert!(relaxed.ok);
        assert!(!strict.ok);
        assert_eq!(status_of(&strict, "xelatex_path"), CheckStatus::Warn);
    }

    #[test]
    fn test_filesystem_checks_pass_in_temp_dir() {
        let temp = TempDir::new().unwrap();
        let output = doctor(&temp, &[], None).run(false).unwrap();
        assert_eq!(status_of(&output, "write_permissions"), CheckStatus::Pass);
        assert_eq!(status_of(&output, "atomic_rename"), CheckStatus::Pass);
        assert_eq!(status_of(&output, "config_parse"), CheckStatus::Pass);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_configured_viewer_is_checked() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.defaults.viewer = Some("zathura --fork".to_string());
        let doctor = DoctorCommand::with_tools(
            config,
            dir,
            FakePath(["zathura"].into_iter().collect()),
            VersionRunner(None),
        );
        let output = doctor.run(false).unwrap();
        let viewer = output.checks.iter().find(|c| c.name == "viewer_path").unwrap();
        assert_eq!(viewer.status, CheckStatus::Pass);
        assert!(viewer.details.contains("/usr/bin/zathura"));
    }

    #[test]
    fn test_quoted_viewer_program_is_located() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.defaults.viewer = Some(r#""My Viewer" --reuse"#.to_string());
        let doctor = DoctorCommand::with_tools(
            config,
            dir,
            FakePath(["My Viewer"].into_iter().collect()),
            VersionRunner(None),
        );
        let output = doctor.run(false).unwrap();
        let viewer = output.checks.iter().find(|c| c.name == "viewer_path").unwrap();
        assert_eq!(viewer.status, CheckStatus::Pass);
    }

    #[test]
    fn test_json_shape() {
        let temp = TempDir::new().unwrap();
        let output = doctor(&temp, &all_tools(), Some(PDFTEX_VERSION)).run(false).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["schema_version"], "1");
        assert_eq!(json["ok"], true);
        assert!(json["checks"].as_array().unwrap().iter().all(|c| c["status"] == "pass"));
    }
}
