use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style process specification
// ============================================================================

/// Specification for a command to execute.
///
/// Arguments are kept as discrete `OsString` elements. A file name such as
/// `my thesis.tex` reaches the engine as one argument, with no shell in between.
///
/// # Example
///
/// ```rust
/// use latexbot_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("pdflatex")
///     .arg("-interaction=nonstopmode")
///     .arg("-halt-on-error")
///     .arg("main.tex")
///     .cwd("/path/to/project");
///
/// assert_eq!(cmd.program, OsString::from("pdflatex"));
/// assert_eq!(cmd.args.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Optional environment overrides
    pub env: Option<HashMap<OsString, OsString>>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` for `program`.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: None,
        }
    }

    /// Add a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    ///
    /// ```rust
    /// use latexbot_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::new("bibtex").args(["main.aux"]);
    /// assert_eq!(cmd.args.len(), 1);
    /// ```
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory. TeX engines resolve `\input` and write
    /// their `.aux`/`.log` files relative to it.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable, e.g. `TEXINPUTS`.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables.
    #[must_use]
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let env_map = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in envs {
            env_map.insert(key.into(), value.into());
        }
        self
    }

    /// Program name as a lossy UTF-8 string, for logs and error messages.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert into a `std::process::Command`.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(ref env) = self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }

        cmd
    }
}

impl fmt::Display for CommandSpec {
    /// Renders as `program arg1 arg2` for log lines. Not meant to be re-parsed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_spec_new() {
        let cmd = CommandSpec::new("pdflatex");
        assert_eq!(cmd.program, OsString::from("pdflatex"));
        assert!(cmd.args.is_empty());
        assert!(cmd.cwd.is_none());
        assert!(cmd.env.is_none());
    }

    #[test]
    fn test_command_spec_engine_args() {
        let cmd = CommandSpec::new("xelatex")
            .arg("-interaction=nonstopmode")
            .args(["-halt-on-error", "-file-line-error"])
            .arg("main.tex");
        assert_eq!(cmd.args.len(), 4);
        assert_eq!(cmd.args[0], OsString::from("-interaction=nonstopmode"));
        assert_eq!(cmd.args[3], OsString::from("main.tex"));
    }

    #[test]
    fn test_command_spec_cwd() {
        let cmd = CommandSpec::new("bibtex").cwd("/tmp/project");
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn test_command_spec_env_and_envs() {
        let cmd = CommandSpec::new("pdflatex")
            .env("TEXINPUTS", ".:")
            .envs([("max_print_line", "1000"), ("openout_any", "p")]);
        let env = cmd.env.as_ref().unwrap();
        assert_eq!(env.len(), 3);
        assert_eq!(
            env.get(&OsString::from("TEXINPUTS")),
            Some(&OsString::from(".:"))
        );
    }

    #[test]
    fn test_command_spec_default_is_empty() {
        let cmd = CommandSpec::default();
        assert_eq!(cmd.program, OsString::new());
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_file_names_with_spaces_stay_single_args() {
        let cmd = CommandSpec::new("pdflatex")
            .arg("my thesis.tex")
            .arg("$(whoami)");
        assert_eq!(cmd.args.len(), 2);
        assert_eq!(cmd.args[0], OsString::from("my thesis.tex"));
        assert_eq!(cmd.args[1], OsString::from("$(whoami)"));
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = CommandSpec::new("bibtex").arg("main.aux");
        assert_eq!(cmd.to_string(), "bibtex main.aux");
        assert_eq!(cmd.program_name(), "bibtex");
    }
}
