//! The multi-pass compile sequence.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::time::{Duration, Instant};

use latexbot_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
use latexbot_utils::error::CompileError;
use latexbot_utils::paths::tex_stem;

use crate::engine::{BibTool, Engine, detect_bib_tool, detect_engine};
use crate::log::{LogError, scan_log};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Engine flags that keep a broken document from waiting on stdin.
pub const ENGINE_FLAGS: &[&str] = &["-interaction=nonstopmode", "-halt-on-error", "-file-line-error"];

/// Lines of tool output kept when a bibliography pass fails.
const BIB_OUTPUT_TAIL: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Detected from the source when `None`
    pub engine: Option<Engine>,
    /// Detected from the source when `None`
    pub bib_tool: Option<BibTool>,
    /// Per pass
    pub timeout: Duration,
    pub open_viewer: bool,
    pub viewer: Option<String>,
    /// Engine passes appended after the standard sequence
    pub extra_passes: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            engine: None,
            bib_tool: None,
            timeout: DEFAULT_TIMEOUT,
            open_viewer: false,
            viewer: None,
            extra_passes: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Engine,
    Bibliography,
}

/// One step of the sequence, before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedPass {
    pub kind: PassKind,
    pub tool: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassRecord {
    /// 1-based position in the sequence
    pub number: usize,
    pub kind: PassKind,
    pub tool: String,
    pub exit_code: Option<i32>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    pub engine: Engine,
    pub bib_tool: BibTool,
    pub passes: Vec<PassRecord>,
    pub pdf_path: Utf8PathBuf,
    /// `LaTeX Warning:` lines from the last engine pass
    pub warnings: Vec<String>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// The pass sequence: engine, bib, engine, engine; or engine, engine without
/// a bibliography tool. `extra` engine passes follow.
#[must_use]
pub fn plan_passes(engine: Engine, bib_tool: BibTool, extra: usize) -> Vec<PlannedPass> {
    let run_engine = PlannedPass {
        kind: PassKind::Engine,
        tool: engine.binary(),
    };
    let mut passes = vec![run_engine];
    if let Some(tool) = bib_tool.binary() {
        passes.push(PlannedPass {
            kind: PassKind::Bibliography,
            tool,
        });
    }
    passes.push(run_engine);
    if bib_tool != BibTool::None {
        passes.push(run_engine);
    }
    passes.extend(std::iter::repeat_n(run_engine, extra));
    passes
}

/// Runs the pass sequence for one document through a [`ProcessRunner`].
pub struct Compiler<R: ProcessRunner> {
    runner: R,
    options: CompileOptions,
}

impl<R: ProcessRunner> Compiler<R> {
    pub fn new(runner: R, options: CompileOptions) -> Self {
        Self { runner, options }
    }

    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `tex_path` in its own directory.
    ///
    /// Stops at the first failing pass. An engine pass fails on a non-zero
    /// exit or on errors in `<stem>.log`. BibTeX exit status 1 only means
    /// warnings and does not fail the pass.
    pub fn compile(&self, tex_path: &Utf8Path) -> Result<CompileReport, CompileError> {
        let started = Instant::now();
        let not_found = || CompileError::InputNotFound {
            path: tex_path.to_string(),
        };
        if !tex_path.is_file() {
            return Err(not_found());
        }
        let source = std::fs::read_to_string(tex_path).map_err(|_| not_found())?;
        let dir = tex_path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = tex_path.file_name().ok_or_else(not_found)?;
        let stem = tex_stem(tex_path).ok_or_else(not_found)?;

        let engine = self.options.engine.unwrap_or_else(|| detect_engine(&source));
        let bib_tool = self
            .options
            .bib_tool
            .unwrap_or_else(|| detect_bib_tool(&source, stem, Some(dir.as_std_path())));
        let plan = plan_passes(engine, bib_tool, self.options.extra_passes);
        tracing::info!(
            file = %tex_path,
            engine = %engine,
            bib_tool = %bib_tool,
            passes = plan.len(),
            "compiling"
        );

        let mut passes = Vec::with_capacity(plan.len());
        let mut warnings = Vec::new();
        for (idx, step) in plan.iter().enumerate() {
            let number = idx + 1;
            let cmd = match step.kind {
                PassKind::Engine => CommandSpec::new(step.tool)
                    .args(ENGINE_FLAGS.iter().copied())
                    .arg(file_name),
                PassKind::Bibliography if bib_tool == BibTool::BibTex => {
                    CommandSpec::new(step.tool).arg(format!("{stem}.aux"))
                }
                PassKind::Bibliography => CommandSpec::new(step.tool).arg(stem),
            }
            .cwd(dir.as_std_path());

            let pass_started = Instant::now();
            let output = self
                .runner
                .run(&cmd, self.options.timeout)
                .map_err(|e| self.runner_failure(e, number, step.tool))?;
            if output.timed_out {
                return Err(self.timeout(number, step.tool));
            }
            let duration = pass_started.elapsed();
            tracing::debug!(
                pass = number,
                tool = step.tool,
                exit_code = ?output.exit_code,
                duration_ms = duration.as_millis() as u64,
                "pass finished"
            );

            let errors = match step.kind {
                PassKind::Engine => {
                    let scan = read_log(&dir.join(format!("{stem}.log")));
                    warnings = scan.warnings;
                    if output.success() && scan.errors.is_empty() {
                        None
                    } else {
                        Some(scan.errors.iter().map(LogError::to_string).collect())
                    }
                }
                PassKind::Bibliography => {
                    let ok = output.success()
                        || (bib_tool == BibTool::BibTex && output.exit_code == Some(1));
                    (!ok).then(|| bib_output_tail(&output))
                }
            };
            if let Some(errors) = errors {
                tracing::warn!(pass = number, tool = step.tool, "pass failed");
                return Err(CompileError::PassFailed {
                    pass: number,
                    engine: step.tool.to_string(),
                    exit_code: output.exit_code,
                    errors,
                });
            }

            passes.push(PassRecord {
                number,
                kind: step.kind,
                tool: step.tool.to_string(),
                exit_code: output.exit_code,
                duration,
            });
        }

        Ok(CompileReport {
            engine,
            bib_tool,
            passes,
            pdf_path: dir.join(format!("{stem}.pdf")),
            warnings,
            duration: started.elapsed(),
        })
    }

    fn timeout(&self, pass: usize, tool: &str) -> CompileError {
        CompileError::Timeout {
            pass,
            tool: tool.to_string(),
            seconds: self.options.timeout.as_secs(),
        }
    }

    fn runner_failure(&self, err: RunnerError, pass: usize, tool: &str) -> CompileError {
        match err {
            RunnerError::ToolNotFound { program } => CompileError::ToolMissing { tool: program },
            RunnerError::Timeout { .. } => self.timeout(pass, tool),
            other => CompileError::PassFailed {
                pass,
                engine: tool.to_string(),
                exit_code: None,
                errors: vec![other.to_string()],
            },
        }
    }
}

/// TeX logs are not always valid UTF-8.
fn read_log(path: &Utf8Path) -> crate::log::LogScan {
    match std::fs::read(path) {
        Ok(bytes) => scan_log(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "no log to scan");
            crate::log::LogScan::default()
        }
    }
}

fn bib_output_tail(output: &ProcessOutput) -> Vec<String> {
    let stderr = output.stderr_string();
    let text = if stderr.trim().is_empty() {
        output.stdout_string()
    } else {
        stderr
    };
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    let skip = lines.len().saturating_sub(BIB_OUTPUT_TAIL);
    lines.into_iter().skip(skip).collect()
}
