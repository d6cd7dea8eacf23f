use camino::Utf8Path;
use std::process::Stdio;

use latexbot_runner::CommandSpec;
use latexbot_utils::error::CompileError;

#[cfg(target_os = "macos")]
pub const DEFAULT_VIEWER: &str = "open";
#[cfg(windows)]
pub const DEFAULT_VIEWER: &str = "explorer";
#[cfg(not(any(target_os = "macos", windows)))]
pub const DEFAULT_VIEWER: &str = "xdg-open";

/// The command that opens `pdf`. A configured viewer is split with shell
/// quoting rules and may carry its own arguments (`zathura --fork`,
/// `open -a "Adobe Acrobat Reader"`); the PDF path goes last.
pub fn viewer_command(pdf: &Utf8Path, viewer: Option<&str>) -> Result<CommandSpec, CompileError> {
    let words = match viewer {
        Some(line) => shell_words::split(line).map_err(|e| CompileError::ViewerFailed {
            path: pdf.to_string(),
            viewer: line.to_string(),
            reason: format!("cannot parse viewer command: {e}"),
        })?,
        None => Vec::new(),
    };
    let mut words = words.into_iter();
    let cmd = match words.next() {
        Some(program) => CommandSpec::new(program).args(words),
        None => CommandSpec::new(DEFAULT_VIEWER),
    };
    Ok(cmd.arg(pdf.as_str()))
}

/// Launch the viewer without waiting for it to exit.
pub fn open_pdf(pdf: &Utf8Path, viewer: Option<&str>) -> Result<(), CompileError> {
    let spec = viewer_command(pdf, viewer)?;
    let failed = |reason: String| CompileError::ViewerFailed {
        path: pdf.to_string(),
        viewer: spec.program_name(),
        reason,
    };
    if !pdf.is_file() {
        return Err(failed("the PDF does not exist".to_string()));
    }

    tracing::info!(pdf = %pdf, viewer = %spec, "opening viewer");
    // The child is never waited on; the viewer outlives this process and is
    // reaped by init once latexbot exits.
    spec.to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|e| failed(e.to_string()))
}
