use crate::error::RunnerError;
use std::io;
use std::process::Stdio;
use std::time::Duration;

use super::{CommandSpec, ProcessOutput, ProcessRunner};

/// Native process runner built on `std::process::Command`.
///
/// Timeouts are enforced by waiting on a helper thread; when the deadline
/// passes the child is killed and [`RunnerError::Timeout`] is returned. A TeX
/// engine stuck on an interactive prompt is the usual reason to hit it.
///
/// ```rust,no_run
/// use latexbot_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::new();
/// let cmd = CommandSpec::new("pdflatex").arg("--version");
/// let output = runner.run(&cmd, Duration::from_secs(30)).unwrap();
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        use std::sync::mpsc;
        use std::thread;

        let program = cmd.program_name();

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(command = %cmd, timeout_secs = timeout.as_secs(), "spawning process");

        let child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunnerError::ToolNotFound {
                program: program.clone(),
            },
            _ => RunnerError::SpawnFailed {
                program: program.clone(),
                reason: e.to_string(),
            },
        })?;

        let (tx, rx) = mpsc::channel();
        let child_id = child.id();

        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        match rx.recv_timeout(timeout) {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::ExecutionFailed {
                    reason: format!("Failed to wait for {program}: {e}"),
                })?;

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                    false,
                ))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(program = %program, "process exceeded timeout, terminating");
                Self::terminate_process(child_id);
                let _ = handle.join();

                Err(RunnerError::Timeout {
                    program,
                    timeout_seconds: timeout.as_secs(),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::ExecutionFailed {
                reason: "Process monitoring thread terminated unexpectedly".to_string(),
            }),
        }
    }
}

impl NativeRunner {
    /// SIGKILL on Unix, TerminateProcess on Windows.
    fn terminate_process(pid: u32) {
        #[cfg(unix)]
        {
            unsafe {
                libc::kill(pid as i32, libc::SIGKILL);
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::Foundation::CloseHandle;
            use windows::Win32::System::Threading::{
                OpenProcess, PROCESS_TERMINATE, TerminateProcess,
            };

            unsafe {
                if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                    let _ = TerminateProcess(handle, 1);
                    let _ = CloseHandle(handle);
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = pid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_runner_is_zero_sized() {
        let runner = NativeRunner::new();
        assert_eq!(std::mem::size_of_val(&runner), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_echo_command() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("echo").arg("hello world");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(output.success());
        assert!(output.stdout_string().contains("hello world"));
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_exit_code_propagation() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sh").arg("-c").arg("exit 42");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(42));
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_stderr_capture() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo '! Undefined control sequence.' >&2");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(output.stderr_string().contains("Undefined control sequence"));
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_respects_cwd() {
        let dir = std::env::temp_dir();
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("pwd").cwd(&dir);

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        let reported = std::path::PathBuf::from(output.stdout_string().trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_timeout_kills_process() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sleep").arg("5");

        let err = runner.run(&cmd, Duration::from_millis(100)).unwrap_err();
        match err {
            RunnerError::Timeout { program, .. } => assert_eq!(program, "sleep"),
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_native_runner_nonexistent_command() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("latexbot_no_such_engine_12345");

        match runner.run(&cmd, Duration::from_secs(10)) {
            Err(RunnerError::ToolNotFound { program }) => {
                assert_eq!(program, "latexbot_no_such_engine_12345");
            }
            other => panic!("Expected ToolNotFound, got {other:?}"),
        }
    }
}
