//! Child process execution with live output streaming
//!
//! The external utility is spawned without a shell: the argument vector is
//! handed over verbatim, so quoting inside arguments stays literal data.
//! Stdout and stderr are drained concurrently, line by line, into the log
//! sink as the lines arrive; long-running data-pump jobs report progress
//! this way and operators need to see it live. Draining both pipes at once
//! also avoids the deadlock where the child blocks writing one pipe while
//! we only read the other.

use crate::core::error::ProcessError;
use crate::exec::log_sink::LogSink;
use crate::tools::CommandInvocation;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Runs assembled commands and classifies their outcome.
///
/// With `fail_on_error` disabled a non-zero exit degrades to a single
/// warning and the run still counts as successful.
pub struct ProcessRunner<'a> {
    sink: &'a dyn LogSink,
    fail_on_error: bool,
}

impl<'a> ProcessRunner<'a> {
    pub fn new(sink: &'a dyn LogSink, fail_on_error: bool) -> Self {
        Self {
            sink,
            fail_on_error,
        }
    }

    /// Execute the invocation and block until the child exits.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::LaunchFailure`] when the child cannot be started
    ///   or its pipes cannot be read
    /// - [`ProcessError::NonZeroExit`] when the child exits non-zero and
    ///   `fail_on_error` is set
    pub async fn run(&self, invocation: &CommandInvocation) -> Result<(), ProcessError> {
        let mut command = Command::new(&invocation.executable);
        command
            .args(&invocation.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(working_dir) = &invocation.working_dir {
            command.current_dir(working_dir);
        }
        if let Some(environment) = &invocation.environment {
            command.env_clear().envs(environment);
        }

        let mut child = command.spawn().map_err(ProcessError::LaunchFailure)?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (out, err) = tokio::join!(
            drain_lines(stdout, |line| self.sink.info(line)),
            drain_lines(stderr, |line| self.sink.error(line)),
        );
        out.map_err(ProcessError::LaunchFailure)?;
        err.map_err(ProcessError::LaunchFailure)?;

        let status = child.wait().await.map_err(ProcessError::LaunchFailure)?;
        if status.success() {
            return Ok(());
        }

        // -1 stands in for termination by signal, which carries no code
        let exit_code = status.code().unwrap_or(-1);
        if self.fail_on_error {
            Err(ProcessError::NonZeroExit(exit_code))
        } else {
            self.sink
                .warn(&format!("program exited with exitCode: {exit_code}"));
            Ok(())
        }
    }
}

async fn drain_lines<R, F>(stream: Option<R>, mut emit: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let Some(stream) = stream else {
        return Ok(());
    };
    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        emit(&line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::log_sink::{LogLevel, RecordingSink};

    fn shell(script: &str) -> CommandInvocation {
        let mut invocation = CommandInvocation::new("sh");
        invocation.arg("-c").arg(script);
        invocation
    }

    #[tokio::test]
    async fn test_zero_exit_succeeds_and_streams_stdout() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        runner.run(&shell("echo one; echo two")).await.unwrap();

        assert_eq!(sink.messages(LogLevel::Info), vec!["one", "two"]);
        assert!(sink.messages(LogLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn test_stderr_lines_go_to_the_error_sink() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        runner.run(&shell("echo oops 1>&2")).await.unwrap();

        assert_eq!(sink.messages(LogLevel::Error), vec!["oops"]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_fails_when_fail_on_error() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        let result = runner.run(&shell("exit 3")).await;
        assert!(matches!(result, Err(ProcessError::NonZeroExit(3))));
    }

    #[tokio::test]
    async fn test_non_zero_exit_degrades_to_warning_without_fail_on_error() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, false);

        runner.run(&shell("exit 3")).await.unwrap();

        let warnings = sink.messages(LogLevel::Warn);
        assert_eq!(warnings, vec!["program exited with exitCode: 3"]);
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_launch_failure() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        let invocation = CommandInvocation::new("definitely-not-a-real-binary");
        let result = runner.run(&invocation).await;
        assert!(matches!(result, Err(ProcessError::LaunchFailure(_))));
    }

    #[tokio::test]
    async fn test_environment_override_reaches_the_child() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        let mut invocation = shell("echo $MARKER");
        invocation.environment = Some(
            [("MARKER".to_string(), "present".to_string())]
                .into_iter()
                .collect(),
        );
        runner.run(&invocation).await.unwrap();

        assert_eq!(sink.messages(LogLevel::Info), vec!["present"]);
    }

    #[tokio::test]
    async fn test_working_directory_override() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);
        let temp_dir = tempfile::TempDir::new().unwrap();

        let mut invocation = shell("pwd");
        invocation.working_dir = Some(temp_dir.path().to_path_buf());
        runner.run(&invocation).await.unwrap();

        let printed = sink.messages(LogLevel::Info);
        assert_eq!(printed.len(), 1);
        // canonicalize both sides; the temp dir may sit behind a symlink
        assert_eq!(
            std::fs::canonicalize(&printed[0]).unwrap(),
            std::fs::canonicalize(temp_dir.path()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_large_output_on_both_pipes_does_not_deadlock() {
        let sink = RecordingSink::new();
        let runner = ProcessRunner::new(&sink, true);

        // Enough data to overflow a pipe buffer on either side
        let script = "i=0; while [ $i -lt 5000 ]; do echo line$i; echo err$i 1>&2; i=$((i+1)); done";
        runner.run(&shell(script)).await.unwrap();

        assert_eq!(sink.messages(LogLevel::Info).len(), 5000);
        assert_eq!(sink.messages(LogLevel::Error).len(), 5000);
    }
}
