//! Task runner - drives one tool invocation end to end
//!
//! Resolves credentials, builds the connection identifier, lets the tool
//! assemble its command, logs an obfuscated rendition, and hands the real
//! argument vector to the process runner. Everything is scoped to the one
//! invocation; nothing is shared or persisted across runs.

use crate::connect::credentials::resolve_credentials;
use crate::connect::identifier::connection_identifier;
use crate::connect::obfuscate::obfuscate_credentials;
use crate::core::config::{ConnectionSettings, ServerStore};
use crate::core::error::ToolError;
use crate::exec::log_sink::LogSink;
use crate::exec::runner::ProcessRunner;
use crate::tools::DbTool;

/// Orchestrates a single database tool execution
pub struct DbTaskRunner<'a> {
    settings: &'a ConnectionSettings,
    store: &'a ServerStore,
    sink: &'a dyn LogSink,
    fail_on_error: bool,
}

impl<'a> DbTaskRunner<'a> {
    pub fn new(
        settings: &'a ConnectionSettings,
        store: &'a ServerStore,
        sink: &'a dyn LogSink,
    ) -> Self {
        Self {
            settings,
            store,
            sink,
            fail_on_error: true,
        }
    }

    /// Whether a non-zero exit fails the build (default) or merely warns
    pub fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    /// Run one tool to completion.
    ///
    /// Credential errors surface before any process is spawned. The logged
    /// command line is always obfuscated; the executed one never is.
    pub async fn run(&self, tool: &dyn DbTool) -> Result<(), ToolError> {
        let credentials = resolve_credentials(self.settings, self.store, self.sink)?;
        let identifier = connection_identifier(&credentials, self.settings);

        let Some(invocation) = tool.build_invocation(&identifier).await? else {
            self.sink
                .debug(&format!("{}: nothing to execute", tool.tool_name()));
            return Ok(());
        };

        self.sink.info(&format!(
            "Executing command line: {}",
            obfuscate_credentials(&invocation.rendered(), &credentials)
        ));

        ProcessRunner::new(self.sink, self.fail_on_error)
            .run(&invocation)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{CredentialError, ProcessError};
    use crate::exec::log_sink::{LogLevel, RecordingSink};
    use crate::tools::CommandInvocation;
    use async_trait::async_trait;

    const USERNAME: &str = "scott";
    const PASSWORD: &str = "tiger";

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            username: Some(USERNAME.to_string()),
            password: Some(PASSWORD.to_string()),
            hostname: "localhost".to_string(),
            port: 1521,
            service_name: "ORCL".to_string(),
            use_easy_connect: true,
            ..Default::default()
        }
    }

    /// Tool stub that runs `sh -c <script>` with the quoted identifier as a
    /// trailing argument, like the data-pump tools do.
    struct ShellTool {
        script: &'static str,
    }

    #[async_trait]
    impl DbTool for ShellTool {
        fn tool_name(&self) -> &'static str {
            "shell"
        }

        async fn build_invocation(
            &self,
            connection_identifier: &str,
        ) -> Result<Option<CommandInvocation>, ToolError> {
            let mut invocation = CommandInvocation::new("sh");
            invocation
                .arg("-c")
                .arg(self.script)
                .arg(format!("'{connection_identifier}'"));
            Ok(Some(invocation))
        }
    }

    struct IdleTool;

    #[async_trait]
    impl DbTool for IdleTool {
        fn tool_name(&self) -> &'static str {
            "idle"
        }

        async fn build_invocation(
            &self,
            _connection_identifier: &str,
        ) -> Result<Option<CommandInvocation>, ToolError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_successful_run_logs_obfuscated_command_line() {
        let sink = RecordingSink::new();
        let settings = settings();
        let store = ServerStore::empty();
        let runner = DbTaskRunner::new(&settings, &store, &sink);

        runner.run(&ShellTool { script: "true" }).await.unwrap();

        let infos = sink.messages(LogLevel::Info);
        let command_line = infos
            .iter()
            .find(|m| m.starts_with("Executing command line:"))
            .unwrap();
        assert!(command_line.contains("<username>/<password>@//localhost:1521/ORCL"));
        assert!(!command_line.contains(PASSWORD));
    }

    #[tokio::test]
    async fn test_credential_failure_surfaces_before_execution() {
        let sink = RecordingSink::new();
        let settings = ConnectionSettings {
            service_name: "ORCL".to_string(),
            ..Default::default()
        };
        let store = ServerStore::empty();
        let runner = DbTaskRunner::new(&settings, &store, &sink);

        let result = runner.run(&ShellTool { script: "true" }).await;
        assert!(matches!(
            result,
            Err(ToolError::Credential(CredentialError::MissingCredentials))
        ));
        assert!(sink.messages(LogLevel::Info).is_empty());
    }

    #[tokio::test]
    async fn test_tool_without_work_runs_nothing() {
        let sink = RecordingSink::new();
        let settings = settings();
        let store = ServerStore::empty();
        let runner = DbTaskRunner::new(&settings, &store, &sink);

        runner.run(&IdleTool).await.unwrap();

        assert!(
            !sink
                .messages(LogLevel::Info)
                .iter()
                .any(|m| m.starts_with("Executing command line:"))
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_fatal_by_default() {
        let sink = RecordingSink::new();
        let settings = settings();
        let store = ServerStore::empty();
        let runner = DbTaskRunner::new(&settings, &store, &sink);

        let result = runner.run(&ShellTool { script: "exit 5" }).await;
        assert!(matches!(
            result,
            Err(ToolError::Process(ProcessError::NonZeroExit(5)))
        ));
    }

    #[tokio::test]
    async fn test_non_zero_exit_tolerated_when_configured() {
        let sink = RecordingSink::new();
        let settings = settings();
        let store = ServerStore::empty();
        let runner = DbTaskRunner::new(&settings, &store, &sink).fail_on_error(false);

        runner.run(&ShellTool { script: "exit 5" }).await.unwrap();

        assert_eq!(sink.messages(LogLevel::Warn).len(), 1);
    }
}
