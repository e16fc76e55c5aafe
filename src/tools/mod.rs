//! Database tool command construction
//!
//! Each tool maps its option set onto an ordered argument vector. The
//! emission order is part of the contract: options always render in the
//! declared order below regardless of how the caller supplied them, so
//! logged command lines stay reproducible.

pub mod datapump;
pub mod expdp;
pub mod impdp;
pub mod sqlplus;

use crate::core::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

pub use datapump::DatapumpOptions;
pub use expdp::ExpdpTool;
pub use impdp::ImpdpTool;
pub use sqlplus::SqlPlusTool;

/// A fully assembled command, produced fresh per execution and never reused.
///
/// Arguments are passed to the process layer as an argument vector without
/// shell interpretation, so any quoting inside an argument is literal data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub executable: String,
    pub arguments: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub environment: Option<HashMap<String, String>>,
}

impl CommandInvocation {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments: Vec::new(),
            working_dir: None,
            environment: None,
        }
    }

    pub fn arg(&mut self, argument: impl Into<String>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    /// Single-line rendition for logging. Must be obfuscated before it
    /// reaches any sink.
    pub fn rendered(&self) -> String {
        let mut rendered = self.executable.clone();
        for argument in &self.arguments {
            rendered.push(' ');
            rendered.push_str(argument);
        }
        rendered
    }
}

/// Append `NAME=value` when the value is present and non-empty
pub(crate) fn push_string_argument(
    arguments: &mut Vec<String>,
    name: &str,
    value: Option<&str>,
) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        arguments.push(format!("{name}={value}"));
    }
}

/// Append `NAME=YES` when true; false options are omitted entirely
pub(crate) fn push_boolean_argument(arguments: &mut Vec<String>, name: &str, value: bool) {
    if value {
        arguments.push(format!("{name}=YES"));
    }
}

/// A database command-line tool: knows its executable and how to lay out
/// its arguments after the connection identifier.
#[async_trait]
pub trait DbTool: Send + Sync {
    /// Short name used in log and error messages
    fn tool_name(&self) -> &'static str;

    /// Assemble the command for one execution. Returns `None` when the tool
    /// has nothing to run (the SQL runner without a script).
    async fn build_invocation(
        &self,
        connection_identifier: &str,
    ) -> Result<Option<CommandInvocation>, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_joins_executable_and_arguments() {
        let mut invocation = CommandInvocation::new("expdp");
        invocation.arg("'scott@//db:1521/ORCL'").arg("CONTENT=ALL");
        assert_eq!(invocation.rendered(), "expdp 'scott@//db:1521/ORCL' CONTENT=ALL");
    }

    #[test]
    fn test_push_string_argument_skips_absent_and_empty() {
        let mut arguments = Vec::new();
        push_string_argument(&mut arguments, "CONTENT", None);
        push_string_argument(&mut arguments, "DIRECTORY", Some(""));
        push_string_argument(&mut arguments, "DUMPFILE", Some("full.dmp"));
        assert_eq!(arguments, vec!["DUMPFILE=full.dmp"]);
    }

    #[test]
    fn test_push_boolean_argument_emits_yes_only() {
        let mut arguments = Vec::new();
        push_boolean_argument(&mut arguments, "REUSE_DUMPFILES", false);
        assert!(arguments.is_empty());
        push_boolean_argument(&mut arguments, "REUSE_DUMPFILES", true);
        assert_eq!(arguments, vec!["REUSE_DUMPFILES=YES"]);
    }
}
