//! Interactive SQL runner (`sqlplus`)
//!
//! Runs a script or an ad-hoc snippet through SQL*Plus. Snippets are written
//! to a uniquely named temporary file; the guard statements in `before_sql`
//! go to their own temporary file whose directory is handed to SQL*Plus via
//! the SQLPATH environment variable, so they execute right after startup.
//! Generated files are never cleaned up here; that is the build's concern.

use crate::core::error::ToolError;
use crate::tools::{CommandInvocation, DbTool};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Statements executed before the actual script so the build fails when
/// SQL*Plus hits an error instead of silently carrying on.
pub const DEFAULT_BEFORE_SQL: &str =
    "WHENEVER SQLERROR EXIT FAILURE ROLLBACK;\nWHENEVER OSERROR EXIT FAILURE ROLLBACK;";

fn default_executable() -> String {
    "sqlplus".to_string()
}

fn default_before_sql() -> Option<String> {
    Some(DEFAULT_BEFORE_SQL.to_string())
}

/// The SQL*Plus runner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SqlPlusTool {
    /// The sqlplus command to execute; override with a full path when
    /// sqlplus is not on PATH
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Statements executed directly after sqlplus starts, before the
    /// script. `None` skips the SQLPATH mechanism entirely.
    #[serde(default = "default_before_sql", rename = "beforeSql")]
    pub before_sql: Option<String>,

    /// Ad-hoc SQL to execute; written to a temporary script file. Takes
    /// precedence over `sql_file`.
    #[serde(skip_serializing_if = "Option::is_none", rename = "sqlCommand")]
    pub sql_command: Option<String>,

    /// Existing script file to execute
    #[serde(skip_serializing_if = "Option::is_none", rename = "sqlFile")]
    pub sql_file: Option<PathBuf>,

    /// Extra arguments appended after the script reference, passed through
    /// to the script as positional parameters
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl Default for SqlPlusTool {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            before_sql: default_before_sql(),
            sql_command: None,
            sql_file: None,
            arguments: Vec::new(),
        }
    }
}

impl SqlPlusTool {
    /// The script to run: an ad-hoc command written to a fresh temporary
    /// file, the configured file, or nothing at all.
    fn script_file(&self) -> Result<Option<PathBuf>, ToolError> {
        match self.sql_command.as_deref().filter(|c| !c.is_empty()) {
            Some(command) => Ok(Some(write_statements_file(command)?)),
            None => Ok(self.sql_file.clone()),
        }
    }

    /// Inherited process environment plus SQLPATH pointing at the directory
    /// holding the generated before-sql script.
    fn environment(&self) -> Result<Option<HashMap<String, String>>, ToolError> {
        match self.before_sql.as_deref() {
            Some(before_sql) => {
                let script = write_statements_file(before_sql)?;
                let mut environment: HashMap<String, String> = std::env::vars().collect();
                environment.insert(
                    "SQLPATH".to_string(),
                    parent_dir(&script).to_string_lossy().into_owned(),
                );
                Ok(Some(environment))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DbTool for SqlPlusTool {
    fn tool_name(&self) -> &'static str {
        "sqlplus"
    }

    async fn build_invocation(
        &self,
        connection_identifier: &str,
    ) -> Result<Option<CommandInvocation>, ToolError> {
        let Some(script) = self.script_file()? else {
            return Ok(None);
        };

        let mut invocation = CommandInvocation::new(&self.executable);
        // logon only once, else it would prompt for credentials after failure
        invocation.arg("-L");
        // a role clause contains spaces, so the identifier tokenizes into
        // multiple arguments here (unlike the quoted data-pump form)
        for token in connection_identifier.split_whitespace() {
            invocation.arg(token);
        }
        let script_name = script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        invocation.arg(format!("@{script_name}"));
        for argument in &self.arguments {
            invocation.arg(argument);
        }

        invocation.working_dir = Some(parent_dir(&script).to_path_buf());
        invocation.environment = self.environment()?;

        Ok(Some(invocation))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Write statements to a fresh, uniquely named script file and persist it
/// (temporary in location only; never deleted by this crate).
fn write_statements_file(data: &str) -> Result<PathBuf, ToolError> {
    let mut file = tempfile::Builder::new()
        .prefix("statement-")
        .suffix(".sql")
        .tempfile()
        .map_err(ToolError::ScriptWrite)?;
    file.write_all(data.as_bytes())
        .map_err(ToolError::ScriptWrite)?;
    let (_, path) = file.keep().map_err(|e| ToolError::ScriptWrite(e.error))?;
    Ok(path)
}
