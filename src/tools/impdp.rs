//! Data-pump import (`impdp`)

use crate::core::error::ToolError;
use crate::tools::datapump::DatapumpOptions;
use crate::tools::{CommandInvocation, DbTool, push_string_argument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

fn default_executable() -> String {
    "impdp".to_string()
}

/// The data-pump import tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpdpTool {
    /// The impdp command to execute; override when impdp is not on PATH
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Options shared with the export tool
    #[serde(flatten)]
    pub common: DatapumpOptions,

    /// Remap persistent data from the source tablespace into the target one
    #[serde(skip_serializing_if = "Option::is_none", rename = "remapTablespace")]
    pub remap_tablespace: Option<String>,

    /// Load all objects from the source schema into a target schema
    #[serde(skip_serializing_if = "Option::is_none", rename = "remapSchema")]
    pub remap_schema: Option<String>,

    /// What to do when a table being created already exists:
    /// SKIP | APPEND | TRUNCATE | REPLACE
    #[serde(skip_serializing_if = "Option::is_none", rename = "tableExistsAction")]
    pub table_exists_action: Option<String>,
}

impl Default for ImpdpTool {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            common: DatapumpOptions::default(),
            remap_tablespace: None,
            remap_schema: None,
            table_exists_action: None,
        }
    }
}

#[async_trait]
impl DbTool for ImpdpTool {
    fn tool_name(&self) -> &'static str {
        "impdp"
    }

    async fn build_invocation(
        &self,
        connection_identifier: &str,
    ) -> Result<Option<CommandInvocation>, ToolError> {
        let mut invocation = CommandInvocation::new(&self.executable);
        self.common
            .append_common_arguments(connection_identifier, &mut invocation.arguments);

        push_string_argument(
            &mut invocation.arguments,
            "REMAP_TABLESPACE",
            self.remap_tablespace.as_deref(),
        );
        push_string_argument(
            &mut invocation.arguments,
            "REMAP_SCHEMA",
            self.remap_schema.as_deref(),
        );
        push_string_argument(
            &mut invocation.arguments,
            "TABLE_EXISTS_ACTION",
            self.table_exists_action.as_deref(),
        );

        Ok(Some(invocation))
    }
}
