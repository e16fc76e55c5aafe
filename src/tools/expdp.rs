//! Data-pump export (`expdp`)

use crate::core::error::ToolError;
use crate::tools::datapump::DatapumpOptions;
use crate::tools::{CommandInvocation, DbTool, push_boolean_argument, push_string_argument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

fn default_executable() -> String {
    "expdp".to_string()
}

/// The data-pump export tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpdpTool {
    /// The expdp command to execute; override when expdp is not on PATH
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Options shared with the import tool
    #[serde(flatten)]
    pub common: DatapumpOptions,

    /// Metadata compression before writing the dump file set:
    /// METADATA_ONLY | NONE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,

    /// Overwrite the destination dump file if it exists
    #[serde(default, rename = "reuseDumpfiles")]
    pub reuse_dumpfiles: bool,
}

impl Default for ExpdpTool {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            common: DatapumpOptions::default(),
            compression: None,
            reuse_dumpfiles: false,
        }
    }
}

#[async_trait]
impl DbTool for ExpdpTool {
    fn tool_name(&self) -> &'static str {
        "expdp"
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
            "COMPRESSION",
            self.compression.as_deref(),
        );
        push_boolean_argument(
            &mut invocation.arguments,
            "REUSE_DUMPFILES",
            self.reuse_dumpfiles,
        );

        Ok(Some(invocation))
    }
}
