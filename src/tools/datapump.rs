//! Options shared by the data-pump export and import tools

use crate::tools::push_string_argument;
use serde::{Deserialize, Serialize};

/// Option set common to `expdp` and `impdp`.
///
/// Values are passed through verbatim; their semantics are Oracle's
/// business. Absent and empty options are never emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatapumpOptions {
    /// Filters what is loaded/unloaded: ALL | DATA_ONLY | METADATA_ONLY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Default location for the dump file set and log/SQL files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Names (and optionally directory objects) of the dump file set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dumpfile: Option<String>,

    /// Metadata filter: objects and object types to exclude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Metadata filter: objects and object types to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    /// Name (and optionally directory object) of the job's log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logfile: Option<String>,

    /// Timestamp job messages: NONE | STATUS | LOGFILE | ALL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logtime: Option<String>,

    /// Database link for a network import/export
    #[serde(skip_serializing_if = "Option::is_none", rename = "networkLink")]
    pub network_link: Option<String>,

    /// Schema-mode operation over the named schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<String>,

    /// Table-mode operation over the named tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<String>,
}

impl DatapumpOptions {
    /// Append the quoted connection identifier (always token 0) and the
    /// common options in declared order.
    ///
    /// The surrounding single quotes are literal data for the tool, not
    /// shell syntax; the process layer never re-escapes them.
    pub(crate) fn append_common_arguments(
        &self,
        connection_identifier: &str,
        arguments: &mut Vec<String>,
    ) {
        arguments.push(format!("'{connection_identifier}'"));

        push_string_argument(arguments, "CONTENT", self.content.as_deref());
        push_string_argument(arguments, "DIRECTORY", self.directory.as_deref());
        push_string_argument(arguments, "DUMPFILE", self.dumpfile.as_deref());
        push_string_argument(arguments, "EXCLUDE", self.exclude.as_deref());
        push_string_argument(arguments, "INCLUDE", self.include.as_deref());
        push_string_argument(arguments, "LOGFILE", self.logfile.as_deref());
        push_string_argument(arguments, "LOGTIME", self.logtime.as_deref());
        push_string_argument(arguments, "NETWORK_LINK", self.network_link.as_deref());
        push_string_argument(arguments, "SCHEMAS", self.schemas.as_deref());
        push_string_argument(arguments, "TABLES", self.tables.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTION_ID: &str = "username@//localhost:443/serviceName";

    #[test]
    fn test_connection_identifier_is_quoted_token_zero() {
        let mut arguments = Vec::new();
        DatapumpOptions::default().append_common_arguments(CONNECTION_ID, &mut arguments);
        assert_eq!(arguments, vec![format!("'{CONNECTION_ID}'")]);
    }

    #[test]
    fn test_single_option_yields_two_tokens() {
        let options = DatapumpOptions {
            content: Some("DATA_ONLY".to_string()),
            ..Default::default()
        };
        let mut arguments = Vec::new();
        options.append_common_arguments(CONNECTION_ID, &mut arguments);
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[1], "CONTENT=DATA_ONLY");
    }

    #[test]
    fn test_options_render_in_declared_order() {
        let options = DatapumpOptions {
            tables: Some("EMP".to_string()),
            content: Some("ALL".to_string()),
            dumpfile: Some("full.dmp".to_string()),
            schemas: Some("HR".to_string()),
            ..Default::default()
        };
        let mut arguments = Vec::new();
        options.append_common_arguments(CONNECTION_ID, &mut arguments);
        assert_eq!(
            arguments[1..],
            ["CONTENT=ALL", "DUMPFILE=full.dmp", "SCHEMAS=HR", "TABLES=EMP"]
        );
    }

    #[test]
    fn test_empty_values_are_treated_as_absent() {
        let options = DatapumpOptions {
            directory: Some(String::new()),
            logfile: Some("imp.log".to_string()),
            ..Default::default()
        };
        let mut arguments = Vec::new();
        options.append_common_arguments(CONNECTION_ID, &mut arguments);
        assert_eq!(arguments[1..], ["LOGFILE=imp.log"]);
    }

    #[test]
    fn test_append_is_idempotent_across_calls() {
        let options = DatapumpOptions {
            content: Some("ALL".to_string()),
            ..Default::default()
        };
        let mut first = Vec::new();
        let mut second = Vec::new();
        options.append_common_arguments(CONNECTION_ID, &mut first);
        options.append_common_arguments(CONNECTION_ID, &mut second);
        assert_eq!(first, second);
    }
}
