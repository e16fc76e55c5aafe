//! Configuration structures for oracle-dbtools
//!
//! This module provides the connection settings consumed by every tool and
//! the server store, a YAML file of named credential entries equivalent to
//! the servers section of a build tool's settings file.

use crate::core::error::ToolError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1521
}

/// Connection parameters shared by all database tools.
///
/// The credential source fields follow a fixed precedence: a non-empty
/// `server_id` always wins over a simultaneously supplied literal
/// username/password pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionSettings {
    /// User name for the database (literal credential source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for the database (literal credential source, may be empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Reference to a server entry in the server store; takes precedence
    /// over `username`/`password` when non-empty
    #[serde(skip_serializing_if = "Option::is_none", rename = "serverId")]
    pub server_id: Option<String>,

    /// Host name of the database server (default: "localhost")
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Port of the database server (default: 1521)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Service name of the database instance
    #[serde(rename = "serviceName")]
    pub service_name: String,

    /// Instance name, commonly used with RAC databases. Only meaningful in
    /// descriptor style.
    #[serde(skip_serializing_if = "Option::is_none", rename = "instanceName")]
    pub instance_name: Option<String>,

    /// Role for the "AS" clause of the connection identifier. Only SYSDBA
    /// and SYSOPER (case-insensitive) are honored; other values are ignored.
    #[serde(skip_serializing_if = "Option::is_none", rename = "asClause")]
    pub as_clause: Option<String>,

    /// Render the connect identifier in Easy Connect form instead of the
    /// full descriptor form (default: false)
    #[serde(default, rename = "useEasyConnect")]
    pub use_easy_connect: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            server_id: None,
            hostname: default_hostname(),
            port: default_port(),
            service_name: String::new(),
            instance_name: None,
            as_clause: None,
            use_easy_connect: false,
        }
    }
}

/// A named credential entry in the server store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerEntry {
    /// Identifier referenced by `ConnectionSettings::server_id`
    pub id: String,

    /// User name for this server
    pub username: String,

    /// Password for this server (may be empty)
    #[serde(default)]
    pub password: String,
}

/// Keyed store of server credential entries, loaded from a YAML file of the
/// form:
///
/// ```yaml
/// servers:
///   - id: ci-db
///     username: scott
///     password: tiger
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ServerStore {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

impl ServerStore {
    /// Create an empty store (no serverId lookups will succeed)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a server store from a YAML file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ToolError> {
        let path = path.as_ref();
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ToolError::ServerStoreRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        serde_yaml::from_str(&contents).map_err(|e| ToolError::ServerStoreParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look up a server entry by id
    pub fn server(&self, id: &str) -> Option<&ServerEntry> {
        self.servers.iter().find(|s| s.id == id)
    }
}
