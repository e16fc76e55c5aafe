//! Error handling for database tool invocations
//!
//! This module provides the error taxonomy for credential resolution and
//! child-process execution using the thiserror crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving database credentials, before any process
/// is spawned.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Neither a serverId nor a literal username was supplied
    #[error("Credentials needed. Specify either username and password or serverId")]
    MissingCredentials,

    /// A serverId was supplied but no matching entry exists in the server store
    #[error("serverId '{0}' not found!")]
    UnknownServerId(String),
}

/// Errors raised while executing the external database utility
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The child process could not be started or its pipes could not be read
    #[error("Command execution failed.")]
    LaunchFailure(#[source] std::io::Error),

    /// The child process ran and exited with a non-zero code
    #[error("program exited with exitCode: {0}")]
    NonZeroExit(i32),
}

/// Umbrella error for a complete tool invocation
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    /// SQL statements could not be written to a temporary script file
    #[error("Could not write sql statements to file")]
    ScriptWrite(#[source] std::io::Error),

    /// The server store file could not be read
    #[error("Could not read server store file {path}")]
    ServerStoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server store file could not be parsed
    #[error("Could not parse server store file {path}")]
    ServerStoreParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
