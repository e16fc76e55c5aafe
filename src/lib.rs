pub mod connect;
pub mod core;
pub mod exec;
pub mod orchestration;
pub mod tools;

pub use connect::{Credentials, connection_identifier, obfuscate_credentials, resolve_credentials};
pub use crate::core::{
    ConnectionSettings, CredentialError, ProcessError, ServerEntry, ServerStore, ToolError,
};
pub use exec::{ConsoleSink, LogSink, ProcessRunner, RecordingSink};
pub use orchestration::DbTaskRunner;
pub use tools::{
    CommandInvocation, DatapumpOptions, DbTool, ExpdpTool, ImpdpTool, SqlPlusTool,
};
