//! Core configuration and error types

pub mod config;
pub mod error;

pub use config::{ConnectionSettings, ServerEntry, ServerStore};
pub use error::{CredentialError, ProcessError, ToolError};
