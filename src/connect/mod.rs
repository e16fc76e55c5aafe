//! Credential resolution, connection identifier construction, and
//! log-safe credential obfuscation

pub mod credentials;
pub mod identifier;
pub mod obfuscate;

pub use credentials::{Credentials, resolve_credentials};
pub use identifier::connection_identifier;
pub use obfuscate::obfuscate_credentials;
