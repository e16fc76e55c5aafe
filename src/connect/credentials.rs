//! Credential resolution
//!
//! Credentials come from one of two sources: a literal username/password
//! pair, or a named entry in the server store. A non-empty serverId always
//! wins, even when a literal pair is supplied alongside it; this mirrors the
//! long-standing observable behavior of the build integration and is kept
//! as the contract.

use crate::core::config::{ConnectionSettings, ServerStore};
use crate::core::error::CredentialError;
use crate::exec::log_sink::LogSink;
use secrecy::{ExposeSecret, SecretString};

/// A resolved username/password pair.
///
/// The password is held behind [`SecretString`] so it never appears in
/// `Debug` output; it is only exposed at the two points that genuinely need
/// the literal bytes, the connection identifier and the obfuscator.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The literal password; empty string means "no password token"
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    pub fn has_password(&self) -> bool {
        !self.password().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolve credentials from the connection settings.
///
/// Precedence: a non-empty `server_id` is looked up in the store and its
/// entry used, ignoring any literal username/password also present. Without
/// a serverId the literal pair is used. With neither, resolution fails.
///
/// Logs one info line naming the serverId used; never logs the password.
///
/// # Errors
///
/// - [`CredentialError::UnknownServerId`] when the serverId has no entry
/// - [`CredentialError::MissingCredentials`] when no source is supplied
pub fn resolve_credentials(
    settings: &ConnectionSettings,
    store: &ServerStore,
    sink: &dyn LogSink,
) -> Result<Credentials, CredentialError> {
    if let Some(server_id) = non_empty(settings.server_id.as_deref()) {
        sink.info(&format!("using credentials from serverId '{server_id}'"));
        let server = store
            .server(server_id)
            .ok_or_else(|| CredentialError::UnknownServerId(server_id.to_string()))?;
        Ok(Credentials::new(
            server.username.clone(),
            server.password.clone(),
        ))
    } else if let Some(username) = non_empty(settings.username.as_deref()) {
        Ok(Credentials::new(
            username,
            settings.password.clone().unwrap_or_default(),
        ))
    } else {
        Err(CredentialError::MissingCredentials)
    }
}
