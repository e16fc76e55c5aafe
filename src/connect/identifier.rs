//! Connection identifier construction
//!
//! Renders the connect string handed to the Oracle client tools as a single
//! token, in either the full descriptor form or the compact Easy Connect
//! form. The descriptor form is spelled out completely so the tools never
//! depend on TNSNAMES resolution.
//!
//! See the SQL*Plus User's Guide and Reference for the grammar.

use crate::connect::credentials::Credentials;
use crate::core::config::ConnectionSettings;
use std::fmt::Write;

/// Build the connect identifier for the given credentials and settings.
///
/// Deterministic and pure; credential resolution failures have already been
/// surfaced upstream. The result contains no whitespace except inside an
/// optional trailing role clause (` AS SYSDBA` / ` AS SYSOPER`), so it stays
/// passable as one argument when the caller quotes it.
pub fn connection_identifier(credentials: &Credentials, settings: &ConnectionSettings) -> String {
    let mut connection_id = String::new();
    push_username_and_password(&mut connection_id, credentials);
    if settings.use_easy_connect {
        push_easy_connect(&mut connection_id, settings);
    } else {
        push_descriptor(&mut connection_id, settings);
    }
    push_as_clause(&mut connection_id, settings.as_clause.as_deref());
    connection_id
}

// <username>[/<password>]
fn push_username_and_password(connection_id: &mut String, credentials: &Credentials) {
    connection_id.push_str(credentials.username());
    if credentials.has_password() {
        connection_id.push('/');
        connection_id.push_str(credentials.password());
    }
}

// @(DESCRIPTION=(ADDRESS_LIST=(ADDRESS=(PROTOCOL=tcp)(HOST=<host>)(PORT=<port>)))
//   (CONNECT_DATA=(SERVICE_NAME=<serviceName>)[(INSTANCE_NAME=<instanceName>)]))
fn push_descriptor(connection_id: &mut String, settings: &ConnectionSettings) {
    connection_id.push_str("@(DESCRIPTION=(ADDRESS_LIST=(ADDRESS=(PROTOCOL=tcp)");
    let _ = write!(
        connection_id,
        "(HOST={})(PORT={})))",
        settings.hostname, settings.port
    );
    let _ = write!(
        connection_id,
        "(CONNECT_DATA=(SERVICE_NAME={})",
        settings.service_name
    );
    if let Some(instance_name) = settings.instance_name.as_deref().filter(|i| !i.is_empty()) {
        let _ = write!(connection_id, "(INSTANCE_NAME={instance_name})");
    }
    connection_id.push_str("))");
}

// @//<host>:<port>/<serviceName>
fn push_easy_connect(connection_id: &mut String, settings: &ConnectionSettings) {
    let _ = write!(
        connection_id,
        "@//{}:{}/{}",
        settings.hostname, settings.port, settings.service_name
    );
}

// Only SYSDBA and SYSOPER are honored; any other value is silently ignored.
fn push_as_clause(connection_id: &mut String, as_clause: Option<&str>) {
    if let Some(role) = as_clause {
        if role.eq_ignore_ascii_case("SYSDBA") || role.eq_ignore_ascii_case("SYSOPER") {
            connection_id.push_str(" AS ");
            connection_id.push_str(&role.to_ascii_uppercase());
        }
    }
}
