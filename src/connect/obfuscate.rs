//! Credential obfuscation for log output
//!
//! Every command string that reaches a log or error message passes through
//! here first; the real argument vector handed to the child process is never
//! touched.

use crate::connect::credentials::Credentials;

const USERNAME_PLACEHOLDER: &str = "<username>";
const PASSWORD_PLACEHOLDER: &str = "<password>";

/// Replace the first occurrence of `search` in `text`, if any.
///
/// An empty search string leaves the text unchanged.
fn replace_once(text: &str, search: &str, replacement: &str) -> String {
    if search.is_empty() {
        return text.to_string();
    }
    match text.find(search) {
        Some(index) => {
            let mut replaced = String::with_capacity(text.len());
            replaced.push_str(&text[..index]);
            replaced.push_str(replacement);
            replaced.push_str(&text[index + search.len()..]);
            replaced
        }
        None => text.to_string(),
    }
}

/// Produce a display-safe rendition of a command string with the literal
/// username and password replaced by placeholders.
///
/// Replacement is single-occurrence, case-sensitive, and textual: if the
/// username or password text happens to also appear earlier in the command
/// for an unrelated reason, that earlier occurrence is the one redacted.
/// This is a known limitation kept for compatibility.
pub fn obfuscate_credentials(rendered_command: &str, credentials: &Credentials) -> String {
    let replaced = replace_once(
        rendered_command,
        credentials.username(),
        USERNAME_PLACEHOLDER,
    );
    replace_once(&replaced, credentials.password(), PASSWORD_PLACEHOLDER)
}
