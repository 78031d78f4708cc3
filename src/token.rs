//! Request signing.
//!
//! The token is the lowercase hex SHA-256 of all form values concatenated in
//! byte-wise key order, after `TerminalKey` and `Password` have been added.
//! The same computation authenticates outgoing requests and verifies inbound
//! notifications.

use std::fmt::Debug;

use sha2::{Digest, Sha256};

use crate::form::Form;

pub const TERMINAL_KEY: &str = "TerminalKey";
pub const PASSWORD_KEY: &str = "Password";
pub const TOKEN_KEY: &str = "Token";

/// Terminal credentials issued by the gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    terminal_key: String,
    password: String,
}

impl Credentials {
    pub fn new(terminal_key: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            terminal_key: terminal_key.into(),
            password: password.into(),
        }
    }

    pub fn terminal_key(&self) -> &str {
        &self.terminal_key
    }

    /// Adds `TerminalKey`, `Password` and the resulting `Token` to `form`.
    ///
    /// Existing values under these keys are overwritten. No other key is
    /// touched.
    pub fn sign(&self, form: &mut Form) {
        form.set(TERMINAL_KEY, self.terminal_key.as_str());
        form.set(PASSWORD_KEY, self.password.as_str());
        // A stale token must not take part in its own computation.
        form.remove(TOKEN_KEY);
        let token = compute_token(form);
        form.set(TOKEN_KEY, token);
    }

    /// Returns the token `form` would carry once signed, without modifying it.
    pub fn token_for(&self, form: &Form) -> String {
        let mut form = form.clone();
        self.sign(&mut form);
        form.remove(TOKEN_KEY).unwrap_or_default()
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("terminal_key", &self.terminal_key)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Hashes the values of `form` in key order.
pub fn compute_token(form: &Form) -> String {
    let mut hasher = Sha256::new();
    for value in form.values() {
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}
