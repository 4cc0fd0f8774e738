//! Connection Settings Domain Model
//!
//! Settings are supplied once per logical connection and treated as
//! immutable for the lifetime of the client that owns them.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tls::TlsSettings;

/// Connection-wide settings shared by every query on a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Base URL prepended to relative query URLs.
    pub url: String,

    /// TLS transport settings.
    pub tls: TlsSettings,

    /// Whether to attach a Basic authentication header.
    pub basic_auth_enabled: bool,

    /// Basic authentication username.
    pub username: String,

    /// Basic authentication password.
    pub password: String,

    /// Headers applied to every outbound request. These override per-query
    /// headers of the same name.
    pub custom_headers: HashMap<String, String>,

    /// Secret key/value pairs referenced via `${__qs.<key>}` placeholders.
    ///
    /// Values are injected at request time and must never appear in logs or
    /// stored queries.
    pub secure_query_fields: HashMap<String, String>,

    /// Request timeout in seconds. Zero disables the timeout.
    pub timeout_seconds: u64,
}

impl ConnectionSettings {
    /// Creates settings with only a base URL set.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the per-request timeout, or `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }

    /// Returns true when a Basic authentication header should be attached.
    ///
    /// The header is only attached when the feature is enabled and at least
    /// one of username/password is non-empty.
    #[must_use]
    pub fn use_basic_auth(&self) -> bool {
        self.basic_auth_enabled && (!self.username.is_empty() || !self.password.is_empty())
    }
}
