//! TLS transport settings and their validation failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TLS settings for a connection.
///
/// All fields default to off; a default value derives to an empty TLS
/// configuration with full certificate verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    /// Skip server certificate verification (dangerous!).
    pub insecure_skip_verify: bool,

    /// Override the server name used for SNI and certificate validation.
    /// Empty means no override.
    pub server_name: String,

    /// Whether the client presents a certificate/key pair (mutual TLS).
    pub client_auth: bool,

    /// PEM-encoded client certificate.
    pub client_cert: String,

    /// PEM-encoded client private key.
    pub client_key: String,

    /// Whether a custom CA certificate is used to verify the server.
    pub ca_auth: bool,

    /// PEM-encoded CA certificate.
    pub ca_cert: String,
}

impl TlsSettings {
    /// Returns true when no field deviates from the default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Failures deriving a TLS configuration from settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TlsError {
    /// Mutual TLS requested without both certificate and key material.
    #[error("invalid client cert or key")]
    InvalidClientCredentials,

    /// The client certificate/key pair did not parse.
    #[error("invalid client certificate: {0}")]
    CertificateParse(String),

    /// The CA certificate did not parse.
    #[error("invalid TLS CA certificate")]
    InvalidCaCertificate,
}
