//! Query client implementation using reqwest.
//!
//! This adapter implements the `QueryExecutor` port. It owns the immutable
//! connection settings and a reqwest client configured once per connection.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use fathom_application::decode_response;
use fathom_application::ports::{QueryError, QueryExecutor};
use fathom_domain::{ConnectionSettings, QueryDescriptor, QueryResponse, TlsError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::request::build_request;
use crate::tls::{TlsConfiguration, build_tls_config};

/// Failures constructing a query client.
///
/// Any failure here aborts connection setup entirely; no
/// partially-configured client is ever returned.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// TLS configuration could not be derived from settings.
    #[error(transparent)]
    Tls(#[from] TlsError),

    /// The HTTP transport failed to initialize.
    #[error("failed to construct HTTP client: {0}")]
    Http(String),
}

/// Executes queries over HTTP with a connection-scoped transport.
///
/// The transport carries the derived TLS configuration, proxies from the
/// environment and the fixed per-connection timeout. Invocations are
/// independent `&self` calls, so one client serves concurrent callers; the
/// only shared mutable state is reqwest's own connection pool.
#[derive(Debug)]
pub struct HttpQueryClient {
    settings: ConnectionSettings,
    client: Client,
}

impl HttpQueryClient {
    /// Creates a client for the given connection settings.
    ///
    /// # Errors
    ///
    /// Fails when the TLS configuration cannot be derived or the transport
    /// cannot be initialized.
    pub fn new(settings: ConnectionSettings) -> Result<Self, ClientBuildError> {
        let tls = build_tls_config(&settings.tls)?;
        let client = Self::transport(&settings, &tls)?;
        Ok(Self { settings, client })
    }

    /// Returns the connection settings this client was built with.
    #[must_use]
    pub const fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    fn transport(
        settings: &ConnectionSettings,
        tls: &TlsConfiguration,
    ) -> Result<Client, ClientBuildError> {
        // reqwest reads HTTP(S)_PROXY from the environment by default.
        let mut builder = tls.apply_to(Client::builder());
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|error| ClientBuildError::Http(error.without_url().to_string()))
    }

    /// Executes a query and decodes its response.
    ///
    /// Elapsed time is recorded regardless of outcome and carried on both
    /// the response and every error variant. The `request_headers` map is
    /// accepted for host compatibility but not yet merged into the
    /// outbound request.
    ///
    /// # Errors
    ///
    /// See [`QueryError`]: transport failures, status >= 400, body read
    /// failures and JSON decode failures, none of which are retried.
    pub async fn execute(
        &self,
        query: &QueryDescriptor,
        _request_headers: &HashMap<String, String>,
    ) -> Result<QueryResponse, QueryError> {
        let request = build_request(&self.settings, query).map_err(|error| {
            QueryError::Transport {
                url: query.url.clone(),
                message: error.to_string(),
                duration: Duration::ZERO,
            }
        })?;

        tracing::debug!(url = %query.url, method = %request.method(), "dispatching query");
        let start = Instant::now();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                let duration = start.elapsed();
                tracing::warn!(url = %query.url, ?duration, "transport failure");
                return Err(QueryError::Transport {
                    url: query.url.clone(),
                    // without_url: reqwest error text embeds the request
                    // URL, which carries substituted secrets.
                    message: error.without_url().to_string(),
                    duration,
                });
            }
        };
        let duration = start.elapsed();

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(url = %query.url, status = status.as_u16(), "query failed");
            return Err(QueryError::HttpStatus {
                status: status.as_u16(),
                status_text: status_line(status),
                duration,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|error| QueryError::BodyRead {
                status: status.as_u16(),
                message: error.without_url().to_string(),
                duration,
            })?;

        let value = decode_response(query.query_type, &body, content_type.as_deref()).map_err(
            |error| QueryError::Decode {
                status: status.as_u16(),
                message: error.to_string(),
                duration,
            },
        )?;

        tracing::debug!(url = %query.url, status = status.as_u16(), ?duration, "query completed");
        Ok(QueryResponse {
            value,
            status_code: status.as_u16(),
            duration,
        })
    }
}

impl QueryExecutor for HttpQueryClient {
    fn execute(
        &self,
        query: &QueryDescriptor,
        request_headers: &HashMap<String, String>,
    ) -> impl Future<Output = Result<QueryResponse, QueryError>> + Send {
        self.execute(query, request_headers)
    }
}

/// Formats a status line the way callers expect it, e.g. `404 Not Found`.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fathom_domain::TlsSettings;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings_build_a_client() {
        assert!(HttpQueryClient::new(ConnectionSettings::default()).is_ok());
    }

    #[test]
    fn invalid_tls_settings_abort_construction() {
        let settings = ConnectionSettings {
            tls: TlsSettings {
                client_auth: true,
                ..TlsSettings::default()
            },
            ..ConnectionSettings::default()
        };
        let error = HttpQueryClient::new(settings).unwrap_err();
        assert!(matches!(
            error,
            ClientBuildError::Tls(TlsError::InvalidClientCredentials)
        ));
    }

    #[test]
    fn settings_are_kept_verbatim() {
        let settings = ConnectionSettings::with_url("https://foo.com");
        let client = HttpQueryClient::new(settings.clone()).unwrap();
        assert_eq!(client.settings(), &settings);
    }

    #[test]
    fn status_line_formats() {
        assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(
            status_line(StatusCode::INTERNAL_SERVER_ERROR),
            "500 Internal Server Error"
        );
    }
}
