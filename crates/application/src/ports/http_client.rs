//! HTTP query execution port

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use fathom_domain::{QueryDescriptor, QueryResponse};
use thiserror::Error;

/// Failures executing a single query.
///
/// Every variant records the duration elapsed before the failure; variants
/// observed after a response was obtained also carry the HTTP status.
/// Nothing in these errors contains substituted URLs or secure-field
/// values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Network, connection or timeout failure before a response was
    /// obtained.
    #[error("error getting response from {url}")]
    Transport {
        /// The descriptor URL as the caller supplied it, never the
        /// secret-substituted one.
        url: String,
        /// Underlying transport error message.
        message: String,
        /// Elapsed time until the failure.
        duration: Duration,
    },

    /// The endpoint answered with a status of 400 or above. The body is
    /// not read in this case.
    #[error("{status_text}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Status line, e.g. `404 Not Found`.
        status_text: String,
        /// Elapsed time of the exchange.
        duration: Duration,
    },

    /// The response body could not be read after a successful status.
    #[error("failed to read response body: {message}")]
    BodyRead {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying read error message.
        message: String,
        /// Elapsed time of the exchange.
        duration: Duration,
    },

    /// A JSON-family or JSON-detected response failed to parse.
    #[error("failed to decode response: {message}")]
    Decode {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying parse error message.
        message: String,
        /// Elapsed time of the exchange.
        duration: Duration,
    },
}

impl QueryError {
    /// Returns the HTTP status code, when one was obtained.
    ///
    /// Transport failures happen before any response, so they carry none.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::HttpStatus { status, .. }
            | Self::BodyRead { status, .. }
            | Self::Decode { status, .. } => Some(*status),
        }
    }

    /// Returns the duration recorded for the attempt.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Transport { duration, .. }
            | Self::HttpStatus { duration, .. }
            | Self::BodyRead { duration, .. }
            | Self::Decode { duration, .. } => *duration,
        }
    }
}

/// Port for executing queries against a configured connection.
///
/// Implementations own the transport. Invocations are independent and the
/// receiver is shared read-only, so one implementation serves concurrent
/// callers without external locking.
pub trait QueryExecutor: Send + Sync {
    /// Executes a query and decodes its response.
    ///
    /// The `request_headers` map is accepted for host compatibility but is
    /// not yet merged into the outbound request.
    fn execute(
        &self,
        query: &QueryDescriptor,
        request_headers: &HashMap<String, String>,
    ) -> impl Future<Output = Result<QueryResponse, QueryError>> + Send;
}
