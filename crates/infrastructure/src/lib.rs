//! Fathom Infrastructure - reqwest transport adapter
//!
//! Implements the application ports over reqwest: TLS configuration
//! derivation, outbound request assembly and query execution.

pub mod http;
pub mod tls;

pub use http::{ClientBuildError, HttpQueryClient, RequestBuildError, build_request};
pub use tls::{TlsConfiguration, build_tls_config};
