//! Fathom Domain - Core query engine types
//!
//! This crate defines the domain model for the Fathom query engine.
//! All types here are pure Rust with no I/O dependencies.

pub mod query;
pub mod response;
pub mod settings;
pub mod tls;

pub use query::{
    DecodeStrategy, HttpMethod, QueryDescriptor, QueryType, RequestHeader, UrlOptions, UrlParam,
};
pub use response::{QueryResponse, QueryValue};
pub use settings::ConnectionSettings;
pub use tls::{TlsError, TlsSettings};
