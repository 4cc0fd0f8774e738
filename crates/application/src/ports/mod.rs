//! Port definitions (interfaces)
//!
//! Ports define the boundary between the query engine and the transport
//! adapter that executes requests. The infrastructure layer implements
//! them; the host depends only on the traits.

mod http_client;

pub use http_client::{QueryError, QueryExecutor};
