//! Fathom Application - query construction and response decoding
//!
//! Settings+query logic with no transport dependency: secret substitution,
//! query URL building, response decoding, and the execution port
//! implemented by the infrastructure layer.

pub mod decoder;
pub mod ports;
pub mod secrets;
pub mod url_builder;

pub use decoder::decode_response;
pub use ports::{QueryError, QueryExecutor};
pub use secrets::replace_secrets;
pub use url_builder::build_query_url;
