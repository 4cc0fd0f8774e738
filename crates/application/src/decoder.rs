//! Response body decoding
//!
//! Decodes a response body according to the declared query type and, for
//! ambiguous query languages, the actual response content type.

use fathom_domain::{DecodeStrategy, QueryType, QueryValue};

/// Decodes a response body into a [`QueryValue`].
///
/// JSON-family types always parse the body as a generic JSON tree. UQL and
/// GROQ detect structure from the live response instead of trusting the
/// declared type: they parse only when the content-type header says JSON.
/// Every other type passes the body through as text for an external
/// format-specific parser.
///
/// # Errors
///
/// Returns the JSON parse error when a structured or JSON-detected body
/// fails to parse.
pub fn decode_response(
    query_type: QueryType,
    body: &[u8],
    content_type: Option<&str>,
) -> Result<QueryValue, serde_json::Error> {
    match query_type.decode_strategy() {
        DecodeStrategy::Structured => Ok(QueryValue::Json(serde_json::from_slice(body)?)),
        DecodeStrategy::SniffContentType => {
            if content_type.is_some_and(is_json_content_type) {
                Ok(QueryValue::Json(serde_json::from_slice(body)?))
            } else {
                Ok(passthrough(body))
            }
        }
        DecodeStrategy::Passthrough => Ok(passthrough(body)),
    }
}

fn passthrough(body: &[u8]) -> QueryValue {
    QueryValue::Text(String::from_utf8_lossy(body).into_owned())
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}
