//! Execution result types returned to the caller.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// A decoded response value: a structured JSON tree or raw text.
///
/// Text values carry formats this engine does not parse (CSV, XML and
/// unrecognized types); a format-specific parser downstream takes over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Generic JSON value tree.
    Json(Value),
    /// Raw response text.
    Text(String),
}

impl QueryValue {
    /// Returns the structured JSON value, if this is one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text, if this is a passthrough value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for QueryValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Outcome of a successfully executed query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// Decoded response value.
    pub value: QueryValue,

    /// HTTP status code of the response.
    pub status_code: u16,

    /// Wall-clock time of the full request/response cycle.
    pub duration: Duration,
}

impl QueryResponse {
    /// Returns true if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn value_accessors() {
        let json = QueryValue::Json(json!({"a": 1}));
        assert!(json.as_json().is_some());
        assert_eq!(json.as_text(), None);

        let text = QueryValue::Text("a,b\n1,2".to_string());
        assert_eq!(text.as_text(), Some("a,b\n1,2"));
        assert!(text.as_json().is_none());
    }

    #[test]
    fn value_serializes_untagged() {
        let json = QueryValue::Json(json!([1, 2]));
        assert_eq!(serde_json::to_string(&json).unwrap(), "[1,2]");

        let text = QueryValue::Text("hello".to_string());
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""hello""#);
    }

    #[test]
    fn response_success_range() {
        let response = QueryResponse {
            value: QueryValue::Text(String::new()),
            status_code: 204,
            duration: Duration::from_millis(12),
        };
        assert!(response.is_success());

        let response = QueryResponse {
            status_code: 399,
            ..response
        };
        assert!(!response.is_success());
    }
}
