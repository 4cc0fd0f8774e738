//! Query descriptor types supplied by the caller, one per invocation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared response format of a query.
///
/// The declared type drives the response decode strategy; see
/// [`QueryType::decode_strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryType {
    /// A JSON document.
    Json,
    /// A GraphQL query returning JSON.
    Graphql,
    /// A CSV document, decoded by an external parser.
    Csv,
    /// An XML document, decoded by an external parser.
    Xml,
    /// A UQL query; response structure is detected from the content type.
    Uql,
    /// A GROQ query; response structure is detected from the content type.
    Groq,
    /// No declared type; the body is passed through as text.
    #[default]
    Unspecified,
}

impl QueryType {
    /// Parses the wire string for a declared type.
    ///
    /// Unknown values map to [`QueryType::Unspecified`] and are handled as
    /// passthrough text.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "graphql" => Self::Graphql,
            "csv" => Self::Csv,
            "xml" => Self::Xml,
            "uql" => Self::Uql,
            "groq" => Self::Groq,
            _ => Self::Unspecified,
        }
    }

    /// Returns true for types that send and receive JSON documents.
    #[must_use]
    pub const fn is_json_family(self) -> bool {
        matches!(self, Self::Json | Self::Graphql)
    }

    /// Returns how a response body for this query type is decoded.
    #[must_use]
    pub const fn decode_strategy(self) -> DecodeStrategy {
        match self {
            Self::Json | Self::Graphql => DecodeStrategy::Structured,
            Self::Uql | Self::Groq => DecodeStrategy::SniffContentType,
            Self::Csv | Self::Xml | Self::Unspecified => DecodeStrategy::Passthrough,
        }
    }

    /// Returns the type as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Graphql => "graphql",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Uql => "uql",
            Self::Groq => "groq",
            Self::Unspecified => "",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for QueryType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QueryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}

/// Response decode strategy for a declared query type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Always parse the body as a generic JSON value tree.
    Structured,
    /// Parse as JSON only when the response content type says JSON;
    /// otherwise pass the body through as text.
    SniffContentType,
    /// Return the raw body as text, no parsing.
    Passthrough,
}

/// HTTP method of a query.
///
/// The engine issues POST when declared and GET for everything else,
/// so unrecognized wire values deserialize to [`HttpMethod::Get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// HTTP GET method.
    #[default]
    Get,
    /// HTTP POST method.
    Post,
}

impl HttpMethod {
    /// Parses the wire string for a method; anything but `POST` is GET.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "POST" => Self::Post,
            _ => Self::Get,
        }
    }

    /// Returns whether this method carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}

/// A key/value URL parameter declared on a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParam {
    /// The parameter key.
    pub key: String,
    /// The parameter value; may reference secure fields via placeholders.
    pub value: String,
}

impl UrlParam {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A key/value request header declared on a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    /// The header name.
    pub key: String,
    /// The header value; may reference secure fields via placeholders.
    pub value: String,
}

impl RequestHeader {
    /// Creates a new header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Per-query URL options: method, body payload, parameters and headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    /// Raw request body payload for POST queries.
    pub data: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// URL parameters in caller order. The final query string is always
    /// emitted key-sorted regardless of this order.
    pub params: Vec<UrlParam>,

    /// Request headers in caller order. Order is significant: a later
    /// header replaces an earlier one of the same name.
    pub headers: Vec<RequestHeader>,
}

/// A single query invocation against a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescriptor {
    /// Target URL, absolute or relative to the connection base URL.
    pub url: String,

    /// Declared response format.
    #[serde(rename = "type")]
    pub query_type: QueryType,

    /// Method, body, parameters and headers.
    pub url_options: UrlOptions,
}

impl QueryDescriptor {
    /// Creates a descriptor with only a URL and declared type.
    #[must_use]
    pub fn new(url: impl Into<String>, query_type: QueryType) -> Self {
        Self {
            url: url.into(),
            query_type,
            url_options: UrlOptions::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_strategy_per_type() {
        assert_eq!(QueryType::Json.decode_strategy(), DecodeStrategy::Structured);
        assert_eq!(
            QueryType::Graphql.decode_strategy(),
            DecodeStrategy::Structured
        );
        assert_eq!(
            QueryType::Uql.decode_strategy(),
            DecodeStrategy::SniffContentType
        );
        assert_eq!(
            QueryType::Groq.decode_strategy(),
            DecodeStrategy::SniffContentType
        );
        assert_eq!(QueryType::Csv.decode_strategy(), DecodeStrategy::Passthrough);
        assert_eq!(QueryType::Xml.decode_strategy(), DecodeStrategy::Passthrough);
        assert_eq!(
            QueryType::Unspecified.decode_strategy(),
            DecodeStrategy::Passthrough
        );
    }

    #[test]
    fn query_type_from_wire() {
        let parsed: QueryType = serde_json::from_str(r#""graphql""#).unwrap();
        assert_eq!(parsed, QueryType::Graphql);

        // Unknown declared types fall back to passthrough handling.
        let parsed: QueryType = serde_json::from_str(r#""tsv""#).unwrap();
        assert_eq!(parsed, QueryType::Unspecified);
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Post.has_body());

        // Only POST is ever issued as POST.
        let parsed: HttpMethod = serde_json::from_str(r#""PUT""#).unwrap();
        assert_eq!(parsed, HttpMethod::Get);
    }

    #[test]
    fn descriptor_from_wire_shape() {
        let descriptor: QueryDescriptor = serde_json::from_str(
            r#"{
                "url": "/hello",
                "type": "json",
                "url_options": {
                    "method": "POST",
                    "data": "{}",
                    "params": [{"key": "page", "value": "1"}],
                    "headers": [{"key": "X-Id", "value": "abc"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.url, "/hello");
        assert_eq!(descriptor.query_type, QueryType::Json);
        assert_eq!(descriptor.url_options.method, HttpMethod::Post);
        assert_eq!(descriptor.url_options.params[0].key, "page");
        assert_eq!(descriptor.url_options.headers[0].value, "abc");
    }

    #[test]
    fn descriptor_defaults() {
        let descriptor: QueryDescriptor = serde_json::from_str(r#"{"url": "/x"}"#).unwrap();
        assert_eq!(descriptor.query_type, QueryType::Unspecified);
        assert_eq!(descriptor.url_options.method, HttpMethod::Get);
        assert!(descriptor.url_options.params.is_empty());
    }
}
