//! Outbound request assembly.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use fathom_application::{build_query_url, replace_secrets};
use fathom_domain::{ConnectionSettings, HttpMethod, QueryDescriptor, QueryType};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Method, Request, Url};
use thiserror::Error;

/// Failures assembling an outbound request.
///
/// Messages never contain substituted URLs or header values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestBuildError {
    /// The final URL did not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name is not a valid HTTP header name.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A header value contains characters not allowed in HTTP headers.
    #[error("invalid header value for: {0}")]
    InvalidHeaderValue(String),
}

/// Assembles the outbound request for a query.
///
/// The URL comes from the query URL builder; the method is POST when
/// declared and GET otherwise (GET never carries a body). Headers are
/// applied with set-semantics in three passes: Basic auth and content
/// type, then per-query headers in declared order with secrets
/// substituted, then connection-wide custom headers, which take final
/// precedence.
///
/// A POST body for a graphql query is wrapped in a `{"query": <data>}`
/// envelope; other POST bodies carry the raw data.
///
/// # Errors
///
/// Fails when the final URL does not parse or a header name/value is not
/// valid HTTP header material.
pub fn build_request(
    settings: &ConnectionSettings,
    query: &QueryDescriptor,
) -> Result<Request, RequestBuildError> {
    let url = build_query_url(settings, query);
    // The parse error text alone; the substituted URL stays out of errors.
    let url = Url::parse(&url).map_err(|error| RequestBuildError::InvalidUrl(error.to_string()))?;

    let method = match query.url_options.method {
        HttpMethod::Post => Method::POST,
        HttpMethod::Get => Method::GET,
    };

    let mut request = Request::new(method, url);
    *request.headers_mut() = build_headers(settings, query)?;
    if query.url_options.method.has_body() {
        *request.body_mut() = Some(Body::from(request_body(query)));
    }
    Ok(request)
}

fn build_headers(
    settings: &ConnectionSettings,
    query: &QueryDescriptor,
) -> Result<HeaderMap, RequestBuildError> {
    let mut headers = HeaderMap::new();

    if settings.use_basic_auth() {
        let credentials = BASE64.encode(format!("{}:{}", settings.username, settings.password));
        let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|_| RequestBuildError::InvalidHeaderValue("Authorization".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    if query.query_type.is_json_family() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    for header in &query.url_options.headers {
        let name = parse_header_name(&header.key)?;
        let value = replace_secrets(&header.value, &settings.secure_query_fields);
        let value = HeaderValue::from_str(&value)
            .map_err(|_| RequestBuildError::InvalidHeaderValue(header.key.clone()))?;
        headers.insert(name, value);
    }

    // Connection-wide headers win over per-query headers of the same name.
    for (key, value) in &settings.custom_headers {
        let name = parse_header_name(key)?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| RequestBuildError::InvalidHeaderValue(key.clone()))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn parse_header_name(key: &str) -> Result<HeaderName, RequestBuildError> {
    HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| RequestBuildError::InvalidHeaderName(key.to_string()))
}

fn request_body(query: &QueryDescriptor) -> String {
    let data = &query.url_options.data;
    if query.query_type == QueryType::Graphql {
        serde_json::json!({ "query": data }).to_string()
    } else {
        data.clone()
    }
}
