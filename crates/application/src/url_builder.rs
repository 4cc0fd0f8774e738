//! Query URL construction
//!
//! Composes the final request URL from the connection base URL, the
//! possibly-relative query URL, declared URL parameters and secure query
//! fields.

use std::collections::BTreeMap;

use fathom_domain::{ConnectionSettings, QueryDescriptor};
use url::Url;

use crate::secrets::replace_secrets;

/// Builds the final request URL for a query.
///
/// The descriptor URL is prepended with the connection base URL unless it
/// already starts with it. Secure query fields always overwrite same-named
/// caller parameters, so secrets cannot be shadowed by an untrusted query
/// body, and the query string is re-encoded with keys sorted.
///
/// A string that does not parse as a URL is returned as-is after secret
/// substitution; request construction downstream reports the failure.
#[must_use]
pub fn build_query_url(settings: &ConnectionSettings, query: &QueryDescriptor) -> String {
    let mut url_string = query.url.clone();
    if !url_string.starts_with(&settings.url) {
        url_string = format!("{}{}", settings.url, url_string);
    }
    let url_string = replace_secrets(&url_string, &settings.secure_query_fields);

    let Ok(mut url) = Url::parse(&url_string) else {
        return url_string;
    };

    // Multi-valued keys from the raw query string survive until a caller
    // param or secure field replaces them.
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    for param in &query.url_options.params {
        let value = replace_secrets(&param.value, &settings.secure_query_fields);
        params.insert(param.key.clone(), vec![value]);
    }

    // Secure fields win over caller params of the same key.
    for (key, value) in &settings.secure_query_fields {
        params.insert(key.clone(), vec![value.clone()]);
    }

    if params.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, values) in &params {
            for value in values {
                pairs.append_pair(key, value);
            }
        }
    }

    url.to_string()
}
