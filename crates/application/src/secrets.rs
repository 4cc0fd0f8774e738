//! Secret placeholder substitution
//!
//! Connection settings carry secure query fields whose values are injected
//! into URLs, headers and parameters at request time. Strings reference
//! them with `${__qs.<key>}` placeholders so the secret value never has to
//! appear in a stored query.

use std::collections::HashMap;

/// Replaces every `${__qs.<key>}` placeholder with its configured value.
///
/// Replacement is literal text substitution keyed by exact field name.
/// Placeholders referencing unknown keys are left verbatim; map iteration
/// order is irrelevant because lookup is keyed, not positional.
#[must_use]
pub fn replace_secrets(input: &str, secure_fields: &HashMap<String, String>) -> String {
    if !input.contains("${__qs.") {
        return input.to_string();
    }
    let mut output = input.to_string();
    for (key, value) in secure_fields {
        output = output.replace(&format!("${{__qs.{key}}}"), value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn replaces_known_keys() {
        let secure = fields(&[("token", "s3cr3t")]);
        assert_eq!(
            replace_secrets("https://foo.com?auth=${__qs.token}", &secure),
            "https://foo.com?auth=s3cr3t"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let secure = fields(&[("k", "v")]);
        assert_eq!(
            replace_secrets("${__qs.k}/${__qs.k}", &secure),
            "v/v"
        );
    }

    #[test]
    fn unknown_keys_left_verbatim() {
        let secure = fields(&[("known", "x")]);
        assert_eq!(
            replace_secrets("${__qs.unknown}", &secure),
            "${__qs.unknown}"
        );
    }

    #[test]
    fn no_placeholder_is_a_no_op() {
        let secure = fields(&[("k", "v")]);
        assert_eq!(replace_secrets("plain string", &secure), "plain string");
        assert_eq!(replace_secrets("", &secure), "");
    }

    #[test]
    fn partial_tokens_are_not_substituted() {
        let secure = fields(&[("k", "v")]);
        assert_eq!(replace_secrets("${__qs.k", &secure), "${__qs.k");
        assert_eq!(replace_secrets("$__qs.k}", &secure), "$__qs.k}");
    }
}
