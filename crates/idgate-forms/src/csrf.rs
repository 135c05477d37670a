//! Anti-forgery token propagation.

use crate::field::MetaToken;

/// Filters `metas` down to the anti-forgery token field and maps each hit to
/// a header entry.
///
/// The portal uses two distinct token field names across the flow (the
/// standard page token and the passkey-branch token) and the header name
/// differs by step, so both are parameters here — never inferred.
///
/// No matching meta yields an empty set. That is not an error at this layer;
/// if the portal required the token, the next response fails its validation
/// instead.
pub fn csrf_headers(
    metas: &[MetaToken],
    token_field: &str,
    header_name: &str,
) -> Vec<(String, String)> {
    metas
        .iter()
        .filter(|meta| meta.name == token_field)
        .map(|meta| (header_name.to_string(), meta.content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str, content: &str) -> MetaToken {
        MetaToken {
            name: name.into(),
            content: content.into(),
        }
    }

    #[test]
    fn test_filters_by_token_field_name() {
        let metas = vec![
            meta("viewport", "width=device-width"),
            meta("csrf-token", "tok-1"),
            meta("description", "portal"),
        ];

        let headers = csrf_headers(&metas, "csrf-token", "X-CSRF-Token");
        assert_eq!(headers, vec![("X-CSRF-Token".to_string(), "tok-1".to_string())]);
    }

    #[test]
    fn test_header_name_is_parameterized() {
        let metas = vec![meta("webauthn-csrf-token", "tok-2")];

        let headers = csrf_headers(&metas, "webauthn-csrf-token", "X-WebAuthn-CSRF-Token");
        assert_eq!(
            headers,
            vec![("X-WebAuthn-CSRF-Token".to_string(), "tok-2".to_string())]
        );
    }

    #[test]
    fn test_no_match_yields_empty_set() {
        let metas = vec![meta("viewport", "width=device-width")];
        assert!(csrf_headers(&metas, "csrf-token", "X-CSRF-Token").is_empty());
    }

    #[test]
    fn test_every_match_becomes_a_header() {
        let metas = vec![meta("csrf-token", "a"), meta("csrf-token", "b")];
        let headers = csrf_headers(&metas, "csrf-token", "X-CSRF-Token");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].1, "b");
    }
}
