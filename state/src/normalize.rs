//! Normalization of raw state store responses
//!
//! The state store sometimes returns a value that was saved as text as a JSON
//! string literal wrapping the payload, instead of the payload itself. Every
//! response is passed through [`normalize_state_response`] before it reaches a
//! serializer.

use std::borrow::Cow;
use tracing::trace;

/// Unwrap a double-encoded state response.
///
/// If `raw` is exactly one JSON string literal, the content of that string is
/// returned. Anything else, including empty input, is returned unchanged.
pub fn normalize_state_response(raw: &[u8]) -> Cow<'_, [u8]> {
    if raw.is_empty() {
        return Cow::Borrowed(raw);
    }

    match serde_json::from_slice::<String>(raw) {
        Ok(inner) => {
            trace!(
                "Unwrapped double-encoded state response ({} -> {} bytes)",
                raw.len(),
                inner.len()
            );
            Cow::Owned(inner.into_bytes())
        }
        Err(_) => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_passthrough() {
        let normalized = normalize_state_response(b"");
        assert!(normalized.is_empty());
        assert!(matches!(normalized, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unwraps_json_string_literal() {
        let raw = br#""{\"x\":1}""#;
        let normalized = normalize_state_response(raw);
        assert_eq!(normalized.as_ref(), br#"{"x":1}"#);
    }

    #[test]
    fn test_plain_payloads_unchanged() {
        for raw in [
            &br#"{"x":1}"#[..],
            b"100",
            b"null",
            b"[1,2,3]",
            b"not json at all",
            &[0xff, 0x00, 0x17][..],
        ] {
            let normalized = normalize_state_response(raw);
            assert_eq!(normalized.as_ref(), raw);
            assert!(matches!(normalized, Cow::Borrowed(_)));
        }
    }

    #[test]
    fn test_idempotent_on_normalized_output() {
        let raw = br#""{\"balance\":100}""#;
        let once = normalize_state_response(raw).into_owned();
        let twice = normalize_state_response(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trailing_garbage_is_not_a_literal() {
        let raw = br#""abc" trailing"#;
        assert_eq!(normalize_state_response(raw).as_ref(), raw);
    }

    #[test]
    fn test_escaped_unicode_is_decoded() {
        let raw = br#""caf\u00e9""#;
        assert_eq!(normalize_state_response(raw).as_ref(), "café".as_bytes());
    }
}
