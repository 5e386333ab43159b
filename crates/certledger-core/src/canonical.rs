//! Canonical JSON encoding of certificate fields.
//!
//! The encoding is:
//! - a single JSON object, keys sorted ascending by code point
//! - `,` and `:` separators, no whitespace anywhere
//! - ASCII-only output: non-ASCII code points become `\uXXXX` escapes
//!   (lowercase hex, surrogate pairs above the BMP)
//!
//! The ledger is keyed by the SHA-256 of these bytes, so any divergence here
//! silently breaks verification of every certificate already issued.

use serde::Serialize;
use std::fmt::Write as _;

use crate::fields::{Degradation, FieldRecord, RawFields};
use crate::types::Digest;

/// Canonical bytes of a field record. Always valid ASCII.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalPayload(String);

impl CanonicalPayload {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the payload.
    pub fn digest(&self) -> Digest {
        Digest::of(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for CanonicalPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CanonicalPayload({})", self.0)
    }
}

impl AsRef<[u8]> for CanonicalPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Output of [`canonicalize`].
#[derive(Debug, Clone)]
pub struct Canonicalized {
    pub record: FieldRecord,
    pub payload: CanonicalPayload,
    pub digest: Digest,
    /// Dates kept verbatim because no layout matched.
    pub degradations: Vec<Degradation>,
}

/// Normalize raw fields and encode them canonically.
pub fn canonicalize(raw: &RawFields) -> Canonicalized {
    let (record, degradations) = FieldRecord::from_raw(raw);
    let payload = canonical_bytes(&record);
    let digest = payload.digest();
    tracing::debug!(fields = record.len(), digest = %digest, "canonicalized");
    Canonicalized {
        record,
        payload,
        digest,
        degradations,
    }
}

/// Encode an already-normalized record.
pub fn canonical_bytes(record: &FieldRecord) -> CanonicalPayload {
    let mut buf = String::with_capacity(2 + record.len() * 32);
    buf.push('{');
    // FieldRecord iterates in ascending key order.
    for (i, (key, value)) in record.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        encode_text(&mut buf, key);
        buf.push(':');
        encode_text(&mut buf, value);
    }
    buf.push('}');
    CanonicalPayload(buf)
}

/// Encode a JSON string literal with ASCII-only escaping.
fn encode_text(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0c}' => buf.push_str("\\f"),
            ' '..='~' => buf.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing to a String cannot fail.
                    let _ = write!(buf, "\\u{:04x}", unit);
                }
            }
        }
    }
    buf.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(s: &str) -> String {
        let mut buf = String::new();
        encode_text(&mut buf, s);
        buf
    }

    #[test]
    fn test_scenario_fields_payload() {
        let raw = RawFields::new()
            .with("University", "X")
            .with("Enrollment No", "12345678901")
            .with("Student Name", "Jane Doe");
        let out = canonicalize(&raw);
        assert_eq!(
            out.payload.as_str(),
            r#"{"enrollment_no":"12345678901","name":"Jane Doe","university":"X"}"#
        );
        assert_eq!(
            out.digest.to_hex(),
            "7a57dedf7a75dd4321788fdbda71d1578a89e6b464aa6317a01128f372fc693c"
        );
    }

    #[test]
    fn test_alias_and_date_spelling_converge() {
        let a = canonicalize(&RawFields::new().with("Date of Birth", "01/02/2020"));
        let b = canonicalize(&RawFields::new().with("dob", "2020-02-01"));
        assert_eq!(a.payload, b.payload);
        assert_eq!(a.payload.as_str(), r#"{"dob":"2020-02-01"}"#);
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = canonicalize(
            &RawFields::new()
                .with("Name", "A")
                .with("Course", "B")
                .with("University", "C"),
        );
        let b = canonicalize(
            &RawFields::new()
                .with("University", "C")
                .with("Program", "B")
                .with("Student Name", "A"),
        );
        assert_eq!(a.payload, b.payload);
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn test_empty_record() {
        let out = canonicalize(&RawFields::new().with("Name", "  "));
        assert_eq!(out.payload.as_str(), "{}");
    }

    #[test]
    fn test_non_ascii_escaping() {
        assert_eq!(encoded("Zoë"), r#""Zo\u00eb""#);
        // U+1F393 graduation cap: surrogate pair
        assert_eq!(encoded("\u{1F393}"), r#""\ud83c\udf93""#);
    }

    #[test]
    fn test_control_escaping() {
        assert_eq!(encoded("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(encoded("\n\r\t\u{08}\u{0c}"), r#""\n\r\t\b\f""#);
        assert_eq!(encoded("\u{01}"), r#""\u0001""#);
        assert_eq!(encoded("/"), r#""/""#);
        assert_eq!(encoded("\u{7f}"), r#""\u007f""#);
    }

    #[test]
    fn test_payload_is_ascii() {
        let out = canonicalize(&RawFields::new().with("नाम", "छात्र"));
        assert!(out.payload.as_str().is_ascii());
    }

    #[test]
    fn test_degradations_surface() {
        let out = canonicalize(&RawFields::new().with("Date", "next tuesday"));
        assert_eq!(out.degradations.len(), 1);
        assert_eq!(out.payload.as_str(), r#"{"date":"next tuesday"}"#);
    }
}
