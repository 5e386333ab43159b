//! Golden canonicalization vectors.
//!
//! Each vector pins the exact canonical payload and SHA-256 digest for a raw
//! field set. Ledgers written by any earlier build are keyed by these
//! digests, so a mismatch here means existing certificates stop verifying.

use serde::Serialize;

use certledger_core::{canonicalize, RawFields};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Raw `(label, value)` pairs, in extraction order.
    pub fields: &'static [(&'static str, &'static str)],
    /// Expected canonical payload.
    pub payload: &'static str,
    /// Expected SHA-256 of the payload (hex).
    pub digest: &'static str,
}

impl GoldenVector {
    pub fn raw_fields(&self) -> RawFields {
        self.fields.iter().copied().collect()
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "scenario certificate",
            fields: &[
                ("Name", "Jane Doe"),
                ("Enrollment No", "12345678901"),
                ("University", "X"),
            ],
            payload: r#"{"enrollment_no":"12345678901","name":"Jane Doe","university":"X"}"#,
            digest: "7a57dedf7a75dd4321788fdbda71d1578a89e6b464aa6317a01128f372fc693c",
        },
        GoldenVector {
            name: "day-first date of birth",
            fields: &[("Date of Birth", "01/02/2020")],
            payload: r#"{"dob":"2020-02-01"}"#,
            digest: "c6ef11c2c2837d9b848ae53687c8e9fce2bdc5e7d6dc266b3658030fd4f69949",
        },
        GoldenVector {
            name: "ISO date of birth",
            fields: &[("dob", "2020-02-01")],
            payload: r#"{"dob":"2020-02-01"}"#,
            digest: "c6ef11c2c2837d9b848ae53687c8e9fce2bdc5e7d6dc266b3658030fd4f69949",
        },
        GoldenVector {
            name: "full transcript with aliases",
            fields: &[
                ("University", "Gujarat Technological University"),
                ("Enrollment Number", "190280107001"),
                ("Name", "Asha Patel"),
                ("Program", "B.E."),
                ("Specialization", "Computer Engineering"),
                ("Sem", "7"),
                ("Statement No", "A123456"),
                ("Date", "15 Jan 2024"),
            ],
            payload: concat!(
                r#"{"branch":"Computer Engineering","course":"B.E.","date":"2024-01-15","#,
                r#""enrollment_no":"190280107001","name":"Asha Patel","semester":"7","#,
                r#""statement_no":"A123456","university":"Gujarat Technological University"}"#,
            ),
            digest: "939b2be03e358e82196cc017967e2025efd15981d0ab6b650afbe56703cfd7a1",
        },
        GoldenVector {
            name: "unknown label, padding, empty value, non-ASCII",
            fields: &[("Seat Number", " 42 "), ("name", "Zo\u{eb}"), ("Grade", "")],
            payload: r#"{"name":"Zo\u00eb","seat_number":"42"}"#,
            digest: "45688f3fc160e24609dfe2bd0bb4d568538c1f7820bb37cd55e25709834fd02c",
        },
        GoldenVector {
            name: "unparseable date kept verbatim",
            fields: &[("Date of Birth", "sometime in 1999")],
            payload: r#"{"dob":"sometime in 1999"}"#,
            digest: "90d85b059b2d2b2ea967e45db78ba90f49022fdc23f4b2ffdc2af1b0a67cd1db",
        },
        GoldenVector {
            name: "two-digit year kept verbatim",
            fields: &[("Date", "01/02/20")],
            payload: r#"{"date":"01/02/20"}"#,
            digest: "e919d2573e13a10b5d1dbd9be519116aed2126297188fad347d724d7ad0d9b46",
        },
        GoldenVector {
            name: "signed year kept verbatim",
            fields: &[("DOB", "01/02/-2020")],
            payload: r#"{"dob":"01/02/-2020"}"#,
            digest: "8ff9c931c5c02ebc83b80669ea1cf2a6fd7d9b4fcd923314e987d7b3b3b195a2",
        },
        GoldenVector {
            name: "no fields",
            fields: &[],
            payload: "{}",
            digest: "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a",
        },
    ]
}

/// Result of checking one vector.
#[derive(Debug, Clone)]
pub struct VectorOutcome {
    pub name: &'static str,
    pub payload: String,
    pub digest: String,
    pub matches: bool,
}

/// Run every vector through [`canonicalize`].
pub fn verify_all_vectors() -> Vec<VectorOutcome> {
    all_vectors()
        .iter()
        .map(|v| {
            let canonical = canonicalize(&v.raw_fields());
            let payload = canonical.payload.as_str().to_string();
            let digest = canonical.digest.to_hex();
            VectorOutcome {
                name: v.name,
                matches: payload == v.payload && digest == v.digest,
                payload,
                digest,
            }
        })
        .collect()
}

/// The vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use certledger_core::Digest;

    #[test]
    fn test_all_vectors_match() {
        for outcome in verify_all_vectors() {
            assert!(
                outcome.matches,
                "vector '{}' produced {} / {}",
                outcome.name, outcome.payload, outcome.digest
            );
        }
    }

    #[test]
    fn test_expected_digests_are_hashes_of_payloads() {
        for vector in all_vectors() {
            assert_eq!(
                Digest::of(vector.payload.as_bytes()).to_hex(),
                vector.digest,
                "vector '{}'",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_json() {
        let json = vectors_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), all_vectors().len());
        assert_eq!(parsed[0]["fields"][0][0], "Name");
    }
}
