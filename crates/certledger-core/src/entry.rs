//! Ledger entries: the persisted record of one issuance.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::Signature;
use crate::error::CoreError;
use crate::types::Digest;

/// One issued certificate.
///
/// The signature stays in its hex wire form until it is needed, so a single
/// damaged signature cannot make the rest of the ledger unreadable. The hash
/// is the lookup key and is decoded on load; a malformed hash makes the whole
/// ledger fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub university: String,
    pub hash: Digest,
    /// Hex-encoded signature bytes.
    pub signature: String,
    /// ISO-8601 issuance time.
    pub timestamp: String,
}

impl LedgerEntry {
    pub fn new(
        university: impl Into<String>,
        hash: Digest,
        signature: &Signature,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            university: university.into(),
            hash,
            signature: signature.to_hex(),
            timestamp: format_timestamp(issued_at),
        }
    }

    /// Decode the stored signature.
    pub fn decode_signature(&self) -> Result<Signature, CoreError> {
        Signature::from_hex(&self.signature)
    }

    /// Parse the timestamp. Offset-less timestamps are read as UTC.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// RFC 3339 with microsecond precision and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> LedgerEntry {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        LedgerEntry::new(
            "Gujarat Technological University",
            Digest::from_bytes([0x11; 32]),
            &Signature::from_bytes(vec![0xab, 0xcd]),
            ts,
        )
    }

    #[test]
    fn test_entry_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["university"], "Gujarat Technological University");
        assert_eq!(json["hash"], "11".repeat(32));
        assert_eq!(json["signature"], "abcd");
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00.000000Z");
    }

    #[test]
    fn test_decode_signature() {
        let mut entry = sample();
        assert_eq!(entry.decode_signature().unwrap().as_bytes(), &[0xab, 0xcd]);

        entry.signature = "not hex".into();
        assert!(matches!(
            entry.decode_signature(),
            Err(CoreError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_issued_at_accepts_naive_iso() {
        let mut entry = sample();
        assert!(entry.issued_at().is_some());

        entry.timestamp = "2025-09-20T14:03:11.482913".into();
        let ts = entry.issued_at().unwrap();
        assert_eq!(format_timestamp(ts), "2025-09-20T14:03:11.482913Z");

        entry.timestamp = "yesterday".into();
        assert!(entry.issued_at().is_none());
    }
}
