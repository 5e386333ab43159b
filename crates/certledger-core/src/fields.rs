//! Certificate fields: raw OCR labels and their normalized form.
//!
//! The extraction step upstream gives no guarantees about label spelling,
//! casing or date format. Everything here is infallible: unknown labels pass
//! through, unparseable dates are kept verbatim and reported as a
//! [`Degradation`].

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of field names a certificate is known to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Name,
    Dob,
    EnrollmentNo,
    Course,
    Branch,
    Date,
    StatementNo,
    Semester,
    University,
}

/// Normalized label → canonical key.
///
/// Labels are matched after [`normalize_label`], so `"Date of Birth"` hits
/// the `date_of_birth` row.
const ALIASES: &[(&str, FieldKey)] = &[
    ("name", FieldKey::Name),
    ("student_name", FieldKey::Name),
    ("dob", FieldKey::Dob),
    ("date_of_birth", FieldKey::Dob),
    ("enrollment_no", FieldKey::EnrollmentNo),
    ("enrollment_number", FieldKey::EnrollmentNo),
    ("course", FieldKey::Course),
    ("program", FieldKey::Course),
    ("branch", FieldKey::Branch),
    ("specialization", FieldKey::Branch),
    ("date", FieldKey::Date),
    ("statement_no", FieldKey::StatementNo),
    ("statement_number", FieldKey::StatementNo),
    ("semester", FieldKey::Semester),
    ("sem", FieldKey::Semester),
    ("university", FieldKey::University),
];

/// An accepted date layout.
///
/// chrono's `%Y` takes a signed year of any width, so the year token is
/// checked for exactly four digits before the layout is tried.
struct DateLayout {
    format: &'static str,
    separator: char,
    year_index: usize,
}

/// Accepted date layouts, tried in order.
const DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout::new("%d/%m/%Y", '/', 2),
    DateLayout::new("%Y-%m-%d", '-', 0),
    DateLayout::new("%d-%m-%Y", '-', 2),
    DateLayout::new("%d %b %Y", ' ', 2),
];

impl DateLayout {
    const fn new(format: &'static str, separator: char, year_index: usize) -> Self {
        Self {
            format,
            separator,
            year_index,
        }
    }

    fn parse(&self, value: &str) -> Option<NaiveDate> {
        if !self.has_four_digit_year(value) {
            return None;
        }
        NaiveDate::parse_from_str(value, self.format).ok()
    }

    fn has_four_digit_year(&self, value: &str) -> bool {
        let tokens: Vec<&str> = if self.separator == ' ' {
            value.split_whitespace().collect()
        } else {
            value.split(self.separator).collect()
        };
        tokens.len() == 3 && {
            let year = tokens[self.year_index];
            year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

impl FieldKey {
    /// All known keys.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Name,
        FieldKey::Dob,
        FieldKey::EnrollmentNo,
        FieldKey::Course,
        FieldKey::Branch,
        FieldKey::Date,
        FieldKey::StatementNo,
        FieldKey::Semester,
        FieldKey::University,
    ];

    /// The canonical spelling used in payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Dob => "dob",
            FieldKey::EnrollmentNo => "enrollment_no",
            FieldKey::Course => "course",
            FieldKey::Branch => "branch",
            FieldKey::Date => "date",
            FieldKey::StatementNo => "statement_no",
            FieldKey::Semester => "semester",
            FieldKey::University => "university",
        }
    }

    /// Look up an already-normalized label in the alias table.
    pub fn from_alias(normalized: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, key)| *key)
    }

    /// Whether values of this field are reparsed as dates.
    pub const fn is_date(&self) -> bool {
        matches!(self, FieldKey::Dob | FieldKey::Date)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized field name: either a known key or a pass-through label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    Known(FieldKey),
    Other(String),
}

impl FieldName {
    /// Normalize a raw label and resolve it through the alias table.
    pub fn from_label(label: &str) -> Self {
        let normalized = normalize_label(label);
        match FieldKey::from_alias(&normalized) {
            Some(key) => FieldName::Known(key),
            None => FieldName::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldName::Known(key) => key.as_str(),
            FieldName::Other(s) => s,
        }
    }
}

/// Trim, lowercase and replace spaces with underscores.
///
/// Lowercasing uses Unicode case mapping and is locale-independent.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Reparse a date against the accepted layouts and render it as `YYYY-MM-DD`.
///
/// Returns `None` when no layout matches.
pub fn normalize_date(value: &str) -> Option<String> {
    let value = value.trim();
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(value))
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// A non-fatal loss of normalization: a date field that matched no layout
/// and was kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    pub field: FieldKey,
    pub value: String,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable date in {}: {:?}", self.field, self.value)
    }
}

/// Label → text pairs as produced by field extraction, in extraction order.
///
/// Order only matters when two labels normalize to the same key; the later
/// one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields(Vec<(String, String)>);

impl RawFields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a label/value pair.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.0.push((label.into(), value.into()));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw value of the first label matching `label` exactly.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == label).map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for RawFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Visits the map directly so document order survives deserialization.
impl<'de> Deserialize<'de> for RawFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawFieldsVisitor;

        impl<'de> Visitor<'de> for RawFieldsVisitor {
            type Value = RawFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field labels to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawFields, A::Error> {
                let mut fields = RawFields::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    fields.insert(k, v);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(RawFieldsVisitor)
    }
}

/// Normalized fields keyed by canonical name, iterated in ascending key order.
///
/// Every value is non-empty and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldRecord(BTreeMap<String, String>);

impl FieldRecord {
    /// Normalize raw extraction output.
    ///
    /// Returns the record together with any dates that could not be
    /// normalized.
    pub fn from_raw(raw: &RawFields) -> (Self, Vec<Degradation>) {
        let mut map = BTreeMap::new();
        let mut degradations = Vec::new();

        for (label, value) in raw.iter() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let name = FieldName::from_label(label);
            let value = match &name {
                FieldName::Known(key) if key.is_date() => match normalize_date(value) {
                    Some(date) => date,
                    None => {
                        tracing::warn!(field = %key, value, "date matched no known layout, keeping as-is");
                        degradations.push(Degradation {
                            field: *key,
                            value: value.to_string(),
                        });
                        value.to_string()
                    }
                },
                _ => value.to_string(),
            };

            if let Some(previous) = map.insert(name.as_str().to_string(), value) {
                tracing::debug!(key = name.as_str(), label, %previous, "label collapsed onto an existing key");
            }
        }

        // A key degraded earlier but overwritten by a later, parseable label
        // is no longer degraded.
        degradations.retain(|d| map.get(d.field.as_str()) == Some(&d.value));

        (Self(map), degradations)
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(key.as_str()).map(String::as_str)
    }

    /// Look up by canonical spelling, including pass-through keys.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
