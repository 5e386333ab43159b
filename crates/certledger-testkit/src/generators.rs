//! Proptest generators for property-based testing.

use proptest::prelude::*;

use certledger_core::{Digest, FieldKey, RawFields};

/// Every accepted spelling of each key, before case and separator games.
pub fn aliases(key: FieldKey) -> &'static [&'static str] {
    match key {
        FieldKey::Name => &["name", "student name"],
        FieldKey::Dob => &["dob", "date of birth"],
        FieldKey::EnrollmentNo => &["enrollment no", "enrollment number"],
        FieldKey::Course => &["course", "program"],
        FieldKey::Branch => &["branch", "specialization"],
        FieldKey::Date => &["date"],
        FieldKey::StatementNo => &["statement no", "statement number"],
        FieldKey::Semester => &["semester", "sem"],
        FieldKey::University => &["university"],
    }
}

/// Generate a canonical field key.
pub fn field_key() -> impl Strategy<Value = FieldKey> {
    prop::sample::select(FieldKey::ALL.to_vec())
}

/// Generate a label that normalizes to `key`: any alias, any casing,
/// spaces or underscores between words, optional surrounding whitespace.
pub fn label_for(key: FieldKey) -> impl Strategy<Value = String> {
    (
        prop::sample::select(aliases(key).to_vec()),
        prop::collection::vec(any::<bool>(), 32),
        any::<bool>(),
        "[ \t]{0,2}",
    )
        .prop_map(|(alias, upper, underscores, pad)| {
            let word_sep = if underscores { '_' } else { ' ' };
            let body: String = alias
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| match c {
                    ' ' => word_sep,
                    c if up => c.to_ascii_uppercase(),
                    c => c,
                })
                .collect();
            format!("{pad}{body}{pad}")
        })
}

/// Generate a field value that survives trimming.
pub fn field_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,'-]{0,23}[A-Za-z0-9.]?".prop_map(String::from)
}

/// Generate a value with non-ASCII text, exercising `\u` escaping.
pub fn unicode_value() -> impl Strategy<Value = String> {
    "[a-z]{1,4}[\u{e0}-\u{ff}\u{4e00}-\u{4e2f}\u{1f393}]{1,4}".prop_map(String::from)
}

/// A certificate as a set of distinct known keys with values.
#[derive(Debug, Clone)]
pub struct CertificateParams {
    pub fields: Vec<(FieldKey, String)>,
}

impl Arbitrary for CertificateParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::subsequence(FieldKey::ALL.to_vec(), 1..=FieldKey::ALL.len())
            .prop_flat_map(|keys| {
                let n = keys.len();
                (
                    Just(keys),
                    prop::collection::vec(prop_oneof![4 => field_value(), 1 => unicode_value()], n),
                )
            })
            .prop_map(|(keys, values)| CertificateParams {
                fields: keys.into_iter().zip(values).collect(),
            })
            .boxed()
    }
}

/// Generate one extraction of `params`: random label spellings, random order.
pub fn raw_fields_for(params: &CertificateParams) -> impl Strategy<Value = RawFields> {
    params
        .fields
        .iter()
        .map(|(key, value)| {
            let value = value.clone();
            label_for(*key).prop_map(move |label| (label, value.clone()))
        })
        .collect::<Vec<_>>()
        .prop_shuffle()
        .prop_map(|pairs| pairs.into_iter().collect::<RawFields>())
}

/// Generate a random digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}
