//! The structured outcome of an issue or verify run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use certledger_core::{CanonicalPayload, Degradation, Digest, RawFields};

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    /// A new entry was signed and appended.
    Issued,
    /// The digest is in the ledger and its signature checks out.
    Verified,
    /// The digest was never issued, or its stored signature fails.
    Tampered,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Issued => f.write_str("Issued"),
            Verdict::Verified => f.write_str("Verified"),
            Verdict::Tampered => f.write_str("Tampered"),
        }
    }
}

/// A named stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Issue,
    HashCheck,
    SignatureVerification,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Issue => "issue",
            Step::HashCheck => "hash_check",
            Step::SignatureVerification => "signature_verification",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Done,
    Failed,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Done => f.write_str("done"),
            StepOutcome::Failed => f.write_str("failed"),
        }
    }
}

/// Everything a caller needs to report on a run.
///
/// `steps` only holds the stages that actually ran: an unknown digest stops
/// at `hash_check`, so `signature_verification` is absent.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// The fields as supplied. Empty for digest-only verification.
    pub extracted_fields: RawFields,
    /// Absent for digest-only verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_payload: Option<CanonicalPayload>,
    pub digest: Digest,
    pub steps: BTreeMap<Step, StepOutcome>,
    pub final_verdict: Verdict,
    pub message: String,
    /// Dates that did not match a known layout and were kept verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl PipelineResult {
    pub(crate) fn new(
        extracted_fields: RawFields,
        canonical_payload: Option<CanonicalPayload>,
        digest: Digest,
        degradations: Vec<Degradation>,
    ) -> Self {
        Self {
            extracted_fields,
            canonical_payload,
            digest,
            steps: BTreeMap::new(),
            // Overwritten by `finish`; every run ends in exactly one verdict.
            final_verdict: Verdict::Tampered,
            message: String::new(),
            degradations,
        }
    }

    pub(crate) fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.insert(step, outcome);
    }

    pub(crate) fn finish(mut self, verdict: Verdict, message: impl Into<String>) -> Self {
        self.final_verdict = verdict;
        self.message = message.into();
        self
    }

    /// Outcome of `step`, if it ran.
    pub fn step(&self, step: Step) -> Option<StepOutcome> {
        self.steps.get(&step).copied()
    }

    pub fn is_tampered(&self) -> bool {
        self.final_verdict == Verdict::Tampered
    }
}
