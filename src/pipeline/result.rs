use serde::{Deserialize, Serialize};

use crate::verdict::Verdict;

/// Outcome of one fact check.
///
/// `confidence` is always the retrieval confidence measured for the claim, whether or not
/// the claim was adjudicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub verdict: Verdict,
    /// Evidence shown to the completion service, closest first. Empty when gated.
    pub evidence: Vec<String>,
    pub reasoning: String,
    pub confidence: f32,
}

impl CheckResult {
    /// Result for a claim whose retrieval confidence fell below the threshold.
    pub fn insufficient_evidence(confidence: f32) -> Self {
        Self {
            verdict: Verdict::Unverifiable,
            evidence: Vec::new(),
            reasoning: insufficient_evidence_reasoning(confidence),
            confidence,
        }
    }
}

/// Reasoning reported when the confidence gate rejects a claim.
pub fn insufficient_evidence_reasoning(confidence: f32) -> String {
    format!(
        "Insufficient relevant evidence found (confidence: {:.2}). Claim is too vague or outside knowledge base.",
        confidence
    )
}
