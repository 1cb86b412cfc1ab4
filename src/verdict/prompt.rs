/// Builds the adjudication prompt for `claim` against numbered `evidence` (1-based, in order).
///
/// The output is a pure function of its inputs.
pub fn build_prompt<S: AsRef<str>>(claim: &str, evidence: &[S]) -> String {
    let listing = evidence
        .iter()
        .enumerate()
        .map(|(i, fact)| format!("{}. {}", i + 1, fact.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a fact-checking assistant. Analyze the claim against the evidence and provide a verdict.

Claim: {claim}

Evidence:
{listing}

Based on the evidence, classify this claim as:
- "Likely True" if evidence strongly supports it
- "Likely False" if evidence contradicts it
- "Unverifiable" if evidence is insufficient

Respond in JSON format:
{{
  "verdict": "Likely True/Likely False/Unverifiable",
  "reasoning": "Brief explanation of your decision"
}}"#
    )
}
