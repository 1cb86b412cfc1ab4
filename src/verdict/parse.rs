use serde::Deserialize;

use super::types::{ParsedCompletion, Verdict};

#[derive(Debug, Deserialize)]
struct RawJudgment {
    verdict: String,
    reasoning: String,
}

/// Decodes completion text into a verdict and reasoning.
///
/// Takes the span from the first `{` to the last `}` inclusive and decodes it as an object
/// with string fields `verdict` and `reasoning`. Anything else, including missing braces,
/// invalid JSON and missing or non-string fields, is [`ParsedCompletion::Unparseable`].
pub fn parse_completion(text: &str) -> ParsedCompletion {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return ParsedCompletion::Unparseable;
    };
    if end < start {
        return ParsedCompletion::Unparseable;
    }

    match serde_json::from_str::<RawJudgment>(&text[start..=end]) {
        Ok(raw) => ParsedCompletion::Parsed {
            verdict: normalize_verdict(&raw.verdict),
            reasoning: raw.reasoning,
        },
        Err(_) => ParsedCompletion::Unparseable,
    }
}

/// Maps free-text verdict labels onto [`Verdict`]; unrecognized labels are `Unverifiable`.
///
/// Case, whitespace and punctuation are ignored, so `"Likely True"`, `"likely_true"` and
/// `"LIKELY-TRUE."` all map to [`Verdict::LikelyTrue`]. Bare `"true"`/`"false"` are accepted.
pub fn normalize_verdict(label: &str) -> Verdict {
    let key: String = label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    match key.as_str() {
        "likelytrue" | "true" => Verdict::LikelyTrue,
        "likelyfalse" | "false" => Verdict::LikelyFalse,
        _ => Verdict::Unverifiable,
    }
}
