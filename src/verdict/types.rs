use serde::{Deserialize, Serialize};

use crate::constants::UNPARSEABLE_REASONING;

/// Categorical outcome of a fact check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Likely False")]
    LikelyFalse,
    #[serde(rename = "Unverifiable")]
    Unverifiable,
}

impl Verdict {
    /// Human-readable label, also the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyTrue => "Likely True",
            Verdict::LikelyFalse => "Likely False",
            Verdict::Unverifiable => "Unverifiable",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verdict with its justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgment {
    pub verdict: Verdict,
    pub reasoning: String,
}

impl Judgment {
    /// The degraded judgment used when completion text cannot be decoded.
    pub fn unparseable() -> Self {
        Self {
            verdict: Verdict::Unverifiable,
            reasoning: UNPARSEABLE_REASONING.to_string(),
        }
    }
}

/// Completion text decoded into the expected shape, or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCompletion {
    Parsed { verdict: Verdict, reasoning: String },
    Unparseable,
}

impl ParsedCompletion {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedCompletion::Parsed { .. })
    }

    /// Applies the degrade policy: `Unparseable` becomes an `Unverifiable` judgment.
    pub fn into_judgment(self) -> Judgment {
        match self {
            ParsedCompletion::Parsed { verdict, reasoning } => Judgment { verdict, reasoning },
            ParsedCompletion::Unparseable => Judgment::unparseable(),
        }
    }
}
