//! Verdict synthesis: prompt construction, completion call, response parsing.
//!
//! Two failure kinds are kept apart. A completion service that cannot be reached or does
//! not answer in time is a hard [`SynthesisError::Unavailable`]. A service that answers
//! with text that does not decode is a soft outcome: [`ParsedCompletion::Unparseable`],
//! reported to callers as [`Verdict::Unverifiable`] with the reasoning
//! [`UNPARSEABLE_REASONING`](crate::constants::UNPARSEABLE_REASONING).

pub mod error;
pub mod parse;
pub mod prompt;
pub mod synthesizer;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SynthesisError;
pub use parse::{normalize_verdict, parse_completion};
pub use prompt::build_prompt;
pub use synthesizer::VerdictSynthesizer;
pub use types::{Judgment, ParsedCompletion, Verdict};
