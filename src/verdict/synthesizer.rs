use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::completion::{CompletionError, CompletionService};
use crate::constants::DEFAULT_COMPLETION_TIMEOUT_SECS;

use super::error::SynthesisError;
use super::parse::parse_completion;
use super::prompt::build_prompt;
use super::types::{Judgment, ParsedCompletion};

/// Asks a completion service to adjudicate a claim against evidence.
pub struct VerdictSynthesizer<C> {
    service: C,
    timeout: Duration,
}

impl<C: CompletionService> VerdictSynthesizer<C> {
    pub fn new(service: C) -> Self {
        Self {
            service,
            timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
        }
    }

    /// Upper bound on one completion call; exceeding it is [`SynthesisError::Unavailable`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn service(&self) -> &C {
        &self.service
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the service's judgment of `claim`.
    ///
    /// Transport failures and timeouts are errors. Completion text that cannot be decoded
    /// is not: it yields an `Unverifiable` judgment with a fixed reasoning.
    #[instrument(skip_all, fields(model = self.service.model(), evidence = evidence.len()))]
    pub async fn synthesize<S: AsRef<str> + Sync>(
        &self,
        claim: &str,
        evidence: &[S],
    ) -> Result<Judgment, SynthesisError> {
        let prompt = build_prompt(claim, evidence);

        let text = tokio::time::timeout(self.timeout, self.service.complete(&prompt))
            .await
            .map_err(|_| CompletionError::Timeout {
                after: self.timeout,
            })??;

        let parsed = parse_completion(&text);
        if let ParsedCompletion::Unparseable = parsed {
            warn!(
                response_len = text.len(),
                "Completion response could not be parsed; degrading to Unverifiable"
            );
        }

        let judgment = parsed.into_judgment();
        debug!(verdict = %judgment.verdict, "Synthesized verdict");
        Ok(judgment)
    }
}
