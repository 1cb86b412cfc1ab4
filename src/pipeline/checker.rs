use tracing::{debug, info, instrument};

use crate::completion::CompletionService;
use crate::embedding::Embedder;
use crate::retrieval::Retriever;
use crate::verdict::VerdictSynthesizer;

use super::error::CheckError;
use super::options::CheckOptions;
use super::result::CheckResult;

/// End-to-end fact checker: retrieve, gate on confidence, adjudicate.
///
/// Holds no per-request state; one instance is shared by every request handler.
pub struct FactChecker<E, C> {
    retriever: Retriever<E>,
    synthesizer: VerdictSynthesizer<C>,
    defaults: CheckOptions,
}

impl<E, C> FactChecker<E, C>
where
    E: Embedder,
    C: CompletionService,
{
    pub fn new(retriever: Retriever<E>, synthesizer: VerdictSynthesizer<C>) -> Self {
        Self {
            retriever,
            synthesizer,
            defaults: CheckOptions::default(),
        }
    }

    /// Options used by [`check_with_defaults`](Self::check_with_defaults) and as the base
    /// for per-call overrides.
    pub fn with_defaults(mut self, defaults: CheckOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> CheckOptions {
        self.defaults
    }

    pub fn retriever(&self) -> &Retriever<E> {
        &self.retriever
    }

    pub fn synthesizer(&self) -> &VerdictSynthesizer<C> {
        &self.synthesizer
    }

    pub async fn check_with_defaults(&self, claim: &str) -> Result<CheckResult, CheckError> {
        self.check(claim, self.defaults).await
    }

    /// Checks `claim` against the fact index.
    ///
    /// Confidence and evidence come from one retrieval over one index snapshot. Below
    /// `options.threshold` the claim is reported `Unverifiable` with no evidence and the
    /// completion service is not called.
    #[instrument(skip(self, claim), fields(claim_len = claim.len(), top_k = options.top_k, threshold = options.threshold))]
    pub async fn check(
        &self,
        claim: &str,
        options: CheckOptions,
    ) -> Result<CheckResult, CheckError> {
        options.validate()?;

        let retrieval = self.retriever.retrieve(claim, options.top_k)?;
        let confidence = retrieval.confidence(self.retriever.calibration());

        if confidence < options.threshold {
            info!(confidence, "Confidence below threshold; skipping adjudication");
            return Ok(CheckResult::insufficient_evidence(confidence));
        }

        let evidence = retrieval.into_evidence();
        debug!(confidence, evidence = evidence.len(), "Adjudicating claim");

        let judgment = self.synthesizer.synthesize(claim, &evidence).await?;
        info!(verdict = %judgment.verdict, confidence, "Claim checked");

        Ok(CheckResult {
            verdict: judgment.verdict,
            evidence,
            reasoning: judgment.reasoning,
            confidence,
        })
    }
}
