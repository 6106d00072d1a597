//! Adaptive retrieval fallback agent
//!
//! Runs one user turn through the fallback policy: greeting short-circuit,
//! evidence retrieval and scoring, an optional broadened re-retrieval, domain
//! classification, then answer synthesis from the store or the web followed by
//! verification. External failures never escape [`FallbackAgent::handle`]; they
//! become a declined outcome.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::guard::guarded;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::evidence::{join_evidence, EvidenceItem, KnowledgeSource};
use crate::domain::policy::{
    accept_verdict, route, ConfirmationReply, DeclineReason, Decision, PolicyConfig,
    PolicyOutcome, PolicyRequest, PolicySignals, Provenance, Route, SessionState,
};
use crate::domain::query::{is_greeting, is_numeric_query, parse_reference_date};
use crate::domain::retrieval::{ConfidenceScorer, KeywordConfidenceScorer};
use crate::domain::synthesis::{AnswerSource, AnswerSynthesizer};
use crate::domain::verification::Verifier;
use crate::domain::web_search::WebSearchProvider;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_decision;
use crate::infrastructure::retrieval::DomainClassifier;

/// Fallback policy agent shared by every session
#[derive(Debug)]
pub struct FallbackAgent {
    config: PolicyConfig,
    source: Option<KnowledgeSource>,
    scorer: Arc<dyn ConfidenceScorer>,
    classifier: DomainClassifier,
    synthesizer: Arc<dyn AnswerSynthesizer>,
    verifier: Arc<dyn Verifier>,
    web_search: Arc<dyn WebSearchProvider>,
}

impl FallbackAgent {
    pub fn new(
        config: PolicyConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        synthesizer: Arc<dyn AnswerSynthesizer>,
        verifier: Arc<dyn Verifier>,
        web_search: Arc<dyn WebSearchProvider>,
    ) -> Self {
        Self {
            config,
            source: None,
            scorer: Arc::new(KeywordConfidenceScorer::new()),
            classifier: DomainClassifier::new(embedder),
            synthesizer,
            verifier,
            web_search,
        }
    }

    pub fn with_source(mut self, source: KnowledgeSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn ConfidenceScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&KnowledgeSource> {
        self.source.as_ref()
    }

    /// Whether a non-empty evidence source is loaded
    pub async fn is_ready(&self) -> bool {
        match &self.source {
            Some(source) => source.store().passage_count().await > 0,
            None => false,
        }
    }

    /// Handle one user turn and return the updated session state
    pub async fn handle(
        &self,
        session: SessionState,
        request: &PolicyRequest,
    ) -> (SessionState, PolicyOutcome) {
        let started = Instant::now();
        let now = Utc::now();

        let mut session = session;
        session.begin_turn();

        let outcome = self.handle_turn(&mut session, request, now).await;

        record_decision(outcome.decision, started.elapsed());
        info!(
            decision = %outcome.decision,
            reason = ?outcome.decline_reason,
            turn = session.turn(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Policy decision"
        );

        (session, outcome)
    }

    async fn handle_turn(
        &self,
        session: &mut SessionState,
        request: &PolicyRequest,
        now: DateTime<Utc>,
    ) -> PolicyOutcome {
        if session.is_awaiting_confirmation() {
            let pending = session
                .pending_confirmation(now, self.config.confirmation_ttl_secs)
                .map(str::to_string);

            match pending {
                Some(pending_query) => {
                    match ConfirmationReply::resolve(request.confirm_web_search, &request.query) {
                        ConfirmationReply::Affirm => {
                            session.begin_search(&pending_query);
                            let outcome = self.confirmed_web_search(&pending_query).await;
                            session.reset();
                            return outcome;
                        }
                        ConfirmationReply::Deny => {
                            session.reset();
                            return PolicyOutcome::decline(
                                DeclineReason::ConfirmationDeclined,
                                PolicySignals::default(),
                            );
                        }
                        ConfirmationReply::Unrelated => {
                            debug!("Reply unrelated to pending confirmation, treating as new query");
                            session.reset();
                        }
                    }
                }
                None => {
                    debug!("Pending confirmation expired");
                    session.reset();

                    // A bare yes/no answers the stale offer; it is not a new question
                    if ConfirmationReply::parse(&request.query) != ConfirmationReply::Unrelated {
                        return PolicyOutcome::decline(
                            DeclineReason::ConfirmationExpired,
                            PolicySignals::default(),
                        );
                    }
                }
            }
        }

        if ConfirmationReply::parse(&request.query) != ConfirmationReply::Unrelated {
            return PolicyOutcome::decline(
                DeclineReason::NoPendingConfirmation,
                PolicySignals::default(),
            );
        }

        let query = request.query.trim();
        if query.is_empty() {
            return PolicyOutcome::decline_with_message(
                DeclineReason::InvalidInput,
                "Query cannot be empty.",
                PolicySignals::default(),
            );
        }

        if is_greeting(query) {
            return PolicyOutcome::greeting(self.config.greeting_response.clone());
        }

        let reference_date = match request.reference_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_reference_date(raw, now.date_naive()) {
                Ok(date) => Some(date),
                Err(e) => {
                    return PolicyOutcome::decline_with_message(
                        DeclineReason::InvalidInput,
                        validation_message(e),
                        PolicySignals::default(),
                    );
                }
            },
            _ => None,
        };

        let retrieval_query = with_reference_date(query, reference_date);
        let mut signals = PolicySignals {
            numeric: is_numeric_query(&retrieval_query),
            ..PolicySignals::default()
        };

        let Some(source) = &self.source else {
            return PolicyOutcome::decline(DeclineReason::NoEvidenceSource, signals);
        };

        if source.store().passage_count().await == 0 {
            return PolicyOutcome::decline(DeclineReason::NoEvidenceSource, signals);
        }

        let outcome = match self.evaluate(source, &retrieval_query, &mut signals).await {
            Ok(outcome) => outcome,
            Err(e) => provider_failure(e, signals),
        };

        if outcome.decision == Decision::AskConfirm {
            session.await_confirmation(retrieval_query, now);
        }

        outcome
    }

    async fn evaluate(
        &self,
        source: &KnowledgeSource,
        query: &str,
        signals: &mut PolicySignals,
    ) -> Result<PolicyOutcome, DomainError> {
        let threshold = self.config.confidence_threshold;

        let mut evidence = self.search(source, query, self.config.top_k).await?;
        let mut confidence = self.scorer.score(query, &evidence);
        signals.confidence = Some(confidence);

        debug!(
            scorer = self.scorer.scorer_name(),
            %confidence,
            passages = evidence.len(),
            "Retrieval confidence"
        );

        if !confidence.meets(threshold) && self.config.broaden_retrieval {
            let broadened = self.config.broadened_query(query);
            evidence = self
                .search(source, &broadened, self.config.broadened_k())
                .await?;
            // Score against the original query so the appended phrase cannot inflate confidence
            confidence = self.scorer.score(query, &evidence);
            signals.confidence = Some(confidence);
            signals.broadened = true;

            debug!(%confidence, passages = evidence.len(), "Broadened retrieval confidence");
        }

        if !confidence.meets(threshold) {
            signals.domain_similarity = guarded(
                "domain_similarity",
                self.config.provider_timeout_secs,
                self.classifier.similarity(query, source.profile()),
            )
            .await?;

            debug!(similarity = ?signals.domain_similarity, "Domain similarity");
        }

        match route(
            confidence,
            signals.domain_similarity,
            signals.numeric,
            &self.config,
        ) {
            Route::Answer => self.answer_from_store(query, evidence, *signals).await,
            Route::WebSearch => {
                info!("In-domain numeric query without evidence, searching the web");
                self.web_answer(query, *signals).await
            }
            Route::AskConfirm => Ok(ask_confirm(source, *signals)),
            Route::NoRelevantData => Ok(PolicyOutcome::decline(
                DeclineReason::NoRelevantData,
                *signals,
            )),
        }
    }

    async fn search(
        &self,
        source: &KnowledgeSource,
        query: &str,
        k: usize,
    ) -> Result<Vec<EvidenceItem>, DomainError> {
        guarded(
            "evidence_search",
            self.config.provider_timeout_secs,
            source.store().search(query, k),
        )
        .await
    }

    async fn answer_from_store(
        &self,
        query: &str,
        evidence: Vec<EvidenceItem>,
        signals: PolicySignals,
    ) -> Result<PolicyOutcome, DomainError> {
        let context = join_evidence(&evidence);

        let answer = if signals.numeric {
            match self.extract_numeric(query, &context).await? {
                Some(value) => value,
                None => return Ok(PolicyOutcome::decline(DeclineReason::NoNumericValue, signals)),
            }
        } else {
            guarded(
                "answer",
                self.config.provider_timeout_secs,
                self.synthesizer
                    .answer(query, &context, AnswerSource::EvidenceStore),
            )
            .await?
        };

        let verdict = self.verifier.verify(query, &answer, &context).await;

        if !accept_verdict(verdict, signals.numeric, self.config.accept_weak_verdicts) {
            warn!(%verdict, "Store answer not supported by evidence, declining");
            return Ok(PolicyOutcome::decline(DeclineReason::Unverifiable, signals)
                .with_verdict(verdict)
                .with_evidence(evidence));
        }

        let decision = if signals.broadened {
            Decision::RetryBroader
        } else {
            Decision::AnswerFromStore
        };

        Ok(PolicyOutcome::new(decision, answer, signals)
            .with_provenance(Provenance::EvidenceStore)
            .with_verdict(verdict)
            .with_evidence(evidence))
    }

    async fn confirmed_web_search(&self, query: &str) -> PolicyOutcome {
        info!("Web search confirmed by user");

        let signals = PolicySignals {
            numeric: is_numeric_query(query),
            ..PolicySignals::default()
        };

        match self.web_answer(query, signals).await {
            Ok(outcome) => outcome,
            Err(e) => provider_failure(e, signals),
        }
    }

    /// Exactly one web search call; the verdict annotates but never downgrades
    async fn web_answer(
        &self,
        query: &str,
        signals: PolicySignals,
    ) -> Result<PolicyOutcome, DomainError> {
        let results = guarded(
            "web_search",
            self.config.web_search_timeout_secs,
            self.web_search.search(query),
        )
        .await?;

        if results.is_empty() {
            return Ok(PolicyOutcome::decline(DeclineReason::NoWebResults, signals));
        }

        let context = results.context();

        let answer = if signals.numeric {
            match self.extract_numeric(query, &context).await? {
                Some(value) => value,
                None => return Ok(PolicyOutcome::decline(DeclineReason::NoWebResults, signals)),
            }
        } else {
            guarded(
                "answer",
                self.config.provider_timeout_secs,
                self.synthesizer.answer(query, &context, AnswerSource::Web),
            )
            .await?
        };

        let verdict = self.verifier.verify(query, &answer, &context).await;

        let provenance = Provenance::Web {
            link: results.primary_link().map(str::to_string),
        };

        Ok(PolicyOutcome::new(Decision::WebFallback, answer, signals)
            .with_provenance(provenance)
            .with_verdict(verdict))
    }

    async fn extract_numeric(
        &self,
        query: &str,
        context: &str,
    ) -> Result<Option<String>, DomainError> {
        guarded(
            "extract_numeric",
            self.config.provider_timeout_secs,
            self.synthesizer.extract_numeric(query, context),
        )
        .await
    }
}

fn with_reference_date(query: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{} on {}", query, date.format("%Y-%m-%d")),
        None => query.to_string(),
    }
}

fn validation_message(error: DomainError) -> String {
    match error {
        DomainError::Validation { message } => message,
        other => other.to_string(),
    }
}

fn provider_failure(error: DomainError, signals: PolicySignals) -> PolicyOutcome {
    PolicyOutcome::decline_with_message(
        DeclineReason::ProviderFailure,
        format!(
            "{} ({})",
            DeclineReason::ProviderFailure.default_message(),
            error
        ),
        signals,
    )
}

fn ask_confirm(source: &KnowledgeSource, signals: PolicySignals) -> PolicyOutcome {
    let domain = source
        .profile()
        .map(|p| format!(" (it covers: {})", p.summary()))
        .unwrap_or_default();

    PolicyOutcome::new(
        Decision::AskConfirm,
        format!(
            "This question does not seem to be covered by the loaded data{}. \
             Reply 'yes' to search the web, or ask something else.",
            domain
        ),
        signals,
    )
}
