use super::domain::{Answer, EvaluationSource, Question, ScoredAnswer};
use super::oracle::prompt::{build_prompt, estimate_cost, estimate_tokens};
use super::oracle::{AnswerOracle, HttpOracle, OracleSetupError};
use super::scoring::ScoringEngine;
use crate::config::OracleSettings;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Scored answers for one run plus the oracle spend, when the oracle took part.
#[derive(Debug, Clone)]
pub struct ScoringRun {
    pub scored_answers: Vec<ScoredAnswer>,
    pub cost_estimate: Option<f64>,
    pub oracle_used: bool,
}

/// Chooses between the heuristic and an oracle, falling back per answer.
#[derive(Clone)]
pub struct Scorer {
    heuristic: ScoringEngine,
    oracle: Option<Arc<dyn AnswerOracle>>,
    call_delay: Duration,
}

impl Scorer {
    pub fn heuristic() -> Self {
        Self {
            heuristic: ScoringEngine::new(),
            oracle: None,
            call_delay: Duration::ZERO,
        }
    }

    pub fn with_oracle(oracle: Arc<dyn AnswerOracle>, call_delay: Duration) -> Self {
        Self {
            heuristic: ScoringEngine::new(),
            oracle: Some(oracle),
            call_delay,
        }
    }

    /// Heuristic-only unless the settings carry an enabled provider and key.
    pub fn from_settings(settings: &OracleSettings) -> Result<Self, OracleSetupError> {
        if !settings.is_active() {
            return Ok(Self::heuristic());
        }
        let oracle = HttpOracle::new(settings)?;
        Ok(Self::with_oracle(Arc::new(oracle), settings.call_delay))
    }

    pub fn oracle_enabled(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn oracle_name(&self) -> Option<&'static str> {
        self.oracle.as_ref().map(|oracle| oracle.name())
    }

    pub async fn score(&self, question: &Question, answer: &Answer) -> ScoredAnswer {
        if let Some(oracle) = &self.oracle {
            match oracle.evaluate(question, answer).await {
                Ok(evaluation) => {
                    return ScoredAnswer::new(
                        question,
                        answer,
                        evaluation,
                        EvaluationSource::Oracle,
                    )
                }
                Err(err) => warn!(
                    question = %question.id,
                    oracle = oracle.name(),
                    error = %err,
                    "oracle evaluation failed, using heuristic"
                ),
            }
        }
        let evaluation = self.heuristic.score(question, answer);
        ScoredAnswer::new(question, answer, evaluation, EvaluationSource::Heuristic)
    }

    /// Scores pairs in order, one oracle call at a time with a pause between calls.
    pub async fn score_all(&self, pairs: &[(&Question, &Answer)]) -> ScoringRun {
        let mut scored_answers = Vec::with_capacity(pairs.len());
        let mut total_tokens = 0u64;

        for (index, (question, answer)) in pairs.iter().enumerate() {
            if self.oracle.is_some() {
                if index > 0 && !self.call_delay.is_zero() {
                    tokio::time::sleep(self.call_delay).await;
                }
                total_tokens += estimate_tokens(&build_prompt(question, answer));
            }
            let scored = self.score(question, answer).await;
            debug!(
                question = %scored.question_id,
                score = scored.score,
                source = ?scored.source,
                "answer scored"
            );
            scored_answers.push(scored);
        }

        let cost_estimate = self
            .oracle
            .as_ref()
            .map(|oracle| estimate_cost(total_tokens, oracle.cost_per_million()));

        ScoringRun {
            scored_answers,
            cost_estimate,
            oracle_used: self.oracle.is_some(),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("oracle", &self.oracle_name())
            .field("call_delay", &self.call_delay)
            .finish()
    }
}
