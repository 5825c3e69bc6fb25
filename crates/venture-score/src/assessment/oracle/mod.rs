//! Delegated answer scoring through hosted completion providers.

mod catalog;
mod client;
pub mod prompt;
mod providers;

pub use catalog::{ModelSpec, ProviderKind};
pub use client::{HttpOracle, OracleSetupError};

use crate::assessment::domain::{Answer, Evaluation, Question};
use async_trait::async_trait;
use thiserror::Error;

/// Why a single oracle call produced no evaluation. Callers fall back to the heuristic.
#[derive(Debug, Error)]
pub enum OracleUnavailable {
    #[error("provider rejected the credential (HTTP 401)")]
    InvalidCredential,
    #[error("provider quota exceeded (HTTP 429)")]
    QuotaExceeded,
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },
    #[error("provider unreachable: {0}")]
    Transport(String),
    #[error("provider response malformed: {0}")]
    MalformedResponse(String),
    #[error("provider response missing '{0}'")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for OracleUnavailable {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
pub trait AnswerOracle: Send + Sync {
    fn name(&self) -> &'static str;

    /// Price per million input tokens, used for the run's cost estimate.
    fn cost_per_million(&self) -> f64;

    async fn evaluate(
        &self,
        question: &Question,
        answer: &Answer,
    ) -> Result<Evaluation, OracleUnavailable>;
}
