//! Questionnaire, scoring and aggregation for startup pitch assessments.

pub mod aggregate;
pub mod catalog;
pub mod domain;
pub mod export;
pub mod import;
pub mod oracle;
pub mod scorer;
pub mod scoring;
pub mod session;

pub use aggregate::{summarize, ScoreBand};
pub use catalog::{general_questions, CatalogError, Industry, QuestionSet};
pub use domain::{
    Answer, AssessmentResult, AssessmentSubject, CategorySummary, Evaluation, EvaluationSource,
    Question, QuestionId, ScoreCategory, ScoredAnswer,
};
pub use export::{file_safe_name, AssessmentExport, ExportError};
pub use import::{AnswerImport, ImportError};
pub use oracle::{AnswerOracle, HttpOracle, OracleSetupError, OracleUnavailable, ProviderKind};
pub use scorer::{Scorer, ScoringRun};
pub use scoring::ScoringEngine;
pub use session::{AssessmentError, AssessmentSession, WizardStep, DEFAULT_STARTUP_NAME};

#[cfg(test)]
mod tests;
