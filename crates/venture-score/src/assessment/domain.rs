use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog questions (`q1`, `saas3`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fixed prompt presented to the founder, weighted within its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: &'static str,
    pub category: &'static str,
    pub weight: u32,
}

/// Free-text response to a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    pub text: String,
}

impl Answer {
    pub fn new(question_id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            text: text.into(),
        }
    }
}

/// Judgment for one answer, produced by the heuristic or the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub feedback: String,
    pub reasoning: String,
}

impl Evaluation {
    pub const MIN_SCORE: u8 = 1;
    pub const MAX_SCORE: u8 = 10;

    /// Builds an evaluation with the score forced into the 1..=10 band.
    pub fn clamped(score: i64, feedback: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let score = score.clamp(i64::from(Self::MIN_SCORE), i64::from(Self::MAX_SCORE)) as u8;
        Self {
            score,
            feedback: feedback.into(),
            reasoning: reasoning.into(),
        }
    }
}

/// Which scorer produced a [`ScoredAnswer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationSource {
    Heuristic,
    Oracle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAnswer {
    pub question_id: QuestionId,
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "answer")]
    pub answer_text: String,
    pub score: u8,
    pub weight: u32,
    pub weighted_score: u32,
    pub category: String,
    pub feedback: String,
    pub reasoning: String,
    pub source: EvaluationSource,
}

impl ScoredAnswer {
    pub fn new(
        question: &Question,
        answer: &Answer,
        evaluation: Evaluation,
        source: EvaluationSource,
    ) -> Self {
        let score = evaluation
            .score
            .clamp(Evaluation::MIN_SCORE, Evaluation::MAX_SCORE);
        Self {
            question_id: question.id.clone(),
            question_text: question.text.to_string(),
            answer_text: answer.text.clone(),
            score,
            weight: question.weight,
            weighted_score: u32::from(score) * question.weight,
            category: question.category.to_string(),
            feedback: evaluation.feedback,
            reasoning: evaluation.reasoning,
            source,
        }
    }

    pub fn max_weighted(&self) -> u32 {
        u32::from(Evaluation::MAX_SCORE) * self.weight
    }
}

/// Traffic-light banding of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    Red,
    Yellow,
    Green,
}

impl ScoreCategory {
    pub const fn from_score(score: u8) -> Self {
        if score < 50 {
            Self::Red
        } else if score < 75 {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(rename = "avgScore")]
    pub avg_score_pct: u8,
    pub total_weighted: u32,
    pub max_weighted: u32,
}

/// Who is being assessed, as shown on the report banner and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubject {
    pub startup_name: String,
    pub industry: String,
}

/// Aggregate outcome for one submitted questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub subject: AssessmentSubject,
    pub scored_answers: Vec<ScoredAnswer>,
    pub final_score: u8,
    pub score_category: ScoreCategory,
    pub category_summaries: IndexMap<String, CategorySummary>,
    pub red_flags: Vec<String>,
    pub executive_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<f64>,
    pub oracle_used: bool,
}

impl AssessmentResult {
    pub fn oracle_scored_count(&self) -> usize {
        self.scored_answers
            .iter()
            .filter(|answer| answer.source == EvaluationSource::Oracle)
            .count()
    }
}
