use super::domain::{AssessmentResult, CategorySummary, ScoreCategory, ScoredAnswer};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("assessment export could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("assessment export could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Portable JSON snapshot of an assessment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentExport {
    pub timestamp: DateTime<Utc>,
    pub startup_name: String,
    pub industry: String,
    pub final_score: u8,
    pub score_category: ScoreCategory,
    pub executive_summary: String,
    pub category_summaries: IndexMap<String, CategorySummary>,
    pub red_flags: Vec<String>,
    pub responses: Vec<ScoredAnswer>,
    pub ai_powered: bool,
    pub ai_cost: Option<f64>,
}

impl AssessmentExport {
    pub fn from_result(result: &AssessmentResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            startup_name: result.subject.startup_name.clone(),
            industry: result.subject.industry.clone(),
            final_score: result.final_score,
            score_category: result.score_category,
            executive_summary: result.executive_summary.clone(),
            category_summaries: result.category_summaries.clone(),
            red_flags: result.red_flags.clone(),
            responses: result.scored_answers.clone(),
            ai_powered: result.oracle_used,
            ai_cost: result.cost_estimate,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(ExportError::Encode)
    }

    pub fn from_json(raw: &str) -> Result<Self, ExportError> {
        serde_json::from_str(raw).map_err(ExportError::Decode)
    }

    pub fn file_name(&self) -> String {
        format!("venture-score-{}-data.json", file_safe_name(&self.startup_name))
    }
}

/// Replaces anything outside `[A-Za-z0-9]` with `_`; "Startup" when empty.
pub fn file_safe_name(name: &str) -> String {
    if name.is_empty() {
        return "Startup".to_string();
    }
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_replace_punctuation_and_spaces() {
        assert_eq!(file_safe_name("Acme Rockets, Inc."), "Acme_Rockets__Inc_");
        assert_eq!(file_safe_name(""), "Startup");
        assert_eq!(file_safe_name("Café"), "Caf_");
    }
}
