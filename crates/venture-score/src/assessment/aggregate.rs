use super::catalog::{TEAM_QUESTION, TRACTION_QUESTION};
use super::domain::{
    AssessmentResult, AssessmentSubject, CategorySummary, ScoreCategory, ScoredAnswer,
};
use indexmap::IndexMap;

/// Answers at or below this score count as weak for red-flag purposes.
pub(crate) const WEAK_ANSWER_SCORE: u8 = 4;
const WEAK_ANSWER_ALLOWANCE: usize = 3;
const HIGH_RISK_BELOW: u8 = 60;

/// Three-way banding shared by the summary, recommendation and next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::Strong
        } else if score >= 50 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

pub(crate) struct AssessmentTotals {
    pub final_score: u8,
    pub category_summaries: IndexMap<String, CategorySummary>,
}

/// Weighted percentage of the achievable score; exact halves round up.
pub(crate) fn percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let (total, max) = (u64::from(total), u64::from(max));
    ((total * 200 + max) / (max * 2)).min(100) as u8
}

pub(crate) fn totals(scored: &[ScoredAnswer]) -> AssessmentTotals {
    let total_weighted: u32 = scored.iter().map(|answer| answer.weighted_score).sum();
    let max_weighted: u32 = scored.iter().map(ScoredAnswer::max_weighted).sum();

    let mut category_summaries: IndexMap<String, CategorySummary> = IndexMap::new();
    for answer in scored {
        let entry = category_summaries
            .entry(answer.category.clone())
            .or_insert(CategorySummary {
                avg_score_pct: 0,
                total_weighted: 0,
                max_weighted: 0,
            });
        entry.total_weighted += answer.weighted_score;
        entry.max_weighted += answer.max_weighted();
    }
    for summary in category_summaries.values_mut() {
        summary.avg_score_pct = percentage(summary.total_weighted, summary.max_weighted);
    }

    AssessmentTotals {
        final_score: percentage(total_weighted, max_weighted),
        category_summaries,
    }
}

pub(crate) fn red_flags(scored: &[ScoredAnswer], final_score: u8) -> Vec<String> {
    let mut flags = Vec::new();

    let weak_answers = scored
        .iter()
        .filter(|answer| answer.score <= WEAK_ANSWER_SCORE)
        .count();
    if weak_answers > WEAK_ANSWER_ALLOWANCE {
        flags.push("Multiple responses lack detail and specificity".to_string());
    }

    let is_weak = |id: &str| {
        scored
            .iter()
            .any(|answer| answer.question_id.as_str() == id && answer.score <= WEAK_ANSWER_SCORE)
    };
    if is_weak(TRACTION_QUESTION) {
        flags.push("Unclear revenue model or traction metrics".to_string());
    }
    if is_weak(TEAM_QUESTION) {
        flags.push("Team composition or experience concerns".to_string());
    }

    if final_score < HIGH_RISK_BELOW {
        flags.push("Overall assessment indicates high investment risk".to_string());
    }

    flags
}

/// Category with the highest percentage; the earliest one wins ties.
pub(crate) fn strongest_category(summaries: &IndexMap<String, CategorySummary>) -> Option<&str> {
    let mut best: Option<(&str, u8)> = None;
    for (name, summary) in summaries {
        match best {
            Some((_, pct)) if pct >= summary.avg_score_pct => {}
            _ => best = Some((name.as_str(), summary.avg_score_pct)),
        }
    }
    best.map(|(name, _)| name)
}

pub(crate) fn executive_summary(
    final_score: u8,
    category: ScoreCategory,
    summaries: &IndexMap<String, CategorySummary>,
    flags: &[String],
) -> String {
    let outlook = match ScoreBand::from_score(final_score) {
        ScoreBand::Strong => {
            "The company shows strong potential with detailed responses and clear execution plans."
        }
        ScoreBand::Moderate => {
            "The company shows moderate potential but has areas that need improvement and clarification."
        }
        ScoreBand::Weak => {
            "The company faces significant challenges and requires substantial improvements before being investment-ready."
        }
    };

    let strengths = strongest_category(summaries).unwrap_or("no category");

    let concerns = if flags.is_empty() {
        "No major red flags identified.".to_string()
    } else {
        let top: Vec<&str> = flags.iter().take(2).map(String::as_str).collect();
        format!("Primary concerns: {}.", top.join(", "))
    };

    format!(
        "This startup received a {final_score}/100 score ({} category). {outlook} Key strengths include responses in {strengths}. {concerns}",
        category.label()
    )
}

/// Folds scored answers into the immutable assessment outcome.
pub fn summarize(
    subject: AssessmentSubject,
    scored_answers: Vec<ScoredAnswer>,
    cost_estimate: Option<f64>,
    oracle_used: bool,
) -> AssessmentResult {
    let AssessmentTotals {
        final_score,
        category_summaries,
    } = totals(&scored_answers);
    let score_category = ScoreCategory::from_score(final_score);
    let red_flags = red_flags(&scored_answers, final_score);
    let executive_summary =
        executive_summary(final_score, score_category, &category_summaries, &red_flags);

    AssessmentResult {
        subject,
        scored_answers,
        final_score,
        score_category,
        category_summaries,
        red_flags,
        executive_summary,
        cost_estimate,
        oracle_used,
    }
}
