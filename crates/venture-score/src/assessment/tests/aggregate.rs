use super::common::*;
use crate::assessment::aggregate::{percentage, summarize, totals, ScoreBand};
use crate::assessment::domain::{AssessmentSubject, ScoreCategory};

fn subject() -> AssessmentSubject {
    AssessmentSubject {
        startup_name: "Acme".to_string(),
        industry: "Fintech".to_string(),
    }
}

#[test]
fn category_boundaries_follow_half_open_bands() {
    assert_eq!(ScoreCategory::from_score(49), ScoreCategory::Red);
    assert_eq!(ScoreCategory::from_score(50), ScoreCategory::Yellow);
    assert_eq!(ScoreCategory::from_score(74), ScoreCategory::Yellow);
    assert_eq!(ScoreCategory::from_score(75), ScoreCategory::Green);
    assert_eq!(ScoreBand::from_score(75), ScoreBand::Strong);
    assert_eq!(ScoreBand::from_score(49), ScoreBand::Weak);
}

#[test]
fn final_score_ignores_answer_order() {
    let answers = vec![
        scored("q1", "Business Model", 5, 9),
        scored("q2", "Vision", 5, 4),
        scored("fin1", "Compliance", 3, 7),
        scored("fin2", "Market", 3, 2),
    ];
    let mut reversed = answers.clone();
    reversed.reverse();

    assert_eq!(totals(&answers).final_score, totals(&reversed).final_score);
    // (45 + 20 + 21 + 6) / (50 + 50 + 30 + 30) = 92 / 160
    assert_eq!(totals(&answers).final_score, 58);
}

#[test]
fn final_score_stays_within_percent_range() {
    for low in 1..=10u8 {
        for high in 1..=10u8 {
            let answers = vec![
                scored("q1", "Vision", 5, low),
                scored("saas1", "Product", 3, high),
            ];
            let score = totals(&answers).final_score;
            assert!(score <= 100, "{low}/{high} gave {score}");
        }
    }
    assert_eq!(totals(&[scored("q1", "Vision", 5, 10)]).final_score, 100);
    assert_eq!(totals(&[scored("q1", "Vision", 5, 1)]).final_score, 10);
    assert_eq!(percentage(0, 0), 0);
}

#[test]
fn category_summaries_keep_first_appearance_order() {
    let answers = vec![
        scored("q1", "Vision", 5, 6),
        scored("q2", "Market", 5, 8),
        scored("q3", "Vision", 5, 10),
    ];
    let summaries = totals(&answers).category_summaries;
    let names: Vec<&str> = summaries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Vision", "Market"]);
    assert_eq!(summaries["Vision"].avg_score_pct, 80);
    assert_eq!(summaries["Vision"].total_weighted, 80);
    assert_eq!(summaries["Vision"].max_weighted, 100);
}

#[test]
fn red_flags_accumulate_in_rule_order() {
    let answers = vec![
        scored("q1", "Business Model", 5, 3),
        scored("q2", "Vision", 5, 4),
        scored("q5", "Traction", 5, 2),
        scored("q6", "Team", 5, 4),
        scored("q7", "Competition", 5, 8),
    ];
    let result = summarize(subject(), answers, None, false);

    assert_eq!(
        result.red_flags,
        vec![
            "Multiple responses lack detail and specificity",
            "Unclear revenue model or traction metrics",
            "Team composition or experience concerns",
            "Overall assessment indicates high investment risk",
        ]
    );
    assert!(result.executive_summary.ends_with(
        "Primary concerns: Multiple responses lack detail and specificity, Unclear revenue model or traction metrics."
    ));
}

#[test]
fn three_weak_answers_are_tolerated() {
    let answers = vec![
        scored("q1", "Vision", 5, 4),
        scored("q2", "Vision", 5, 4),
        scored("q3", "Vision", 5, 4),
        scored("q4", "Vision", 5, 10),
        scored("q7", "Vision", 5, 10),
        scored("q8", "Vision", 5, 10),
    ];
    let result = summarize(subject(), answers, None, false);
    assert!(result.red_flags.is_empty(), "{:?}", result.red_flags);
}

#[test]
fn strong_results_produce_clean_summary() {
    let answers = vec![
        scored("q1", "Business Model", 5, 8),
        scored("q2", "Vision", 5, 9),
        scored("fin1", "Compliance", 3, 9),
    ];
    let result = summarize(subject(), answers, Some(0.0012), true);

    assert_eq!(result.final_score, 86);
    assert_eq!(result.score_category, ScoreCategory::Green);
    assert_eq!(
        result.executive_summary,
        "This startup received a 86/100 score (Green category). The company shows strong potential with detailed responses and clear execution plans. Key strengths include responses in Vision. No major red flags identified."
    );
    assert_eq!(result.cost_estimate, Some(0.0012));
}

#[test]
fn strongest_category_prefers_earliest_on_ties() {
    let answers = vec![
        scored("q1", "Market", 5, 7),
        scored("q2", "Team", 5, 7),
    ];
    let result = summarize(subject(), answers, None, false);
    assert!(result
        .executive_summary
        .contains("Key strengths include responses in Market."));
}
