use super::common::*;
use crate::assessment::domain::{Answer, EvaluationSource, ScoredAnswer};
use crate::assessment::scoring::ScoringEngine;

fn score(text: &str) -> u8 {
    ScoringEngine::new().score_text(text).score
}

#[test]
fn brief_answers_score_two_whatever_they_contain() {
    assert_eq!(score("$5M 20%"), 2);
    assert_eq!(score("   maybe   "), 2);
    assert_eq!(score(""), 2);
}

#[test]
fn hedging_outranks_detail_and_data() {
    assert_eq!(score("We might reach profitability next year."), 4);
    let hedged_but_rich = "We could probably double revenue to $2M with 40% more customers if the three partnership contracts we are negotiating close this spring as planned.";
    assert_eq!(score(hedged_but_rich), 4);
}

#[test]
fn hedging_matches_inside_longer_words() {
    assert_eq!(score("Our couldron recipe is unique."), 4);
}

#[test]
fn detailed_answers_with_markers_and_digits_score_nine() {
    let evaluation = ScoringEngine::new().score_text(DATA_RICH_ANSWER);
    assert_eq!(evaluation.score, 9);
    assert_eq!(
        evaluation.feedback,
        "Clear, detailed response with specific data and metrics."
    );
}

#[test]
fn detail_and_marker_without_digits_score_eight() {
    let text = "Our customers tell us the onboarding flow saves their finance teams several hours every single week, which drives steady revenue expansion across the accounts we serve today.";
    assert_eq!(score(text), 8);
}

#[test]
fn detail_without_markers_scores_seven() {
    let text = "We design modular furniture for small apartments and sell it directly through our own showrooms in three cities with a focus on durable materials.";
    assert_eq!(score(text), 7);
}

#[test]
fn short_answers_with_markers_score_six() {
    assert_eq!(score("Revenue doubled last quarter."), 6);
}

#[test]
fn plain_answer_is_average_and_weighted_by_question() {
    let question = question("q1", "Business Model", 5);
    let answer = Answer::new("q1", AVERAGE_ANSWER);
    let evaluation = ScoringEngine::new().score(&question, &answer);
    assert_eq!(evaluation.score, 5);
    assert_eq!(evaluation.feedback, "Average response with room for improvement.");

    let scored = ScoredAnswer::new(&question, &answer, evaluation, EvaluationSource::Heuristic);
    assert_eq!(scored.weighted_score, 25);
    assert_eq!(scored.max_weighted(), 50);
}
