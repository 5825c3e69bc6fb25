use super::common::*;
use crate::assessment::catalog::Industry;
use crate::assessment::domain::{EvaluationSource, QuestionId};
use crate::assessment::scorer::Scorer;
use crate::assessment::session::{AssessmentError, AssessmentSession, WizardStep};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn rejects_answers_to_questions_outside_the_set() {
    let mut session = AssessmentSession::new();
    let err = session
        .record_answer("fin1", "We hold an EMI licence.")
        .expect_err("fintech not selected yet");
    assert!(matches!(err, AssessmentError::UnknownQuestion(id) if id.as_str() == "fin1"));

    session.set_industries(&[Industry::Fintech]).expect("valid industries");
    session
        .record_answer("fin1", "We hold an EMI licence.")
        .expect("fintech question now asked");
}

#[test]
fn blank_answers_are_treated_as_absent() {
    let mut session = AssessmentSession::new();
    session.record_answer("q1", "Payroll for clinics").unwrap();
    session.record_answer("q1", "   ").unwrap();
    assert!(session.answers().is_empty());
}

#[test]
fn changing_industries_drops_orphaned_answers() {
    let mut session = AssessmentSession::new();
    session
        .set_industries(&[Industry::SaasB2b, Industry::Fintech])
        .unwrap();
    session.record_answer("q1", "Invoicing software").unwrap();
    session.record_answer("saas1", "Net revenue retention is 118%").unwrap();
    session.record_answer("fin1", "Licensed in two states").unwrap();

    session.set_industries(&[Industry::Fintech]).unwrap();

    assert!(session.answers().get(&QuestionId::from("saas1")).is_none());
    assert!(session.answers().get(&QuestionId::from("fin1")).is_some());
    assert!(session.answers().get(&QuestionId::from("q1")).is_some());
    assert_eq!(session.subject().industry, "Fintech");
}

#[test]
fn wizard_walks_pages_within_bounds() {
    let mut session = AssessmentSession::new();
    assert_eq!(session.previous(), WizardStep::General(0));
    assert_eq!(session.current_questions().len(), 4);

    assert_eq!(session.next().unwrap(), WizardStep::General(1));
    assert_eq!(session.current_questions().len(), 3);
    assert_eq!(session.next().unwrap(), WizardStep::General(2));
    assert_eq!(session.current_questions().len(), 4);
    assert_eq!(session.next().unwrap(), WizardStep::IndustrySelection);
    assert!(matches!(
        session.next(),
        Err(AssessmentError::NoIndustrySelected)
    ));

    session
        .set_industries(&[Industry::EdTech, Industry::Mobility])
        .unwrap();
    assert_eq!(session.next().unwrap(), WizardStep::Industry(0));
    let ids: Vec<&str> = session
        .current_questions()
        .iter()
        .map(|question| question.id.as_str())
        .collect();
    assert_eq!(ids, vec!["edu1", "edu2", "edu3", "edu4", "edu5"]);
    assert_eq!(session.next().unwrap(), WizardStep::Industry(1));
    assert_eq!(session.next().unwrap(), WizardStep::Submission);
    assert_eq!(session.next().unwrap(), WizardStep::Submission);
    assert_eq!(session.previous(), WizardStep::Industry(1));

    session.set_industries(&[Industry::EdTech]).unwrap();
    assert_eq!(session.step(), WizardStep::IndustrySelection);
}

#[test]
fn pairs_follow_catalog_order() {
    let mut session = AssessmentSession::new();
    session.record_answer("q3", "Clinics in the Midwest").unwrap();
    session.record_answer("q1", "Payroll for clinics").unwrap();
    let ids: Vec<&str> = session
        .pairs()
        .iter()
        .map(|(question, _)| question.id.as_str())
        .collect();
    assert_eq!(ids, vec!["q1", "q3"]);
}

#[tokio::test]
async fn submission_requires_an_answer() {
    let mut session = AssessmentSession::new();
    let err = session
        .assess(&Scorer::heuristic(), |_| panic!("no result expected"))
        .await
        .expect_err("empty sheet");
    assert!(matches!(err, AssessmentError::NoAnswers));
}

#[tokio::test]
async fn oracle_runs_need_a_core_answer() {
    let mut session = AssessmentSession::new();
    session.record_answer("q6", "Two repeat founders").unwrap();
    let oracle = Arc::new(ScriptedOracle::new(Vec::new()));
    let scorer = Scorer::with_oracle(oracle.clone(), Duration::ZERO);

    let err = session
        .assess(&scorer, |_| {})
        .await
        .expect_err("q1-q3 unanswered");
    assert!(matches!(err, AssessmentError::InsufficientForOracle));
    assert_eq!(oracle.calls(), 0);

    session
        .assess(&Scorer::heuristic(), |_| {})
        .await
        .expect("heuristic runs accept any answer");
}

#[tokio::test]
async fn heuristic_assessment_reports_through_callback() {
    let mut session = AssessmentSession::new();
    session.set_startup_name("  ");
    session.record_answer("q1", AVERAGE_ANSWER).unwrap();
    session.record_answer("q2", DATA_RICH_ANSWER).unwrap();

    let mut seen = None;
    let result = session
        .assess(&Scorer::heuristic(), |result| seen = Some(result.final_score))
        .await
        .expect("assessment completes");

    assert_eq!(seen, Some(result.final_score));
    assert_eq!(session.step(), WizardStep::Results);
    assert_eq!(result.subject.startup_name, "Anonymous Startup");
    assert_eq!(result.subject.industry, "Technology");
    assert_eq!(result.scored_answers[0].weighted_score, 25);
    assert_eq!(result.scored_answers[1].score, 9);
    // (25 + 45) / 100
    assert_eq!(result.final_score, 70);
    assert!(!result.oracle_used);
    assert!(result.cost_estimate.is_none());
    assert!(result
        .scored_answers
        .iter()
        .all(|answer| answer.source == EvaluationSource::Heuristic));
}
