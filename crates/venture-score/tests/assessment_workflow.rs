use venture_score::assessment::{
    AnswerImport, AssessmentError, AssessmentSession, EvaluationSource, Industry, ScoreCategory,
    Scorer, WizardStep,
};

const TRACTION: &str = "We have $5M ARR growing 20% month over month with 1,200 paying customers and three enterprise partnership contracts signed in Q2.";

fn founder_session() -> AssessmentSession {
    let mut session = AssessmentSession::new();
    session.set_startup_name("Northwind Health");
    session
        .set_industries(&[Industry::HealthTech])
        .expect("industry list is valid");
    session
        .record_answer("q1", "Scheduling software for independent physiotherapy clinics.")
        .expect("general question");
    session.record_answer("q5", TRACTION).expect("traction question");
    session
        .record_answer("q6", "Maybe we will hire a CTO later.")
        .expect("team question");
    session
        .record_answer("health1", "We are HIPAA compliant and audited annually by a third party firm.")
        .expect("healthtech question");
    session
}

#[tokio::test]
async fn heuristic_assessment_scores_every_answer_once() {
    let mut session = founder_session();
    let result = session
        .assess(&Scorer::heuristic(), |_| {})
        .await
        .expect("assessment completes");

    let scores: Vec<(&str, u8)> = result
        .scored_answers
        .iter()
        .map(|answer| (answer.question_id.as_str(), answer.score))
        .collect();
    assert_eq!(scores, vec![("q1", 5), ("q5", 9), ("q6", 4), ("health1", 5)]);

    // (25 + 45 + 20 + 15) / (50 + 50 + 50 + 30)
    assert_eq!(result.final_score, 58);
    assert_eq!(result.score_category, ScoreCategory::Yellow);
    assert_eq!(
        result.red_flags,
        vec![
            "Team composition or experience concerns",
            "Overall assessment indicates high investment risk",
        ]
    );
    assert_eq!(result.subject.industry, "HealthTech");
    assert!(result
        .scored_answers
        .iter()
        .all(|answer| answer.source == EvaluationSource::Heuristic));
    assert_eq!(session.step(), WizardStep::Results);
}

#[tokio::test]
async fn imported_answers_feed_the_same_pipeline() {
    let csv = "question_id,answer\nq1,Scheduling software for independent physiotherapy clinics.\nq5,\"We have $5M ARR growing 20% month over month with 1,200 paying customers and three enterprise partnership contracts signed in Q2.\"\n";
    let import = AnswerImport::from_csv_reader(csv.as_bytes()).expect("csv parses");
    let mut session = AssessmentSession::from_import(import).expect("answers accepted");
    assert_eq!(session.step(), WizardStep::Submission);

    let result = session
        .assess(&Scorer::heuristic(), |_| {})
        .await
        .expect("assessment completes");
    assert_eq!(result.scored_answers.len(), 2);
    assert_eq!(result.subject.startup_name, "Anonymous Startup");
}

#[test]
fn imports_naming_unknown_questions_are_rejected() {
    let raw = r#"{"industries":["Fintech"],"answers":{"q1":"Payments","saas1":"Seats"}}"#;
    let import = AnswerImport::from_json_str(raw).expect("json parses");
    let err = AssessmentSession::from_import(import).expect_err("saas not selected");
    assert!(matches!(err, AssessmentError::UnknownQuestion(id) if id.as_str() == "saas1"));
}
