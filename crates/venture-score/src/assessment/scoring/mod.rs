mod rules;

use super::domain::{Answer, Evaluation, Question};
use rules::{AnswerSignals, Verdict};

/// Stateless keyword and length heuristic applied to a single answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// The question is accepted for parity with the oracle contract; the
    /// heuristic only looks at the answer text.
    pub fn score(&self, _question: &Question, answer: &Answer) -> Evaluation {
        self.score_text(&answer.text)
    }

    pub fn score_text(&self, text: &str) -> Evaluation {
        let verdict = Verdict::classify(&AnswerSignals::detect(text));
        Evaluation::clamped(
            i64::from(verdict.score()),
            verdict.feedback(),
            verdict.reasoning(),
        )
    }
}
