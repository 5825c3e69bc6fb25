use super::aggregate::summarize;
use super::catalog::{
    CatalogError, Industry, QuestionSet, DESCRIPTION_QUESTION, GENERAL_PAGES, MARKET_QUESTION,
    VISION_QUESTION,
};
use super::domain::{Answer, AssessmentResult, AssessmentSubject, Question, QuestionId};
use super::import::{AnswerImport, ImportError};
use super::scorer::Scorer;
use std::collections::HashMap;
use tracing::info;

pub const DEFAULT_STARTUP_NAME: &str = "Anonymous Startup";

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("question '{0}' is not part of this assessment")]
    UnknownQuestion(QuestionId),
    #[error("question '{0}' appears more than once in the assessment")]
    DuplicateQuestion(QuestionId),
    #[error("answer at least one question before submitting")]
    NoAnswers,
    #[error("oracle scoring needs an answer to the description, vision or market question")]
    InsufficientForOracle,
    #[error("select at least one industry to continue")]
    NoIndustrySelected,
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl From<CatalogError> for AssessmentError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DuplicateQuestion(id) => Self::DuplicateQuestion(id),
        }
    }
}

/// Position in the multi-page form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    General(usize),
    IndustrySelection,
    Industry(usize),
    Submission,
    Results,
}

/// Answers keyed by question id; only non-blank text is kept.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: HashMap<QuestionId, Answer>,
}

impl AnswerSheet {
    pub fn get(&self, id: &QuestionId) -> Option<&Answer> {
        self.answers.get(id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    fn put(&mut self, answer: Answer) {
        if answer.text.trim().is_empty() {
            self.answers.remove(&answer.question_id);
        } else {
            self.answers.insert(answer.question_id.clone(), answer);
        }
    }

    fn retain_known(&mut self, questions: &QuestionSet) {
        self.answers.retain(|id, _| questions.contains(id));
    }
}

/// State of one founder's questionnaire, from first page to results.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    startup_name: Option<String>,
    questions: QuestionSet,
    answers: AnswerSheet,
    step: WizardStep,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self {
            startup_name: None,
            questions: QuestionSet::general(),
            answers: AnswerSheet::default(),
            step: WizardStep::General(0),
        }
    }

    /// Builds a session positioned at submission from imported answers.
    pub fn from_import(import: AnswerImport) -> Result<Self, AssessmentError> {
        let industries = import.parsed_industries()?;
        let mut session = Self::new();
        session.set_startup_name(import.startup_name.unwrap_or_default());
        session.set_industries(&industries)?;
        for (id, text) in import.answers {
            session.record_answer(id.as_str(), text)?;
        }
        session.step = WizardStep::Submission;
        Ok(session)
    }

    pub fn set_startup_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let name = name.trim();
        self.startup_name = (!name.is_empty()).then(|| name.to_string());
    }

    pub fn startup_name(&self) -> &str {
        self.startup_name.as_deref().unwrap_or(DEFAULT_STARTUP_NAME)
    }

    pub fn industries(&self) -> &[Industry] {
        self.questions.industries()
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Rebuilds the question set and drops answers to questions no longer asked.
    pub fn set_industries(&mut self, industries: &[Industry]) -> Result<(), AssessmentError> {
        self.questions = QuestionSet::for_industries(industries)?;
        self.answers.retain_known(&self.questions);
        if let WizardStep::Industry(index) = self.step {
            if index >= self.questions.industries().len() {
                self.step = WizardStep::IndustrySelection;
            }
        }
        Ok(())
    }

    /// Blank text clears any earlier answer to the same question.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<QuestionId>,
        text: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        let answer = Answer::new(question_id, text);
        if !self.questions.contains(&answer.question_id) {
            return Err(AssessmentError::UnknownQuestion(answer.question_id));
        }
        self.answers.put(answer);
        Ok(())
    }

    pub fn next(&mut self) -> Result<WizardStep, AssessmentError> {
        let industry_pages = self.questions.industries().len();
        self.step = match self.step {
            WizardStep::General(page) if page + 1 < GENERAL_PAGES.len() => {
                WizardStep::General(page + 1)
            }
            WizardStep::General(_) => WizardStep::IndustrySelection,
            WizardStep::IndustrySelection if industry_pages == 0 => {
                return Err(AssessmentError::NoIndustrySelected)
            }
            WizardStep::IndustrySelection => WizardStep::Industry(0),
            WizardStep::Industry(index) if index + 1 < industry_pages => {
                WizardStep::Industry(index + 1)
            }
            WizardStep::Industry(_) => WizardStep::Submission,
            step @ (WizardStep::Submission | WizardStep::Results) => step,
        };
        Ok(self.step)
    }

    pub fn previous(&mut self) -> WizardStep {
        let industry_pages = self.questions.industries().len();
        self.step = match self.step {
            WizardStep::General(page) => WizardStep::General(page.saturating_sub(1)),
            WizardStep::IndustrySelection => WizardStep::General(GENERAL_PAGES.len() - 1),
            WizardStep::Industry(0) => WizardStep::IndustrySelection,
            WizardStep::Industry(index) => WizardStep::Industry(index - 1),
            WizardStep::Submission if industry_pages == 0 => WizardStep::IndustrySelection,
            WizardStep::Submission => WizardStep::Industry(industry_pages - 1),
            WizardStep::Results => WizardStep::Submission,
        };
        self.step
    }

    /// Questions shown on the current page; empty for non-question steps.
    pub fn current_questions(&self) -> Vec<&Question> {
        match self.step {
            WizardStep::General(page) => self.questions.general_page(page).iter().collect(),
            WizardStep::Industry(index) => match self.questions.industries().get(index) {
                Some(industry) => self.questions.industry_page(*industry),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Answered questions paired with their answers, in catalog order.
    pub fn pairs(&self) -> Vec<(&Question, &Answer)> {
        self.questions
            .questions()
            .iter()
            .filter_map(|question| {
                self.answers
                    .get(&question.id)
                    .map(|answer| (question, answer))
            })
            .collect()
    }

    pub fn subject(&self) -> AssessmentSubject {
        AssessmentSubject {
            startup_name: self.startup_name().to_string(),
            industry: self.questions.industry_label(),
        }
    }

    pub fn validate(&self, oracle_enabled: bool) -> Result<(), AssessmentError> {
        if self.answers.is_empty() {
            return Err(AssessmentError::NoAnswers);
        }
        if oracle_enabled {
            let has_core = [DESCRIPTION_QUESTION, VISION_QUESTION, MARKET_QUESTION]
                .into_iter()
                .any(|id| self.answers.get(&QuestionId::from(id)).is_some());
            if !has_core {
                return Err(AssessmentError::InsufficientForOracle);
            }
        }
        Ok(())
    }

    /// Scores every answer, hands the result to `on_complete` and moves to results.
    pub async fn assess<F>(
        &mut self,
        scorer: &Scorer,
        on_complete: F,
    ) -> Result<AssessmentResult, AssessmentError>
    where
        F: FnOnce(&AssessmentResult),
    {
        self.validate(scorer.oracle_enabled())?;

        let pairs = self.pairs();
        info!(
            startup = self.startup_name(),
            answers = pairs.len(),
            oracle = scorer.oracle_name().unwrap_or("heuristic"),
            "assessment started"
        );
        let run = scorer.score_all(&pairs).await;
        let result = summarize(
            self.subject(),
            run.scored_answers,
            run.cost_estimate,
            run.oracle_used,
        );
        info!(
            startup = %result.subject.startup_name,
            final_score = result.final_score,
            category = result.score_category.label(),
            red_flags = result.red_flags.len(),
            "assessment complete"
        );

        on_complete(&result);
        self.step = WizardStep::Results;
        Ok(result)
    }
}
