use regex::Regex;
use std::sync::OnceLock;

pub(crate) const BRIEF_CHAR_LIMIT: usize = 10;
pub(crate) const DETAILED_WORD_COUNT: usize = 20;

fn hedging_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)maybe|possibly|might|could|probably|hopefully")
            .expect("hedging pattern compiles")
    })
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\$|%|customers|users|revenue|growth|partnership|contract")
            .expect("marker pattern compiles")
    })
}

/// Observable traits of an answer the heuristic branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnswerSignals {
    pub trimmed_chars: usize,
    pub word_count: usize,
    pub has_digit: bool,
    pub has_marker: bool,
    pub is_hedging: bool,
}

impl AnswerSignals {
    pub(crate) fn detect(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            trimmed_chars: trimmed.chars().count(),
            word_count: trimmed.split_whitespace().count(),
            has_digit: trimmed.chars().any(|c| c.is_ascii_digit()),
            has_marker: marker_pattern().is_match(trimmed),
            is_hedging: hedging_pattern().is_match(trimmed),
        }
    }

    pub(crate) fn is_brief(&self) -> bool {
        self.trimmed_chars < BRIEF_CHAR_LIMIT
    }

    pub(crate) fn is_detailed(&self) -> bool {
        self.word_count >= DETAILED_WORD_COUNT
    }
}

/// Heuristic outcome bands, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    TooBrief,
    Vague,
    DetailedWithData,
    DetailedSpecific,
    Detailed,
    Specific,
    Average,
}

impl Verdict {
    pub(crate) fn classify(signals: &AnswerSignals) -> Self {
        if signals.is_brief() {
            Verdict::TooBrief
        } else if signals.is_hedging {
            Verdict::Vague
        } else if signals.is_detailed() && signals.has_marker && signals.has_digit {
            Verdict::DetailedWithData
        } else if signals.is_detailed() && signals.has_marker {
            Verdict::DetailedSpecific
        } else if signals.is_detailed() {
            Verdict::Detailed
        } else if signals.has_marker {
            Verdict::Specific
        } else {
            Verdict::Average
        }
    }

    pub(crate) const fn score(self) -> u8 {
        match self {
            Verdict::TooBrief => 2,
            Verdict::Vague => 4,
            Verdict::DetailedWithData => 9,
            Verdict::DetailedSpecific => 8,
            Verdict::Detailed => 7,
            Verdict::Specific => 6,
            Verdict::Average => 5,
        }
    }

    pub(crate) const fn feedback(self) -> &'static str {
        match self {
            Verdict::TooBrief => "Response is too brief and lacks detail.",
            Verdict::Vague => "Response is vague and lacks specificity.",
            Verdict::DetailedWithData => "Clear, detailed response with specific data and metrics.",
            Verdict::DetailedSpecific => "Detailed response with good specificity.",
            Verdict::Detailed => "Good detail but could be more specific.",
            Verdict::Specific => "Some specificity but lacks detail.",
            Verdict::Average => "Average response with room for improvement.",
        }
    }

    pub(crate) const fn reasoning(self) -> &'static str {
        match self {
            Verdict::TooBrief => "The response contains insufficient information to properly evaluate the startup's capabilities or strategy.",
            Verdict::Vague => "While the response provides some information, it relies heavily on uncertain language and lacks concrete details.",
            Verdict::DetailedWithData => "Excellent response demonstrating strategic thinking with concrete data points and specific examples that indicate strong execution.",
            Verdict::DetailedSpecific => "Strong response with good detail and specific information, though could benefit from more quantitative data.",
            Verdict::Detailed => "The response shows thoughtfulness and detail but lacks the specificity needed to fully assess execution capability.",
            Verdict::Specific => "Response includes relevant specifics but needs more comprehensive detail to demonstrate full understanding.",
            Verdict::Average => "The response addresses the question but lacks both the detail and specificity expected for a strong startup evaluation.",
        }
    }
}
