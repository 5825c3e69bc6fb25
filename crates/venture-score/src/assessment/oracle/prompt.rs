use super::OracleUnavailable;
use crate::assessment::domain::{Answer, Evaluation, Question};
use serde_json::Value;

const COMPLETION_ALLOWANCE: usize = 200;
const CHARS_PER_TOKEN: usize = 3;

pub fn build_prompt(question: &Question, answer: &Answer) -> String {
    format!(
        r#"You are an AI startup evaluator. Score the following response to the startup question on a scale from 1 to 10 based on the scoring criteria below.

Question: "{question}"
Category: {category}
Response: "{answer}"

Scoring Criteria:
- Score 10: Clear, detailed, and strategic response backed by data or execution
- Score 7-9: Mostly clear with minor gaps or less specificity
- Score 4-6: Vague, lacks detail, or seems generic
- Score 1-3: Unclear, missing information, or irrelevant

Please respond with a JSON object containing:
{{
  "score": [number 1-10],
  "feedback": "[brief explanation of the score]",
  "reasoning": "[detailed analysis of why this score was given, considering specificity, data inclusion, strategic thinking, and execution evidence]"
}}"#,
        question = question.text,
        category = question.category,
        answer = answer.text,
    )
}

/// Rough token count for one call: prompt plus the expected completion.
pub fn estimate_tokens(prompt: &str) -> u64 {
    let chars = prompt.chars().count() + COMPLETION_ALLOWANCE;
    chars.div_ceil(CHARS_PER_TOKEN) as u64
}

pub fn estimate_cost(total_tokens: u64, cost_per_million: f64) -> f64 {
    total_tokens as f64 / 1_000_000.0 * cost_per_million
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses the model's completion into an evaluation, clamping the score.
pub fn parse_completion(text: &str) -> Result<Evaluation, OracleUnavailable> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|err| OracleUnavailable::MalformedResponse(err.to_string()))?;
    let object = value.as_object().ok_or_else(|| {
        OracleUnavailable::MalformedResponse("completion is not a JSON object".to_string())
    })?;

    let score = object
        .get("score")
        .and_then(Value::as_f64)
        .ok_or(OracleUnavailable::MissingField("score"))?;
    let feedback = object
        .get("feedback")
        .and_then(Value::as_str)
        .ok_or(OracleUnavailable::MissingField("feedback"))?;
    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .ok_or(OracleUnavailable::MissingField("reasoning"))?;

    Ok(Evaluation::clamped(score.round() as i64, feedback, reasoning))
}
