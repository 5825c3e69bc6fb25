use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use venture_score::assessment::{
    AssessmentError, AssessmentExport, AssessmentResult, ImportError, Industry,
};
use venture_score::error::AppError;
use venture_score::report::{render_pdf, ReportAssembler, ReportOptions};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolves industry labels or keys, rejecting anything the catalog lacks.
pub(crate) fn parse_industries<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Industry>, AppError> {
    raw.iter()
        .map(|value| {
            let value = value.as_ref();
            Industry::parse(value).ok_or_else(|| {
                AppError::from(AssessmentError::Import(ImportError::UnknownIndustry(
                    value.to_string(),
                )))
            })
        })
        .collect()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// A directory target receives the default file name.
pub(crate) fn output_path(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

pub(crate) fn write_pdf(
    result: &AssessmentResult,
    options: ReportOptions,
    target: &Path,
) -> Result<PathBuf, AppError> {
    let document = ReportAssembler::new(options).assemble(result)?;
    let bytes = render_pdf(&document)?;
    let path = output_path(target, &document.file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

pub(crate) fn write_json(export: &AssessmentExport, target: &Path) -> Result<PathBuf, AppError> {
    let path = output_path(target, &export.file_name());
    std::fs::write(&path, export.to_json_pretty()?)?;
    Ok(path)
}

pub(crate) fn print_result(result: &AssessmentResult) {
    println!(
        "{} ({}): {}/100 [{}]",
        result.subject.startup_name,
        result.subject.industry,
        result.final_score,
        result.score_category.label()
    );
    println!("\nCategory breakdown");
    for (category, summary) in &result.category_summaries {
        println!(
            "- {category}: {}% ({} of {} weighted points)",
            summary.avg_score_pct, summary.total_weighted, summary.max_weighted
        );
    }
    if !result.red_flags.is_empty() {
        println!("\nRed flags");
        for flag in &result.red_flags {
            println!("- {flag}");
        }
    }
    println!("\nAnswers");
    for answer in &result.scored_answers {
        println!(
            "- {} [{}] {}/10 via {:?}: {}",
            answer.question_id, answer.category, answer.score, answer.source, answer.feedback
        );
    }
    println!("\n{}", result.executive_summary);
    if let Some(cost) = result.cost_estimate {
        println!("Estimated oracle cost: ${cost:.4}");
    }
}
