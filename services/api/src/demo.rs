use crate::infra::{print_result, write_json, write_pdf};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;
use venture_score::assessment::{
    AssessmentExport, AssessmentResult, AssessmentSession, Industry, Scorer, WizardStep,
};
use venture_score::error::AppError;
use venture_score::report::ReportOptions;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Name used for the sample startup.
    #[arg(long, default_value = "Orbital Ledger")]
    pub(crate) name: String,
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the PDF report to this file or directory.
    #[arg(long)]
    pub(crate) pdf: Option<PathBuf>,
    /// Write the JSON export to this file or directory.
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
}

const SAMPLE_INDUSTRIES: [Industry; 2] = [Industry::SaasB2b, Industry::AiMachineLearning];

fn sample_answers() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("q1", "We automate month-end close for mid-market finance teams with an AI reconciliation engine."),
        ("q2", "We differentiate through proprietary matching models trained on 40 million ledger entries and a 2-week onboarding, versus 3 months for incumbents."),
        ("q3", "The TAM is $12B across 180,000 mid-market companies in North America and Europe; our SAM is $2.1B based on Gartner estimates."),
        ("q4", "Finance teams lose 6 days a month to manual reconciliation. Competitors like BlackLine target enterprise; we are the only product priced for 50-500 person companies."),
        ("q5", "Yes. We charge $1,500/month per entity and reached $85k MRR in Q3, growing 12% month over month with 57 paying customers."),
        ("q6", "We are a team of 9 in Toronto, 8 full-time. The CEO ran close at a public fintech and the CTO led ML at a payments company."),
        ("q7", "We raised a $1.2M pre-seed in 2023 from angels at a $9M valuation."),
        ("q8", "We are raising $5M at a $30M valuation with $2M committed and plan to close in Q1."),
        ("q9", "Funds go to engineering (50%) and go-to-market (35%) to reach $3M ARR within 18 months."),
        ("q10", "Likely acquirers include Intuit, Workday and BlackLine, which have bought 4 close-automation companies since 2020."),
        ("saas1", "Our blended CAC is $4,200 with a 7 month payback."),
        ("saas2", "Monthly logo churn is 1.1%."),
        ("saas3", "MRR is $85k as of September."),
        ("saas4", "We integrate with NetSuite, QuickBooks, Xero and Slack."),
        ("saas5", "Average contract length is 14 months."),
        ("ai1", "Gradient boosted matchers plus a fine-tuned transformer for memo classification."),
        ("ai2", "Customer ledgers under data processing agreements and public bank statement formats."),
        ("ai3", "We run quarterly bias audits and keep a human review queue for low-confidence matches."),
        ("ai4", "Yes, an anonymized dataset of 40 million labeled reconciliations."),
        ("ai5", "Cloud hosted on AWS with a single-tenant option."),
    ])
}

/// Fills the questionnaire page by page, the way a founder would in the form.
pub(crate) fn walk_wizard(name: &str) -> Result<AssessmentSession, AppError> {
    let answers = sample_answers();
    let mut session = AssessmentSession::new();
    session.set_startup_name(name);

    loop {
        let step = session.step();
        if step == WizardStep::IndustrySelection {
            session.set_industries(&SAMPLE_INDUSTRIES)?;
        }

        let page: Vec<_> = session
            .current_questions()
            .into_iter()
            .map(|question| question.id.clone())
            .collect();
        for id in page {
            if let Some(text) = answers.get(id.as_str()) {
                session.record_answer(id, *text)?;
            }
        }

        if session.next()? == WizardStep::Submission {
            return Ok(session);
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        name,
        today,
        pdf,
        json,
    } = args;

    let mut session = walk_wizard(&name)?;
    println!(
        "Collected {} answers across {} questions for {}\n",
        session.answers().len(),
        session.questions().len(),
        session.questions().industry_label()
    );

    let result: AssessmentResult = session.assess(&Scorer::heuristic(), |_| {}).await?;
    print_result(&result);

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    if let Some(target) = pdf {
        let path = write_pdf(&result, ReportOptions::new(today), &target)?;
        println!("\nReport written to {}", path.display());
    }
    if let Some(target) = json {
        let path = write_json(&AssessmentExport::from_result(&result, Utc::now()), &target)?;
        println!("Export written to {}", path.display());
    }

    Ok(())
}
