use crate::demo::{run_demo, DemoArgs};
use crate::infra::{parse_industries, print_result, write_json, write_pdf};
use crate::server;
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use venture_score::assessment::{
    AnswerImport, AssessmentError, AssessmentExport, AssessmentSession, HttpOracle,
    OracleSetupError, QuestionSet, Scorer,
};
use venture_score::config::AppConfig;
use venture_score::error::AppError;
use venture_score::report::ReportOptions;
use venture_score::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Venture Score",
    about = "Score startup pitch questionnaires and produce investor reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the questions asked for a set of industries
    Questions(QuestionsArgs),
    /// Score a file of answers and optionally write the PDF report and JSON export
    Assess(AssessArgs),
    /// Run the questionnaire end to end with a sample founder
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Industry label or key; repeat for several
    #[arg(long = "industry")]
    pub(crate) industries: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON answer file, or CSV with question_id and answer columns
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Industry label or key; replaces the industries listed in the file
    #[arg(long = "industry")]
    pub(crate) industries: Vec<String>,
    /// Startup name; replaces the name given in the file
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Write the PDF report to this file or directory
    #[arg(long)]
    pub(crate) pdf: Option<PathBuf>,
    /// Write the JSON export to this file or directory
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Score answers with the configured completion provider
    #[arg(long)]
    pub(crate) oracle: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions(args) => list_questions(args),
        Command::Assess(args) => run_assess(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

fn list_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let industries = parse_industries(&args.industries)?;
    let set = QuestionSet::for_industries(&industries)
        .map_err(AssessmentError::from)?;

    println!("{} questions for {}", set.len(), set.industry_label());
    let mut category = "";
    for question in set.questions() {
        if question.category != category {
            category = question.category;
            println!("\n{category}");
        }
        println!("  [{}] {}", question.id, question.text);
    }
    Ok(())
}

fn build_scorer(config: &AppConfig, use_oracle: bool) -> Result<Scorer, AppError> {
    if !use_oracle {
        return Ok(Scorer::heuristic());
    }

    let mut settings = config.oracle.clone();
    settings.enabled = true;
    if !settings.is_active() {
        return Err(OracleSetupError::MissingCredential.into());
    }
    let oracle = HttpOracle::new(&settings)?;
    Ok(Scorer::with_oracle(Arc::new(oracle), settings.call_delay))
}

async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let scorer = build_scorer(&config, args.oracle)?;

    let mut import = AnswerImport::from_path(&args.answers).map_err(AssessmentError::from)?;
    if let Some(name) = args.name {
        import.startup_name = Some(name);
    }
    if !args.industries.is_empty() {
        parse_industries(&args.industries)?;
        import.industries = args.industries;
    }

    let mut session = AssessmentSession::from_import(import)?;
    let result = session
        .assess(&scorer, |result| {
            info!(score = result.final_score, "assessment scored");
        })
        .await?;
    print_result(&result);

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    if let Some(target) = args.pdf {
        let path = write_pdf(&result, ReportOptions::new(date), &target)?;
        println!("\nReport written to {}", path.display());
    }
    if let Some(target) = args.json {
        let export = AssessmentExport::from_result(&result, Utc::now());
        let path = write_json(&export, &target)?;
        println!("Export written to {}", path.display());
    }

    Ok(())
}
