use super::layout::{
    paginate, Badge, Block, FontStyle, PageGeometry, PageLayout, RgbColor, TextRun,
    BULLET_TEXT_INDENT,
};
use super::wrap::{sanitize, truncate, wrap};
use super::ReportError;
use crate::assessment::aggregate::ScoreBand;
use crate::assessment::domain::{AssessmentResult, EvaluationSource, ScoreCategory};
use crate::assessment::export::file_safe_name;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_BRAND: &str = "Venture Score";
pub const DEFAULT_DETAIL_LIMIT: usize = 5;
const ANSWER_EXCERPT_CHARS: usize = 200;
const REASONING_EXCERPT_CHARS: usize = 150;
const SCORE_BADGE_WIDTH: f32 = 80.0;
const AI_BADGE_WIDTH: f32 = 50.0;
const SECTION_GAP: f32 = 10.0;
const CONFIDENTIALITY_NOTICE: &str =
    "This report contains confidential information. For internal use only.";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub brand: String,
    /// Printed on the banner and used in the file name.
    pub date: NaiveDate,
    /// How many answers the question analysis section lists.
    pub detail_limit: usize,
    pub geometry: PageGeometry,
}

impl ReportOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            date,
            detail_limit: DEFAULT_DETAIL_LIMIT,
            geometry: PageGeometry::A4,
        }
    }
}

/// Paginated report, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub file_name: String,
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All visible text, page by page, in reading order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .flat_map(|placed| placed.block.texts())
            .collect()
    }
}

pub fn report_file_name(startup_name: &str, date: NaiveDate) -> String {
    format!(
        "venture-score-analysis-{}-{}.pdf",
        file_safe_name(startup_name),
        date.format("%Y-%m-%d")
    )
}

pub fn recommendation(score: u8) -> &'static str {
    match ScoreBand::from_score(score) {
        ScoreBand::Strong => "RECOMMEND FOR INVESTMENT: High-potential startup demonstrating strong fundamentals. Proceed with due diligence.",
        ScoreBand::Moderate => "CONDITIONAL INTEREST: Promising opportunity requiring specific improvements before investment decision.",
        ScoreBand::Weak => "PASS AT THIS TIME: Significant development needed before investment readiness.",
    }
}

pub fn next_steps(score: u8) -> [&'static str; 3] {
    match ScoreBand::from_score(score) {
        ScoreBand::Strong => [
            "Schedule management presentation within 1-2 weeks",
            "Initiate preliminary due diligence process",
            "Prepare term sheet framework and valuation analysis",
        ],
        ScoreBand::Moderate => [
            "Request additional documentation addressing identified gaps",
            "Schedule follow-up call within 2-3 weeks",
            "Monitor progress and re-evaluate in 3-6 months",
        ],
        ScoreBand::Weak => [
            "Provide constructive feedback on improvement areas",
            "Maintain relationship for future opportunities",
            "Schedule quarterly check-ins to monitor progress",
        ],
    }
}

fn category_status(pct: u8) -> &'static str {
    match ScoreBand::from_score(pct) {
        ScoreBand::Strong => "Excellent",
        ScoreBand::Moderate => "Good",
        ScoreBand::Weak => "Needs Improvement",
    }
}

fn score_fill(category: ScoreCategory) -> RgbColor {
    match category {
        ScoreCategory::Green => RgbColor::SCORE_GREEN,
        ScoreCategory::Yellow => RgbColor::SCORE_YELLOW,
        ScoreCategory::Red => RgbColor::SCORE_RED,
    }
}

/// Accumulates blocks; wrapping happens here so heights are known up front.
struct BlockBuilder<'a> {
    geometry: &'a PageGeometry,
    blocks: Vec<Block>,
    next_section: usize,
}

impl<'a> BlockBuilder<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            blocks: Vec::new(),
            next_section: 1,
        }
    }

    fn run(&self, text: &str, size: f32, style: FontStyle, indent: f32) -> TextRun {
        let width = self.geometry.content_width() - indent;
        TextRun {
            lines: wrap(&sanitize(text), size, style, width),
            size,
            style,
            indent,
        }
    }

    fn heading(&self, text: &str) -> Block {
        Block::Heading(self.run(text, 12.0, FontStyle::Bold, 0.0))
    }

    fn paragraph(&self, text: &str, size: f32, style: FontStyle) -> Block {
        Block::Paragraph(self.run(text, size, style, 0.0))
    }

    fn bullet(&self, text: &str) -> Block {
        let (size, style) = (10.0, FontStyle::Regular);
        Block::Bullet(TextRun {
            lines: wrap(&sanitize(text), size, style, self.geometry.bullet_width()),
            size,
            style,
            indent: BULLET_TEXT_INDENT,
        })
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn spacer(&mut self, height: f32) {
        self.push(Block::Spacer { height });
    }

    fn section(&mut self, title: &str) {
        let title = format!("{}. {}", self.next_section, title);
        self.next_section += 1;
        self.push(Block::SectionHeader { title });
        self.spacer(5.0);
    }
}

/// Turns an assessment result into a paginated document.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    options: ReportOptions,
}

impl ReportAssembler {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn assemble(&self, result: &AssessmentResult) -> Result<ReportDocument, ReportError> {
        let geometry = &self.options.geometry;
        let mut builder = BlockBuilder::new(geometry);

        self.banner(&mut builder, result);
        self.summary_section(&mut builder, result);
        self.category_section(&mut builder, result);
        if !result.red_flags.is_empty() {
            builder.section("KEY CONCERNS & RED FLAGS");
            for flag in &result.red_flags {
                let bullet = builder.bullet(flag);
                builder.push(bullet);
            }
            builder.spacer(SECTION_GAP);
        }
        self.detail_section(&mut builder, result);
        self.next_steps_section(&mut builder, result);
        self.footer(&mut builder, result);

        let pages = paginate(builder.blocks, geometry)?;
        Ok(ReportDocument {
            title: format!(
                "{} Startup Analysis Report - {}",
                self.options.brand, result.subject.startup_name
            ),
            file_name: report_file_name(&result.subject.startup_name, self.options.date),
            geometry: *geometry,
            pages,
        })
    }

    fn banner(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        let name = sanitize(&result.subject.startup_name);
        let width = builder.geometry.content_width();
        let name_lines = wrap(&name, 16.0, FontStyle::Bold, width);
        let name = match name_lines.as_slice() {
            [only] => only.clone(),
            [first, ..] => format!("{first}..."),
            [] => String::new(),
        };

        let mut badges = vec![Badge {
            label: format!("SCORE: {}/100", result.final_score),
            fill: score_fill(result.score_category),
            width: SCORE_BADGE_WIDTH,
        }];
        if result.oracle_used {
            badges.push(Badge {
                label: "AI-Powered".to_string(),
                fill: RgbColor::AI_PURPLE,
                width: AI_BADGE_WIDTH,
            });
        }

        builder.push(Block::Banner {
            title: sanitize(&format!("{} Startup Analysis Report", self.options.brand)),
            lines: vec![
                name,
                format!("Date: {}", self.options.date.format("%B %-d, %Y")),
                sanitize(&format!("Industry: {}", result.subject.industry)),
            ],
            badges,
        });
    }

    fn summary_section(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        builder.section("EXECUTIVE SUMMARY & RECOMMENDATION");
        let overview = builder.heading("Overview:");
        builder.push(overview);
        builder.spacer(2.0);
        let summary = builder.paragraph(&result.executive_summary, 10.0, FontStyle::Regular);
        builder.push(summary);
        builder.spacer(8.0);

        let heading = builder.heading("Investment Recommendation:");
        builder.push(heading);
        builder.spacer(2.0);
        let bullet = builder.bullet(recommendation(result.final_score));
        builder.push(bullet);
        builder.spacer(SECTION_GAP);
    }

    fn category_section(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        builder.section("CATEGORY PERFORMANCE BREAKDOWN");
        for (category, summary) in &result.category_summaries {
            let line = format!(
                "{category}: {}% ({})",
                summary.avg_score_pct,
                category_status(summary.avg_score_pct)
            );
            let bullet = builder.bullet(&line);
            builder.push(bullet);
        }
        builder.spacer(SECTION_GAP);
    }

    fn detail_section(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        builder.section("DETAILED QUESTION ANALYSIS");
        let shown = result.scored_answers.iter().take(self.options.detail_limit);
        for (index, answer) in shown.enumerate() {
            let mut blocks = vec![
                Block::Heading(builder.run(
                    &format!("Q{}: {}", index + 1, answer.question_text),
                    10.0,
                    FontStyle::Bold,
                    0.0,
                )),
                Block::Spacer { height: 2.0 },
                builder.paragraph(
                    &format!("Score: {}/10 | Category: {}", answer.score, answer.category),
                    9.0,
                    FontStyle::Regular,
                ),
                Block::Spacer { height: 3.0 },
                builder.paragraph(
                    &format!(
                        "Response: {}",
                        truncate(&answer.answer_text, ANSWER_EXCERPT_CHARS)
                    ),
                    9.0,
                    FontStyle::Regular,
                ),
                Block::Spacer { height: 3.0 },
                builder.paragraph(
                    &format!("Feedback: {}", answer.feedback),
                    9.0,
                    FontStyle::Italic,
                ),
            ];
            let oracle_reasoning = result.oracle_used
                && answer.source == EvaluationSource::Oracle
                && !answer.reasoning.trim().is_empty();
            if oracle_reasoning {
                blocks.push(Block::Spacer { height: 3.0 });
                blocks.push(builder.paragraph(
                    &format!(
                        "AI Analysis: {}",
                        truncate(&answer.reasoning, REASONING_EXCERPT_CHARS)
                    ),
                    9.0,
                    FontStyle::Italic,
                ));
            }
            builder.push(Block::Group { blocks });
            builder.spacer(8.0);
        }
    }

    fn next_steps_section(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        builder.section("NEXT STEPS & RECOMMENDATIONS");
        for step in next_steps(result.final_score) {
            let bullet = builder.bullet(step);
            builder.push(bullet);
        }
        builder.spacer(SECTION_GAP);
    }

    fn footer(&self, builder: &mut BlockBuilder<'_>, result: &AssessmentResult) {
        let mut blocks = vec![
            Block::Rule {
                color: RgbColor::SECTION_BLUE,
            },
            builder.paragraph(
                &format!("Powered by {}", self.options.brand),
                12.0,
                FontStyle::Bold,
            ),
            Block::Spacer { height: 3.0 },
            builder.paragraph(CONFIDENTIALITY_NOTICE, 8.0, FontStyle::Italic),
        ];
        if let Some(cost) = result.cost_estimate.filter(|_| result.oracle_used) {
            blocks.push(Block::Spacer { height: 3.0 });
            blocks.push(builder.paragraph(
                &format!("AI Analysis Cost: ${cost:.4}"),
                8.0,
                FontStyle::Regular,
            ));
        }
        builder.push(Block::Group { blocks });
    }
}
