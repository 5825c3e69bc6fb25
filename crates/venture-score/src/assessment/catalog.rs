use super::domain::{Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const GENERAL_WEIGHT: u32 = 5;
pub const INDUSTRY_WEIGHT: u32 = 3;

/// Question ids the aggregation and oracle validation refer to directly.
pub const DESCRIPTION_QUESTION: &str = "q1";
pub const VISION_QUESTION: &str = "q2";
pub const MARKET_QUESTION: &str = "q3";
pub const TRACTION_QUESTION: &str = "q5";
pub const TEAM_QUESTION: &str = "q6";

type Entry = (&'static str, &'static str, &'static str);

const GENERAL: [Entry; 11] = [
    ("q1", "In one sentence, describe what your company does.", "Company Overview"),
    ("q2", "What is your plan to succeed and differentiate your company in the market?", "Strategy"),
    ("q3", "How large is the market you are targeting? Please include any relevant data or estimates.", "Market"),
    ("q4", "What problem are you solving? Who are your competitors? What makes your solution unique?", "Product"),
    ("q5", "Are you currently generating revenue? If yes, describe your business model, recent revenue figures, and your typical customer. If not, please share any progress or milestones.", "Traction"),
    ("q6", "How many people are on your team? Where are you located? Who works full-time and part-time? Why is your team well-positioned to succeed?", "Team"),
    ("q7", "Is this your first funding round? If not, describe previous investments, including amounts raised, valuations, timing, and investors.", "Funding"),
    ("q8", "How much capital are you currently seeking? What valuation are you targeting? Do you have any commitments? When do you plan to close this round?", "Funding"),
    ("q9", "How will you use the funds you are raising? What milestones or goals will this funding help you achieve?", "Funding"),
    ("q10", "What is your expected exit strategy? Who do you think might buy your company or how will investors see a return?", "Strategy"),
    ("q11", "Please upload your latest pitch deck in PDF format.", "Documentation"),
];

/// Page boundaries of the general section in the form wizard.
pub(crate) const GENERAL_PAGES: [(usize, usize); 3] = [(0, 4), (4, 7), (7, 11)];

const SAAS: [Entry; 5] = [
    ("saas1", "What is your average Customer Acquisition Cost (CAC)?", "Metrics"),
    ("saas2", "What is your churn rate (%)?", "Metrics"),
    ("saas3", "What is your Monthly Recurring Revenue (MRR)?", "Metrics"),
    ("saas4", "What integrations do you offer with major platforms (e.g., Salesforce, Slack)?", "Product"),
    ("saas5", "What is your average contract length (in months)?", "Metrics"),
];

const FINTECH: [Entry; 5] = [
    ("fin1", "Are you regulated or licensed by any financial authority?", "Compliance"),
    ("fin2", "Do you have AML and KYC procedures in place?", "Compliance"),
    ("fin3", "Which banking or payment partners do you work with?", "Partnerships"),
    ("fin4", "What is your total monthly transaction volume?", "Metrics"),
    ("fin5", "Describe your risk management policies.", "Risk Management"),
];

const HEALTHTECH: [Entry; 5] = [
    ("health1", "Have you received FDA or CE certification for your product?", "Regulatory"),
    ("health2", "Have you completed any clinical trials?", "Validation"),
    ("health3", "How do you ensure patient data privacy and security?", "Compliance"),
    ("health4", "What partnerships do you have with healthcare providers?", "Partnerships"),
    ("health5", "Is your product classified as a medical device?", "Regulatory"),
];

const MEDTECH: [Entry; 5] = [
    ("med1", "What is your current regulatory approval status (e.g., FDA, CE)?", "Regulatory"),
    ("med2", "What is the timeline for your next regulatory milestone?", "Regulatory"),
    ("med3", "Do you have manufacturing capabilities or partnerships?", "Operations"),
    ("med4", "What is your distribution strategy?", "Go-to-Market"),
    ("med5", "Have you conducted any pilot studies or validations?", "Validation"),
];

const BIOTECH: [Entry; 5] = [
    ("bio1", "What stage is your research or product in?", "Technology"),
    ("bio2", "Do you hold any patents or intellectual property related to your biotech innovations?", "Intellectual Property"),
    ("bio3", "Describe your funding sources and any grants received.", "Funding"),
    ("bio4", "What collaborations do you have with research institutions?", "Partnerships"),
    ("bio5", "What is your expected timeline to market?", "Strategy"),
];

const MARKETPLACE: [Entry; 5] = [
    ("mkt1", "How many buyers and sellers are on your platform?", "Metrics"),
    ("mkt2", "What is your average transaction value?", "Metrics"),
    ("mkt3", "What is your take rate or commission percentage?", "Business Model"),
    ("mkt4", "How do you handle disputes between parties?", "Operations"),
    ("mkt5", "What is your monthly Gross Merchandise Volume (GMV)?", "Metrics"),
];

const AI_ML: [Entry; 5] = [
    ("ai1", "Describe the AI models or algorithms you use.", "Technology"),
    ("ai2", "What data sources are used to train your AI?", "Data"),
    ("ai3", "How do you address model bias and ensure validation?", "Ethics & Quality"),
    ("ai4", "Do you own any proprietary datasets?", "Data"),
    ("ai5", "How is your AI deployed (cloud, edge, on-premise)?", "Technology"),
];

const CLEANTECH: [Entry; 5] = [
    ("clean1", "What specific problem in clean energy or sustainability do you address?", "Product"),
    ("clean2", "Describe your technology and its environmental impact.", "Technology"),
    ("clean3", "Do you have government or regulatory approvals?", "Regulatory"),
    ("clean4", "What partnerships do you have with utilities or government agencies?", "Partnerships"),
    ("clean5", "What is your projected energy savings or emission reduction?", "Impact"),
];

const AGTECH: [Entry; 5] = [
    ("agri1", "What agricultural or food industry problem do you solve?", "Product"),
    ("agri2", "Describe your technology and how it is deployed.", "Technology"),
    ("agri3", "Do you have field trials or pilot programs?", "Validation"),
    ("agri4", "What regulatory approvals are required?", "Regulatory"),
    ("agri5", "How do you plan to scale your solution geographically?", "Strategy"),
];

const EDTECH: [Entry; 5] = [
    ("edu1", "What learner demographic do you target?", "Market"),
    ("edu2", "Do you have partnerships with educational institutions?", "Partnerships"),
    ("edu3", "How do you measure learning outcomes?", "Validation"),
    ("edu4", "Describe your content creation and curation process.", "Product"),
    ("edu5", "What is your pricing or licensing model?", "Business Model"),
];

const MOBILITY: [Entry; 5] = [
    ("mob1", "What mobility challenges are you addressing (e.g., ride-sharing, EV infrastructure)?", "Product"),
    ("mob2", "Describe your technology platform.", "Technology"),
    ("mob3", "How do you ensure compliance with transportation regulations?", "Compliance"),
    ("mob4", "What is your fleet or asset management strategy?", "Operations"),
    ("mob5", "What are your plans for market expansion?", "Strategy"),
];

const GOVTECH: [Entry; 5] = [
    ("gov1", "Which government agencies or departments are you targeting?", "Market"),
    ("gov2", "How do you comply with government standards and regulations?", "Compliance"),
    ("gov3", "How do you manage data privacy and security for government clients?", "Compliance"),
    ("gov4", "Do you have existing government contracts or pilot projects?", "Traction"),
    ("gov5", "What is your plan for scaling in the public sector?", "Strategy"),
];

const WEB3: [Entry; 5] = [
    ("web3_1", "Which blockchain protocol(s) do you use?", "Technology"),
    ("web3_2", "Describe your tokenomics and utility token design.", "Business Model"),
    ("web3_3", "Have your smart contracts been audited?", "Risk Management"),
    ("web3_4", "How decentralized is your network or platform?", "Technology"),
    ("web3_5", "What regulatory challenges have you addressed?", "Compliance"),
];

/// Industries a founder can opt into; each contributes its own question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    SaasB2b,
    Fintech,
    HealthTech,
    MedTech,
    Biotech,
    Marketplace,
    AiMachineLearning,
    CleantechEnergy,
    AgTechFoodTech,
    EdTech,
    Mobility,
    GovTech,
    Web3Blockchain,
}

impl Industry {
    pub const fn ordered() -> [Industry; 13] {
        [
            Industry::SaasB2b,
            Industry::Fintech,
            Industry::HealthTech,
            Industry::MedTech,
            Industry::Biotech,
            Industry::Marketplace,
            Industry::AiMachineLearning,
            Industry::CleantechEnergy,
            Industry::AgTechFoodTech,
            Industry::EdTech,
            Industry::Mobility,
            Industry::GovTech,
            Industry::Web3Blockchain,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Industry::SaasB2b => "SaaS / B2B",
            Industry::Fintech => "Fintech",
            Industry::HealthTech => "HealthTech",
            Industry::MedTech => "MedTech",
            Industry::Biotech => "Biotech",
            Industry::Marketplace => "Marketplace",
            Industry::AiMachineLearning => "AI / Machine Learning",
            Industry::CleantechEnergy => "Cleantech / Energy",
            Industry::AgTechFoodTech => "AgTech / FoodTech",
            Industry::EdTech => "EdTech",
            Industry::Mobility => "Mobility",
            Industry::GovTech => "GovTech",
            Industry::Web3Blockchain => "Web3 / Blockchain",
        }
    }

    /// Accepts either the display label or the snake_case key, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ordered().into_iter().find(|industry| {
            industry.label().eq_ignore_ascii_case(needle)
                || industry.key().eq_ignore_ascii_case(needle)
        })
    }

    pub const fn key(self) -> &'static str {
        match self {
            Industry::SaasB2b => "saas_b2b",
            Industry::Fintech => "fintech",
            Industry::HealthTech => "health_tech",
            Industry::MedTech => "med_tech",
            Industry::Biotech => "biotech",
            Industry::Marketplace => "marketplace",
            Industry::AiMachineLearning => "ai_machine_learning",
            Industry::CleantechEnergy => "cleantech_energy",
            Industry::AgTechFoodTech => "ag_tech_food_tech",
            Industry::EdTech => "ed_tech",
            Industry::Mobility => "mobility",
            Industry::GovTech => "gov_tech",
            Industry::Web3Blockchain => "web3_blockchain",
        }
    }

    fn entries(self) -> &'static [Entry] {
        match self {
            Industry::SaasB2b => &SAAS,
            Industry::Fintech => &FINTECH,
            Industry::HealthTech => &HEALTHTECH,
            Industry::MedTech => &MEDTECH,
            Industry::Biotech => &BIOTECH,
            Industry::Marketplace => &MARKETPLACE,
            Industry::AiMachineLearning => &AI_ML,
            Industry::CleantechEnergy => &CLEANTECH,
            Industry::AgTechFoodTech => &AGTECH,
            Industry::EdTech => &EDTECH,
            Industry::Mobility => &MOBILITY,
            Industry::GovTech => &GOVTECH,
            Industry::Web3Blockchain => &WEB3,
        }
    }

    pub fn questions(self) -> Vec<Question> {
        build(self.entries(), INDUSTRY_WEIGHT)
    }
}

pub fn general_questions() -> Vec<Question> {
    build(&GENERAL, GENERAL_WEIGHT)
}

fn build(entries: &[Entry], weight: u32) -> Vec<Question> {
    entries
        .iter()
        .map(|&(id, text, category)| Question {
            id: QuestionId::new(id),
            text,
            category,
            weight,
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("question id '{0}' appears more than once in the assessment")]
    DuplicateQuestion(QuestionId),
}

/// Ordered, id-unique union of the general list and the selected industry lists.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    industries: Vec<Industry>,
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn general() -> Self {
        Self {
            industries: Vec::new(),
            questions: general_questions(),
        }
    }

    /// Repeated industries are collapsed, keeping first-selection order.
    pub fn for_industries(industries: &[Industry]) -> Result<Self, CatalogError> {
        let mut selected = Vec::new();
        for industry in industries {
            if !selected.contains(industry) {
                selected.push(*industry);
            }
        }

        let mut questions = general_questions();
        for industry in &selected {
            questions.extend(industry.questions());
        }

        Self::from_parts(selected, questions)
    }

    pub(crate) fn from_parts(
        industries: Vec<Industry>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(Self {
            industries,
            questions,
        })
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions shown on one page of the general section.
    pub fn general_page(&self, page: usize) -> &[Question] {
        match GENERAL_PAGES.get(page) {
            Some((start, end)) => &self.questions[*start..*end],
            None => &[],
        }
    }

    pub fn industry_page(&self, industry: Industry) -> Vec<&Question> {
        let ids: HashSet<&str> = industry.entries().iter().map(|(id, _, _)| *id).collect();
        self.questions
            .iter()
            .filter(|question| ids.contains(question.id.as_str()))
            .collect()
    }

    /// Joined industry labels, or "Technology" when nothing was selected.
    pub fn industry_label(&self) -> String {
        if self.industries.is_empty() {
            "Technology".to_string()
        } else {
            self.industries
                .iter()
                .map(|industry| industry.label())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}
