use serde::{Deserialize, Serialize};

/// Priced model offered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
}

const fn model(id: &'static str, name: &'static str, input: f64, output: f64) -> ModelSpec {
    ModelSpec {
        id,
        name,
        input_cost_per_million: input,
        output_cost_per_million: output,
    }
}

const OPENAI_MODELS: [ModelSpec; 3] = [
    model("gpt-4o-mini", "GPT-4o Mini", 0.15, 0.60),
    model("gpt-4o", "GPT-4o", 2.50, 10.00),
    model("o3-mini", "O3 Mini", 1.00, 4.00),
];

const ANTHROPIC_MODELS: [ModelSpec; 3] = [
    model("claude-4-sonnet", "Claude 4 Sonnet", 3.00, 15.00),
    model("claude-4-opus", "Claude 4 Opus", 15.00, 75.00),
    model("claude-3.5-sonnet", "Claude 3.5 Sonnet", 3.00, 15.00),
];

const GEMINI_MODELS: [ModelSpec; 2] = [
    model("gemini-2.5-pro", "Gemini 2.5 Pro", 1.25, 5.00),
    model("gemini-2.5-flash", "Gemini 2.5 Flash", 0.075, 0.30),
];

const AZURE_MODELS: [ModelSpec; 2] = [
    model("gpt-4o", "GPT-4o", 5.00, 15.00),
    model("gpt-4o-mini", "GPT-4o Mini", 0.165, 0.66),
];

/// Completion providers the oracle can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    AzureOpenAi,
}

impl ProviderKind {
    pub const fn ordered() -> [ProviderKind; 4] {
        [
            ProviderKind::OpenAi,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
            ProviderKind::AzureOpenAi,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" | "open_ai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "gemini" | "google" => Some(Self::Gemini),
            "azure" | "azure_openai" => Some(Self::AzureOpenAi),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic Claude",
            Self::Gemini => "Google Gemini",
            Self::AzureOpenAi => "Azure OpenAI",
        }
    }

    /// Azure endpoints are per-resource, so there is no shared default.
    pub const fn default_endpoint(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("https://api.openai.com/v1/chat/completions"),
            Self::Anthropic => Some("https://api.anthropic.com/v1/messages"),
            Self::Gemini => Some("https://generativelanguage.googleapis.com/v1beta/models"),
            Self::AzureOpenAi => None,
        }
    }

    pub fn models(self) -> &'static [ModelSpec] {
        match self {
            Self::OpenAi => &OPENAI_MODELS,
            Self::Anthropic => &ANTHROPIC_MODELS,
            Self::Gemini => &GEMINI_MODELS,
            Self::AzureOpenAi => &AZURE_MODELS,
        }
    }

    pub fn default_model(self) -> &'static ModelSpec {
        &self.models()[0]
    }

    pub fn model(self, id: &str) -> Option<&'static ModelSpec> {
        self.models().iter().find(|spec| spec.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_offers_at_least_one_model() {
        for provider in ProviderKind::ordered() {
            assert!(!provider.models().is_empty(), "{}", provider.label());
            assert!(provider.default_model().input_cost_per_million > 0.0);
        }
    }

    #[test]
    fn provider_aliases_resolve() {
        assert_eq!(ProviderKind::parse("Claude"), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::parse("google"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("bedrock"), None);
    }

    #[test]
    fn model_lookup_is_scoped_to_provider() {
        assert!(ProviderKind::AzureOpenAi.model("gpt-4o-mini").is_some());
        assert!(ProviderKind::Anthropic.model("gpt-4o-mini").is_none());
    }
}
