use super::catalog::ProviderKind;
use super::OracleUnavailable;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

pub(crate) const TEMPERATURE: f32 = 0.3;
pub(crate) const MAX_TOKENS: u32 = 500;
const ANTHROPIC_VERSION: &str = "2023-06-01";
const AZURE_API_VERSION: &str = "2024-02-01";

/// Where and as whom a request is sent.
#[derive(Debug, Clone)]
pub(crate) struct Target {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
}

impl Target {
    fn base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

/// Per-provider request shape and response extraction.
pub(crate) trait CompletionAdapter: Send + Sync {
    fn request(&self, client: &Client, target: &Target, prompt: &str) -> RequestBuilder;

    /// Pulls the completion text out of a successful response body.
    fn completion_text(&self, body: &Value) -> Result<String, OracleUnavailable>;
}

pub(crate) fn adapter_for(kind: ProviderKind) -> Box<dyn CompletionAdapter> {
    match kind {
        ProviderKind::OpenAi => Box::new(ChatCompletions),
        ProviderKind::AzureOpenAi => Box::new(AzureChatCompletions),
        ProviderKind::Anthropic => Box::new(AnthropicMessages),
        ProviderKind::Gemini => Box::new(GeminiGenerateContent),
    }
}

fn text_at(body: &Value, pointer: &str, field: &'static str) -> Result<String, OracleUnavailable> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(OracleUnavailable::MissingField(field))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatRequest<'a> {
    fn new(model: Option<&'a str>, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

struct ChatCompletions;

impl CompletionAdapter for ChatCompletions {
    fn request(&self, client: &Client, target: &Target, prompt: &str) -> RequestBuilder {
        client
            .post(target.base())
            .bearer_auth(&target.api_key)
            .json(&ChatRequest::new(Some(&target.model), prompt))
    }

    fn completion_text(&self, body: &Value) -> Result<String, OracleUnavailable> {
        text_at(body, "/choices/0/message/content", "choices[0].message.content")
    }
}

/// Deployment-scoped chat completions; the model id names the deployment.
struct AzureChatCompletions;

impl CompletionAdapter for AzureChatCompletions {
    fn request(&self, client: &Client, target: &Target, prompt: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}/chat/completions?api-version={AZURE_API_VERSION}",
            target.base(),
            target.model
        );
        client
            .post(url)
            .header("api-key", target.api_key.as_str())
            .json(&ChatRequest::new(None, prompt))
    }

    fn completion_text(&self, body: &Value) -> Result<String, OracleUnavailable> {
        text_at(body, "/choices/0/message/content", "choices[0].message.content")
    }
}

struct AnthropicMessages;

impl CompletionAdapter for AnthropicMessages {
    fn request(&self, client: &Client, target: &Target, prompt: &str) -> RequestBuilder {
        client
            .post(target.base())
            .header("x-api-key", target.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&ChatRequest::new(Some(&target.model), prompt))
    }

    fn completion_text(&self, body: &Value) -> Result<String, OracleUnavailable> {
        text_at(body, "/content/0/text", "content[0].text")
    }
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: [GeminiContent<'a>; 1],
    generation_config: GeminiGenerationConfig,
}

struct GeminiGenerateContent;

impl CompletionAdapter for GeminiGenerateContent {
    fn request(&self, client: &Client, target: &Target, prompt: &str) -> RequestBuilder {
        let url = format!("{}/{}:generateContent", target.base(), target.model);
        let payload = GeminiRequest {
            contents: [GeminiContent {
                parts: [GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_TOKENS,
            },
        };
        client
            .post(url)
            .header("x-goog-api-key", target.api_key.as_str())
            .json(&payload)
    }

    fn completion_text(&self, body: &Value) -> Result<String, OracleUnavailable> {
        text_at(
            body,
            "/candidates/0/content/parts/0/text",
            "candidates[0].content.parts[0].text",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_text_from_each_provider_shape() {
        let openai = json!({"choices": [{"message": {"content": "{}"}}]});
        let anthropic = json!({"content": [{"type": "text", "text": "{}"}]});
        let gemini = json!({"candidates": [{"content": {"parts": [{"text": "{}"}]}}]});

        assert_eq!(
            adapter_for(ProviderKind::OpenAi)
                .completion_text(&openai)
                .unwrap(),
            "{}"
        );
        assert_eq!(
            adapter_for(ProviderKind::AzureOpenAi)
                .completion_text(&openai)
                .unwrap(),
            "{}"
        );
        assert_eq!(
            adapter_for(ProviderKind::Anthropic)
                .completion_text(&anthropic)
                .unwrap(),
            "{}"
        );
        assert_eq!(
            adapter_for(ProviderKind::Gemini)
                .completion_text(&gemini)
                .unwrap(),
            "{}"
        );
    }

    #[test]
    fn reports_missing_completion_path() {
        let err = adapter_for(ProviderKind::Anthropic)
            .completion_text(&json!({"content": []}))
            .unwrap_err();
        assert!(matches!(err, OracleUnavailable::MissingField("content[0].text")));
    }

    #[test]
    fn chat_request_carries_sampling_settings() {
        let body = serde_json::to_value(ChatRequest::new(Some("gpt-4o-mini"), "hi")).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["max_tokens"], 500);
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }
}
