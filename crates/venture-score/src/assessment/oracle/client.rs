use super::catalog::{ModelSpec, ProviderKind};
use super::prompt::{build_prompt, parse_completion};
use super::providers::{adapter_for, CompletionAdapter, Target};
use super::{AnswerOracle, OracleUnavailable};
use crate::assessment::domain::{Answer, Evaluation, Question};
use crate::config::OracleSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleSetupError {
    #[error("oracle scoring needs ORACLE_API_KEY")]
    MissingCredential,
    #[error("{provider} needs ORACLE_ENDPOINT set to the resource's deployments URL")]
    MissingEndpoint { provider: &'static str },
    #[error("model '{model}' is not offered by {provider}")]
    UnknownModel {
        provider: &'static str,
        model: String,
    },
    #[error("http client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}

/// Oracle backed by a remote completion provider.
pub struct HttpOracle {
    client: Client,
    adapter: Box<dyn CompletionAdapter>,
    provider: ProviderKind,
    model: &'static ModelSpec,
    target: Target,
}

impl HttpOracle {
    pub fn new(settings: &OracleSettings) -> Result<Self, OracleSetupError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(OracleSetupError::MissingCredential)?;
        let model = settings.provider.model(&settings.model).ok_or_else(|| {
            OracleSetupError::UnknownModel {
                provider: settings.provider.label(),
                model: settings.model.clone(),
            }
        })?;

        let endpoint = settings
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .or(settings.provider.default_endpoint())
            .ok_or(OracleSetupError::MissingEndpoint {
                provider: settings.provider.label(),
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            adapter: adapter_for(settings.provider),
            provider: settings.provider,
            model,
            target: Target {
                endpoint: endpoint.to_string(),
                model: model.id.to_string(),
                api_key: api_key.to_string(),
            },
        })
    }
}

#[async_trait]
impl AnswerOracle for HttpOracle {
    fn name(&self) -> &'static str {
        self.provider.label()
    }

    fn cost_per_million(&self) -> f64 {
        self.model.input_cost_per_million
    }

    async fn evaluate(
        &self,
        question: &Question,
        answer: &Answer,
    ) -> Result<Evaluation, OracleUnavailable> {
        let prompt = build_prompt(question, answer);
        let response = self
            .adapter
            .request(&self.client, &self.target, &prompt)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(OracleUnavailable::InvalidCredential),
            StatusCode::TOO_MANY_REQUESTS => return Err(OracleUnavailable::QuotaExceeded),
            status if !status.is_success() => {
                return Err(OracleUnavailable::Status {
                    status: status.as_u16(),
                })
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| OracleUnavailable::MalformedResponse(err.to_string()))?;
        let text = self.adapter.completion_text(&body)?;
        parse_completion(&text)
    }
}
